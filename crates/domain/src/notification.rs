use crate::shared::entity::{Entity, ID};

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: ID,
    pub user_id: ID,
    pub title: String,
    pub message: String,
    pub read: bool,
    pub created: i64,
}

impl Notification {
    pub fn new(user_id: ID, title: String, message: String, created: i64) -> Self {
        Self {
            id: Default::default(),
            user_id,
            title,
            message,
            read: false,
            created,
        }
    }
}

impl Entity for Notification {
    fn id(&self) -> &ID {
        &self.id
    }
}
