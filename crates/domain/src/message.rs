use crate::shared::entity::{Entity, ID};

/// An in-app message. Reminders write self addressed messages which act
/// as a log of the reminders a `User` has received.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: ID,
    pub sender_id: ID,
    pub receiver_id: ID,
    pub content: String,
    pub created: i64,
}

impl Message {
    pub fn new(sender_id: ID, receiver_id: ID, content: String, created: i64) -> Self {
        Self {
            id: Default::default(),
            sender_id,
            receiver_id,
            content,
            created,
        }
    }
}

impl Entity for Message {
    fn id(&self) -> &ID {
        &self.id
    }
}
