use super::IMessageRepo;
use crate::repos::shared::inmemory_repo::*;
use medi_reminder_domain::{Message, ID};

pub struct InMemoryMessageRepo {
    messages: std::sync::Mutex<Vec<Message>>,
}

impl InMemoryMessageRepo {
    pub fn new() -> Self {
        Self {
            messages: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IMessageRepo for InMemoryMessageRepo {
    async fn insert(&self, message: &Message) -> anyhow::Result<()> {
        insert(message, &self.messages);
        Ok(())
    }

    async fn find_by_receiver(&self, receiver_id: &ID) -> anyhow::Result<Vec<Message>> {
        let mut messages = find_by(&self.messages, |m| m.receiver_id == *receiver_id);
        messages.sort_by_key(|m| m.created);
        Ok(messages)
    }
}
