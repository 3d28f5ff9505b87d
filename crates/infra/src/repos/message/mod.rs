mod inmemory;
mod postgres;

pub use inmemory::InMemoryMessageRepo;
pub use postgres::PostgresMessageRepo;

use medi_reminder_domain::{Message, ID};

#[async_trait::async_trait]
pub trait IMessageRepo: Send + Sync {
    async fn insert(&self, message: &Message) -> anyhow::Result<()>;
    /// Messages received by the user, oldest first
    async fn find_by_receiver(&self, receiver_id: &ID) -> anyhow::Result<Vec<Message>>;
}
