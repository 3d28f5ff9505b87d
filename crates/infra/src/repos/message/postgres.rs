use super::IMessageRepo;
use medi_reminder_domain::{Message, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresMessageRepo {
    pool: PgPool,
}

impl PostgresMessageRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct MessageRaw {
    message_uid: Uuid,
    sender_uid: Uuid,
    receiver_uid: Uuid,
    content: String,
    created: i64,
}

impl From<MessageRaw> for Message {
    fn from(raw: MessageRaw) -> Self {
        Self {
            id: raw.message_uid.into(),
            sender_id: raw.sender_uid.into(),
            receiver_id: raw.receiver_uid.into(),
            content: raw.content,
            created: raw.created,
        }
    }
}

#[async_trait::async_trait]
impl IMessageRepo for PostgresMessageRepo {
    async fn insert(&self, message: &Message) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO messages
            (message_uid, sender_uid, receiver_uid, content, created)
            VALUES($1, $2, $3, $4, $5)
            "#,
        )
        .bind(message.id.inner_ref())
        .bind(message.sender_id.inner_ref())
        .bind(message.receiver_id.inner_ref())
        .bind(&message.content)
        .bind(message.created)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_receiver(&self, receiver_id: &ID) -> anyhow::Result<Vec<Message>> {
        let messages: Vec<MessageRaw> = sqlx::query_as(
            r#"
            SELECT * FROM messages AS m
            WHERE m.receiver_uid = $1
            ORDER BY m.created
            "#,
        )
        .bind(receiver_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;

        Ok(messages.into_iter().map(|m| m.into()).collect())
    }
}
