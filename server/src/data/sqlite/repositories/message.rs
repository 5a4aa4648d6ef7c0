//! Message repository for SQLite operations

use sqlx::SqlitePool;

use crate::data::sqlite::SqliteError;
use crate::data::types::{MessageDirection, MessageRow, ThreadRow};

/// Append a message to a ticket's thread
pub async fn append_message(
    pool: &SqlitePool,
    ticket_id: i64,
    direction: MessageDirection,
    content: &str,
) -> Result<MessageRow, SqliteError> {
    let now = chrono::Utc::now().timestamp();

    let result = sqlx::query(
        "INSERT INTO messages (ticket_id, direction, content, created_at) VALUES (?, ?, ?, ?)",
    )
    .bind(ticket_id)
    .bind(direction.as_str())
    .bind(content)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(MessageRow {
        id: result.last_insert_rowid(),
        ticket_id,
        direction,
        content: content.to_string(),
    })
}

/// List all messages for a ticket in insertion order
pub async fn list_for_ticket(
    pool: &SqlitePool,
    ticket_id: i64,
) -> Result<Vec<MessageRow>, SqliteError> {
    let rows: Vec<(i64, i64, String, String)> = sqlx::query_as(
        "SELECT id, ticket_id, direction, content FROM messages WHERE ticket_id = ? ORDER BY id",
    )
    .bind(ticket_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(id, ticket_id, direction, content)| MessageRow {
            id,
            ticket_id,
            direction: MessageDirection::parse(&direction).unwrap_or(MessageDirection::In),
            content,
        })
        .collect())
}

/// Fetch every message belonging to an open ticket, joined with its ticket,
/// in message insertion order. Tickets without messages produce no rows.
pub async fn open_thread_rows(pool: &SqlitePool) -> Result<Vec<ThreadRow>, SqliteError> {
    let rows: Vec<(i64, String, String, String)> = sqlx::query_as(
        r#"
        SELECT t.id, t.number, m.direction, m.content
        FROM tickets t
        JOIN messages m ON m.ticket_id = t.id
        WHERE t.open = 1
        ORDER BY m.id
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(ticket_id, number, direction, content)| ThreadRow {
            ticket_id,
            number,
            direction: MessageDirection::parse(&direction).unwrap_or(MessageDirection::In),
            content,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sqlite::repositories::ticket::find_or_create_open;

    async fn setup_test_pool() -> SqlitePool {
        let pool = SqlitePool::connect(":memory:").await.unwrap();
        sqlx::query(crate::data::sqlite::schema::SCHEMA)
            .execute(&pool)
            .await
            .unwrap();
        pool
    }

    #[tokio::test]
    async fn test_append_and_list() {
        let pool = setup_test_pool().await;
        let (ticket, _) = find_or_create_open(&pool, "+31612345678").await.unwrap();

        let msg = append_message(&pool, ticket.id, MessageDirection::In, "Hi")
            .await
            .unwrap();
        assert_eq!(msg.ticket_id, ticket.id);
        assert_eq!(msg.direction, MessageDirection::In);
        assert_eq!(msg.content, "Hi");

        let messages = list_for_ticket(&pool, ticket.id).await.unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].id, msg.id);
    }

    #[tokio::test]
    async fn test_list_preserves_insertion_order() {
        let pool = setup_test_pool().await;
        let (ticket, _) = find_or_create_open(&pool, "+31612345678").await.unwrap();

        append_message(&pool, ticket.id, MessageDirection::In, "first")
            .await
            .unwrap();
        append_message(&pool, ticket.id, MessageDirection::Out, "second")
            .await
            .unwrap();
        append_message(&pool, ticket.id, MessageDirection::In, "third")
            .await
            .unwrap();

        let messages = list_for_ticket(&pool, ticket.id).await.unwrap();
        let contents: Vec<&str> = messages.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["first", "second", "third"]);
        assert_eq!(messages[1].direction, MessageDirection::Out);
    }

    #[tokio::test]
    async fn test_list_empty_ticket() {
        let pool = setup_test_pool().await;
        let (ticket, _) = find_or_create_open(&pool, "+31612345678").await.unwrap();

        let messages = list_for_ticket(&pool, ticket.id).await.unwrap();
        assert!(messages.is_empty());
    }

    #[tokio::test]
    async fn test_open_thread_rows_interleaved() {
        let pool = setup_test_pool().await;
        let (a, _) = find_or_create_open(&pool, "+31611111111").await.unwrap();
        let (b, _) = find_or_create_open(&pool, "+31622222222").await.unwrap();

        append_message(&pool, a.id, MessageDirection::In, "a1")
            .await
            .unwrap();
        append_message(&pool, b.id, MessageDirection::In, "b1")
            .await
            .unwrap();
        append_message(&pool, a.id, MessageDirection::Out, "a2")
            .await
            .unwrap();

        // Global message order, not grouped by ticket
        let rows = open_thread_rows(&pool).await.unwrap();
        let contents: Vec<&str> = rows.iter().map(|r| r.content.as_str()).collect();
        assert_eq!(contents, vec!["a1", "b1", "a2"]);
        assert_eq!(rows[0].ticket_id, a.id);
        assert_eq!(rows[1].number, "+31622222222");
    }

    #[tokio::test]
    async fn test_open_thread_rows_skips_closed_tickets() {
        let pool = setup_test_pool().await;
        let (open, _) = find_or_create_open(&pool, "+31611111111").await.unwrap();
        let (closed, _) = find_or_create_open(&pool, "+31622222222").await.unwrap();

        append_message(&pool, open.id, MessageDirection::In, "visible")
            .await
            .unwrap();
        append_message(&pool, closed.id, MessageDirection::In, "hidden")
            .await
            .unwrap();

        sqlx::query("UPDATE tickets SET open = 0 WHERE id = ?")
            .bind(closed.id)
            .execute(&pool)
            .await
            .unwrap();

        let rows = open_thread_rows(&pool).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].content, "visible");
    }

    #[tokio::test]
    async fn test_open_thread_rows_skips_message_less_tickets() {
        let pool = setup_test_pool().await;
        let (with_messages, _) = find_or_create_open(&pool, "+31611111111").await.unwrap();
        find_or_create_open(&pool, "+31622222222").await.unwrap();

        append_message(&pool, with_messages.id, MessageDirection::In, "hello")
            .await
            .unwrap();

        // The inner join hides the message-less ticket
        let rows = open_thread_rows(&pool).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].ticket_id, with_messages.id);
    }
}
