//! Ticket repository for SQLite operations

use sqlx::SqlitePool;

use crate::data::sqlite::SqliteError;
use crate::data::types::TicketRow;

/// Find the open ticket for a phone number, creating one if none exists.
/// Returns the ticket and whether it was newly created.
///
/// The partial unique index on open tickets turns a concurrent insert into
/// a no-op; the re-select picks up whichever row won the race.
pub async fn find_or_create_open(
    pool: &SqlitePool,
    number: &str,
) -> Result<(TicketRow, bool), SqliteError> {
    let now = chrono::Utc::now().timestamp();

    let result = sqlx::query(
        r#"
        INSERT INTO tickets (number, open, created_at)
        VALUES (?, 1, ?)
        ON CONFLICT(number) WHERE open = 1 DO NOTHING
        "#,
    )
    .bind(number)
    .bind(now)
    .execute(pool)
    .await?;

    let created = result.rows_affected() > 0;

    // Either we just inserted the row or an open one already exists
    let (id, number, open): (i64, String, bool) =
        sqlx::query_as("SELECT id, number, open FROM tickets WHERE number = ? AND open = 1")
            .bind(number)
            .fetch_one(pool)
            .await?;

    Ok((TicketRow { id, number, open }, created))
}

/// Get a ticket by ID, open or closed
pub async fn get_ticket(pool: &SqlitePool, id: i64) -> Result<Option<TicketRow>, SqliteError> {
    let row: Option<(i64, String, bool)> =
        sqlx::query_as("SELECT id, number, open FROM tickets WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?;

    Ok(row.map(|(id, number, open)| TicketRow { id, number, open }))
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn setup_test_pool() -> SqlitePool {
        let pool = SqlitePool::connect(":memory:").await.unwrap();
        sqlx::query(crate::data::sqlite::schema::SCHEMA)
            .execute(&pool)
            .await
            .unwrap();
        pool
    }

    #[tokio::test]
    async fn test_find_or_create_creates_first_ticket() {
        let pool = setup_test_pool().await;

        let (ticket, created) = find_or_create_open(&pool, "+31612345678").await.unwrap();
        assert!(created);
        assert_eq!(ticket.id, 1);
        assert_eq!(ticket.number, "+31612345678");
        assert!(ticket.open);
    }

    #[tokio::test]
    async fn test_find_or_create_reuses_open_ticket() {
        let pool = setup_test_pool().await;

        let (first, created) = find_or_create_open(&pool, "+31612345678").await.unwrap();
        assert!(created);

        let (second, created) = find_or_create_open(&pool, "+31612345678").await.unwrap();
        assert!(!created);
        assert_eq!(second.id, first.id);

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tickets")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_find_or_create_distinct_numbers() {
        let pool = setup_test_pool().await;

        let (a, _) = find_or_create_open(&pool, "+31611111111").await.unwrap();
        let (b, _) = find_or_create_open(&pool, "+31622222222").await.unwrap();
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn test_find_or_create_after_close_creates_new() {
        let pool = setup_test_pool().await;

        let (first, _) = find_or_create_open(&pool, "+31612345678").await.unwrap();

        // No code path closes tickets; simulate a manual close
        sqlx::query("UPDATE tickets SET open = 0 WHERE id = ?")
            .bind(first.id)
            .execute(&pool)
            .await
            .unwrap();

        let (second, created) = find_or_create_open(&pool, "+31612345678").await.unwrap();
        assert!(created);
        assert_ne!(second.id, first.id);
        assert!(second.open);
    }

    #[tokio::test]
    async fn test_get_ticket_missing() {
        let pool = setup_test_pool().await;

        let ticket = get_ticket(&pool, 42).await.unwrap();
        assert!(ticket.is_none());
    }

    #[tokio::test]
    async fn test_get_ticket_returns_closed() {
        let pool = setup_test_pool().await;

        let (created, _) = find_or_create_open(&pool, "+31612345678").await.unwrap();
        sqlx::query("UPDATE tickets SET open = 0 WHERE id = ?")
            .bind(created.id)
            .execute(&pool)
            .await
            .unwrap();

        // Lookup by id ignores the open flag
        let ticket = get_ticket(&pool, created.id).await.unwrap().unwrap();
        assert_eq!(ticket.id, created.id);
        assert!(!ticket.open);
    }
}
