//! SQLite schema definitions
//!
//! Initial schema with all tables. No migrations needed for first version.

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

/// Complete schema SQL
pub const SCHEMA: &str = r#"
-- =============================================================================
-- Infrastructure: Schema version tracking
-- =============================================================================
CREATE TABLE IF NOT EXISTS schema_version (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    version INTEGER NOT NULL,
    applied_at INTEGER NOT NULL,
    description TEXT
);

CREATE TABLE IF NOT EXISTS schema_migrations (
    version INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    applied_at INTEGER NOT NULL,
    checksum TEXT NOT NULL,
    execution_time_ms INTEGER,
    success INTEGER NOT NULL DEFAULT 1
);

-- =============================================================================
-- 1. Tickets (must be before messages due to FK)
-- =============================================================================
CREATE TABLE IF NOT EXISTS tickets (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    number TEXT NOT NULL CHECK(length(number) >= 1),
    open INTEGER NOT NULL DEFAULT 1 CHECK(open IN (0, 1)),
    created_at INTEGER NOT NULL
);

-- At most one open ticket per phone number; closed tickets keep their
-- number so history survives reopening the conversation
CREATE UNIQUE INDEX IF NOT EXISTS idx_tickets_open_number
    ON tickets(number)
    WHERE open = 1;

-- =============================================================================
-- 2. Messages (references tickets)
-- =============================================================================
CREATE TABLE IF NOT EXISTS messages (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    ticket_id INTEGER NOT NULL REFERENCES tickets(id) ON DELETE CASCADE,
    direction TEXT NOT NULL CHECK(direction IN ('in', 'out')),
    content TEXT NOT NULL,
    created_at INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_messages_ticket ON messages(ticket_id);
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[allow(clippy::assertions_on_constants)]
    fn test_schema_version_is_positive() {
        assert!(SCHEMA_VERSION > 0);
    }

    #[test]
    #[allow(clippy::const_is_empty)]
    fn test_schema_is_not_empty() {
        assert!(!SCHEMA.is_empty());
    }

    #[test]
    fn test_schema_contains_required_tables() {
        let required_tables = [
            "schema_version",
            "schema_migrations",
            "tickets",
            "messages",
        ];

        for table in required_tables {
            assert!(
                SCHEMA.contains(&format!("CREATE TABLE IF NOT EXISTS {}", table)),
                "Schema missing table: {}",
                table
            );
        }
    }

    #[test]
    fn test_schema_enforces_one_open_ticket_per_number() {
        assert!(
            SCHEMA.contains("CREATE UNIQUE INDEX IF NOT EXISTS idx_tickets_open_number"),
            "Schema missing partial unique index on open tickets"
        );
        assert!(
            SCHEMA.contains("WHERE open = 1"),
            "Unique index must only cover open tickets"
        );
    }

    #[test]
    fn test_schema_constrains_message_direction() {
        assert!(
            SCHEMA.contains("CHECK(direction IN ('in', 'out'))"),
            "Schema missing direction constraint"
        );
    }
}
