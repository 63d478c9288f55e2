//! SQLite-based storage for the event collection.
//!
//! Costs are cached in the table for display but recomputed by callers on
//! every read path that cares; the proximity pass is the source of truth.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::DatabaseError;
use crate::event::{Event, EventCategory};

use super::data_dir;

/// Parse an event category from its storage string.
fn parse_category(raw: Option<String>) -> Option<EventCategory> {
    raw.as_deref().and_then(EventCategory::parse)
}

/// Storage string for an event category.
fn format_category(category: Option<EventCategory>) -> Option<&'static str> {
    category.map(|c| c.as_str())
}

/// Parse an RFC 3339 timestamp column.
fn parse_ts(index: usize, raw: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(index, rusqlite::types::Type::Text, Box::new(e))
        })
}

/// Connection-owning handle on the events database.
pub struct EventsDb {
    conn: Connection,
}

impl EventsDb {
    /// Open (or create) the database at `<data_dir>/events.db`.
    pub fn open() -> crate::error::Result<Self> {
        let path = data_dir()?.join("events.db");
        Ok(Self::open_at(&path)?)
    }

    /// Open (or create) a database at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self, DatabaseError> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: PathBuf::from(path),
            source,
        })?;
        let db = Self { conn };
        db.init_schema()?;
        Ok(db)
    }

    /// In-memory database for tests.
    pub fn open_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init_schema()?;
        Ok(db)
    }

    fn init_schema(&self) -> Result<(), DatabaseError> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS events (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                description TEXT,
                start_time TEXT NOT NULL,
                end_time TEXT NOT NULL,
                duration_minutes INTEGER NOT NULL,
                participants INTEGER,
                has_agenda INTEGER,
                requires_tool_switch INTEGER,
                category TEXT,
                calculated_cost INTEGER,
                actual_cost INTEGER,
                is_flexible INTEGER
            )",
            [],
        )?;
        Ok(())
    }

    pub fn insert_event(&self, event: &Event) -> Result<(), DatabaseError> {
        self.conn.execute(
            "INSERT INTO events (
                id, title, description, start_time, end_time, duration_minutes,
                participants, has_agenda, requires_tool_switch, category,
                calculated_cost, actual_cost, is_flexible
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            params![
                event.id,
                event.title,
                event.description,
                event.start_time.to_rfc3339(),
                event.end_time.to_rfc3339(),
                event.duration_minutes,
                event.participants,
                event.has_agenda,
                event.requires_tool_switch,
                format_category(event.category),
                event.calculated_cost,
                event.actual_cost,
                event.is_flexible,
            ],
        )?;
        Ok(())
    }

    /// Update an existing event. Returns false when the id is unknown.
    pub fn update_event(&self, event: &Event) -> Result<bool, DatabaseError> {
        let updated = self.conn.execute(
            "UPDATE events SET
                title = ?2, description = ?3, start_time = ?4, end_time = ?5,
                duration_minutes = ?6, participants = ?7, has_agenda = ?8,
                requires_tool_switch = ?9, category = ?10, calculated_cost = ?11,
                actual_cost = ?12, is_flexible = ?13
            WHERE id = ?1",
            params![
                event.id,
                event.title,
                event.description,
                event.start_time.to_rfc3339(),
                event.end_time.to_rfc3339(),
                event.duration_minutes,
                event.participants,
                event.has_agenda,
                event.requires_tool_switch,
                format_category(event.category),
                event.calculated_cost,
                event.actual_cost,
                event.is_flexible,
            ],
        )?;
        Ok(updated > 0)
    }

    pub fn get_event(&self, id: &str) -> Result<Option<Event>, DatabaseError> {
        let event = self
            .conn
            .query_row(
                "SELECT id, title, description, start_time, end_time, duration_minutes,
                        participants, has_agenda, requires_tool_switch, category,
                        calculated_cost, actual_cost, is_flexible
                 FROM events WHERE id = ?1",
                params![id],
                row_to_event,
            )
            .optional()?;
        Ok(event)
    }

    /// Delete an event. Returns false when the id is unknown.
    pub fn delete_event(&self, id: &str) -> Result<bool, DatabaseError> {
        let deleted = self
            .conn
            .execute("DELETE FROM events WHERE id = ?1", params![id])?;
        Ok(deleted > 0)
    }

    /// All events, ascending by start time.
    pub fn list_events(&self) -> Result<Vec<Event>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, description, start_time, end_time, duration_minutes,
                    participants, has_agenda, requires_tool_switch, category,
                    calculated_cost, actual_cost, is_flexible
             FROM events ORDER BY start_time",
        )?;
        let events = stmt
            .query_map([], row_to_event)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(events)
    }

    /// Atomically replace the whole collection, e.g. after an
    /// optimize-then-apply sequence.
    pub fn replace_all(&mut self, events: &[Event]) -> Result<(), DatabaseError> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM events", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO events (
                    id, title, description, start_time, end_time, duration_minutes,
                    participants, has_agenda, requires_tool_switch, category,
                    calculated_cost, actual_cost, is_flexible
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            )?;
            for event in events {
                stmt.execute(params![
                    event.id,
                    event.title,
                    event.description,
                    event.start_time.to_rfc3339(),
                    event.end_time.to_rfc3339(),
                    event.duration_minutes,
                    event.participants,
                    event.has_agenda,
                    event.requires_tool_switch,
                    format_category(event.category),
                    event.calculated_cost,
                    event.actual_cost,
                    event.is_flexible,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }
}

fn row_to_event(row: &Row<'_>) -> rusqlite::Result<Event> {
    let start_raw: String = row.get(3)?;
    let end_raw: String = row.get(4)?;
    Ok(Event {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        start_time: parse_ts(3, &start_raw)?,
        end_time: parse_ts(4, &end_raw)?,
        duration_minutes: row.get(5)?,
        participants: row.get(6)?,
        has_agenda: row.get(7)?,
        requires_tool_switch: row.get(8)?,
        category: parse_category(row.get(9)?),
        calculated_cost: row.get(10)?,
        actual_cost: row.get(11)?,
        is_flexible: row.get(12)?,
    })
}
