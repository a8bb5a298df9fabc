//! SQLite implementation of [`StationStore`].

use crate::query::ListQuery;
use crate::schema;
use crate::subscription::{ChangeKind, ChangeSender, StationChange, Subscribers, SubscriptionHandle};
use crate::{StationStore, StoreError};
use chrono::{DateTime, SecondsFormat, Utc};
use fp_core::station::STATIONS_TABLE;
use fp_core::{NewStation, Station, StationPatch, StationStatus};
use fp_utils::dates::parse_timestamp;
use rusqlite::types::Type;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

const COLUMNS: &str = "id, title, status, latitude, longitude, notes, created_at, updated_at";

/// SQLite-backed station table.
///
/// Cheaply cloneable (via `Rc`); clones share the connection and subscribers.
/// Subscribers are notified after every successful mutation.
#[derive(Clone)]
pub struct LocalStore {
    conn: Rc<RefCell<Connection>>,
    subscribers: Rc<Subscribers>,
}

fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn conversion_err(
    column: usize,
    e: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(e))
}

fn row_to_station(row: &Row<'_>) -> rusqlite::Result<Station> {
    let status: String = row.get(2)?;
    let created_at: String = row.get(6)?;
    let updated_at: String = row.get(7)?;
    Ok(Station {
        id: row.get(0)?,
        title: row.get(1)?,
        status: status.parse::<StationStatus>().map_err(|e| conversion_err(2, e))?,
        latitude: row.get(3)?,
        longitude: row.get(4)?,
        notes: row.get(5)?,
        created_at: parse_timestamp(&created_at).map_err(|e| conversion_err(6, e))?,
        updated_at: parse_timestamp(&updated_at).map_err(|e| conversion_err(7, e))?,
    })
}

impl LocalStore {
    /// Create an empty in-memory store.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    /// Open (or create) a store in the SQLite file at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Self::from_connection(Connection::open(path)?)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(schema::create_schema())?;
        Ok(Self {
            conn: Rc::new(RefCell::new(conn)),
            subscribers: Rc::new(Subscribers::default()),
        })
    }

    /// Insert complete rows as-is, keeping their ids and timestamps.
    ///
    /// Existing rows with the same id are replaced. Subscribers are not notified.
    pub fn import(&self, stations: &[Station]) -> Result<usize, StoreError> {
        let conn = self.conn.borrow();
        let mut count = 0;
        for s in stations {
            conn.execute(
                "INSERT OR REPLACE INTO feeding_points (id, title, status, latitude, longitude, notes, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    s.id,
                    s.title,
                    s.status.as_str(),
                    s.latitude,
                    s.longitude,
                    s.notes,
                    format_timestamp(&s.created_at),
                    format_timestamp(&s.updated_at),
                ],
            )?;
            count += 1;
        }
        log::info!("local store: imported {} stations", count);
        Ok(count)
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    fn notify(&self, kind: ChangeKind, id: &str) {
        self.subscribers.notify(StationChange {
            table: STATIONS_TABLE.to_string(),
            kind,
            id: id.to_string(),
        });
    }

    fn get(&self, id: &str) -> Result<Station, StoreError> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM feeding_points WHERE id = ?1",
            COLUMNS
        ))?;
        let mut rows = stmt.query_map(params![id], row_to_station)?;
        match rows.next() {
            Some(row) => Ok(row?),
            None => Err(StoreError::NotFound(id.to_string())),
        }
    }
}

impl StationStore for LocalStore {
    async fn list(&self, query: &ListQuery) -> Result<Vec<Station>, StoreError> {
        let mut sql = format!("SELECT {} FROM feeding_points", COLUMNS);
        let mut args: Vec<String> = Vec::new();
        if let Some(status) = query.status {
            sql.push_str(" WHERE status = ?1");
            args.push(status.as_str().to_string());
        }
        sql.push_str(&format!(
            " ORDER BY {} {}, rowid {}",
            query.order.column.as_str(),
            if query.order.ascending { "ASC" } else { "DESC" },
            if query.order.ascending { "ASC" } else { "DESC" },
        ));
        if let Some(limit) = query.limit {
            sql.push_str(&format!(" LIMIT {}", limit));
        }

        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params_from_iter(args.iter()), row_to_station)?
            .collect::<Result<Vec<_>, _>>()?;
        log::debug!("local store: list returned {} stations", rows.len());
        Ok(rows)
    }

    async fn insert(&self, station: &NewStation) -> Result<Station, StoreError> {
        let now = Utc::now();
        let row = Station {
            id: uuid::Uuid::new_v4().to_string(),
            title: station.title.clone(),
            status: station.status,
            latitude: station.latitude,
            longitude: station.longitude,
            notes: station.notes.clone(),
            created_at: now,
            updated_at: now,
        };
        self.import(std::slice::from_ref(&row))?;
        self.notify(ChangeKind::Insert, &row.id);
        Ok(row)
    }

    async fn update(&self, id: &str, patch: &StationPatch) -> Result<(), StoreError> {
        let mut station = self.get(id)?;
        if patch.is_empty() {
            return Ok(());
        }
        station.apply(patch);
        {
            let conn = self.conn.borrow();
            conn.execute(
                "UPDATE feeding_points SET title = ?2, status = ?3, notes = ?4 WHERE id = ?1",
                params![id, station.title, station.status.as_str(), station.notes],
            )?;
        }
        self.notify(ChangeKind::Update, id);
        Ok(())
    }

    fn subscribe(&self, table: &str, sender: ChangeSender) -> SubscriptionHandle {
        self.subscribers.add(table, sender)
    }

    fn unsubscribe(&self, handle: SubscriptionHandle) {
        self.subscribers.remove(handle);
    }
}
