//! DuckDB connection wrapper owning the collection schema.
//!
//! Opens a file-backed or in-memory database, creates the tables on first
//! use and converts result rows into `serde_json` values so query modules
//! can deserialize them into typed records.

use crate::error::{MtgManagerError, Result};
use duckdb::types::{Value, ValueRef};
use duckdb::Connection as DuckDbConnection;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Tables in creation order. Foreign keys point backwards only, so
/// dropping in reverse order is always valid.
pub const TABLES: [&str; 5] = ["users", "cards", "user_cards", "decks", "deck_cards"];

const SCHEMA: &str = r#"
CREATE SEQUENCE IF NOT EXISTS deck_position;

CREATE TABLE IF NOT EXISTS users (
    id          VARCHAR PRIMARY KEY,
    email       VARCHAR NOT NULL UNIQUE,
    name        VARCHAR,
    created_at  TIMESTAMP NOT NULL DEFAULT current_timestamp
);

CREATE TABLE IF NOT EXISTS cards (
    id          VARCHAR PRIMARY KEY,
    name        VARCHAR NOT NULL,
    mana_cost   VARCHAR,
    cmc         BIGINT NOT NULL DEFAULT 0,
    type_line   VARCHAR,
    rarity      VARCHAR NOT NULL DEFAULT 'common',
    set_name    VARCHAR,
    oracle_text VARCHAR,
    power       VARCHAR,
    toughness   VARCHAR,
    image_url   VARCHAR
);

CREATE TABLE IF NOT EXISTS user_cards (
    id          VARCHAR PRIMARY KEY,
    user_id     VARCHAR NOT NULL REFERENCES users(id),
    card_id     VARCHAR NOT NULL REFERENCES cards(id),
    quantity    INTEGER NOT NULL,
    condition   VARCHAR NOT NULL DEFAULT 'NM',
    foil        BOOLEAN NOT NULL DEFAULT FALSE,
    language    VARCHAR NOT NULL DEFAULT 'en'
);

CREATE TABLE IF NOT EXISTS decks (
    id          VARCHAR PRIMARY KEY,
    user_id     VARCHAR NOT NULL REFERENCES users(id),
    name        VARCHAR NOT NULL,
    description VARCHAR,
    format      VARCHAR NOT NULL,
    position    BIGINT NOT NULL DEFAULT nextval('deck_position'),
    created_at  TIMESTAMP NOT NULL DEFAULT current_timestamp
);

CREATE TABLE IF NOT EXISTS deck_cards (
    id          VARCHAR PRIMARY KEY,
    deck_id     VARCHAR NOT NULL REFERENCES decks(id),
    card_id     VARCHAR NOT NULL REFERENCES cards(id),
    quantity    INTEGER NOT NULL,
    sideboard   BOOLEAN NOT NULL DEFAULT FALSE
);
"#;

/// A single result row keyed by column name.
pub type Row = HashMap<String, serde_json::Value>;

/// Wraps a DuckDB connection with the collection schema applied.
pub struct Connection {
    conn: DuckDbConnection,
}

impl Connection {
    /// Open (or create) a database file and ensure the schema exists.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let conn = DuckDbConnection::open(path)?;
        log::info!("Opened collection database at {}", path.display());
        Self::with_schema(conn)
    }

    /// Open a throwaway in-memory database with the schema applied.
    pub fn open_in_memory() -> Result<Self> {
        let conn = DuckDbConnection::open_in_memory()?;
        Self::with_schema(conn)
    }

    fn with_schema(conn: DuckDbConnection) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;
        log::debug!("Collection schema ready ({})", TABLES.join(", "));
        Ok(Self { conn })
    }

    /// Execute SQL and return results as a `Vec` of rows.
    ///
    /// Works for plain `SELECT`s as well as `INSERT ... RETURNING`.
    pub fn execute(&self, sql: &str, params: &[Value]) -> Result<Vec<Row>> {
        let mut stmt = self.conn.prepare(sql)?;
        let param_refs: Vec<&dyn duckdb::ToSql> =
            params.iter().map(|p| p as &dyn duckdb::ToSql).collect();

        let mut rows = stmt.query(param_refs.as_slice())?;

        // Column metadata is only available once the statement has run.
        let stmt_ref = rows.as_ref().ok_or_else(|| {
            MtgManagerError::InvalidArgument(format!("statement produced no result set: {sql}"))
        })?;
        let column_names: Vec<String> = stmt_ref
            .column_names()
            .into_iter()
            .map(|s| s.to_string())
            .collect();

        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            let mut map = HashMap::with_capacity(column_names.len());
            for (i, name) in column_names.iter().enumerate() {
                map.insert(name.clone(), convert_value_ref(row.get_ref(i)?));
            }
            out.push(map);
        }

        Ok(out)
    }

    /// Execute SQL and deserialize each row into type `T`.
    pub fn execute_into<T: DeserializeOwned>(&self, sql: &str, params: &[Value]) -> Result<Vec<T>> {
        self.execute(sql, params)?
            .into_iter()
            .map(|row| {
                let value = serde_json::Value::Object(row.into_iter().collect());
                serde_json::from_value(value).map_err(MtgManagerError::from)
            })
            .collect()
    }

    /// Execute SQL and return the first column of the first row.
    ///
    /// Returns `None` if the result set is empty.
    pub fn execute_scalar(&self, sql: &str, params: &[Value]) -> Result<Option<serde_json::Value>> {
        let mut stmt = self.conn.prepare(sql)?;
        let param_refs: Vec<&dyn duckdb::ToSql> =
            params.iter().map(|p| p as &dyn duckdb::ToSql).collect();

        let mut rows = stmt.query(param_refs.as_slice())?;
        match rows.next()? {
            Some(row) => Ok(Some(convert_value_ref(row.get_ref(0)?))),
            None => Ok(None),
        }
    }

    /// Execute a statement that returns no rows; yields the affected row count.
    pub fn execute_statement(&self, sql: &str, params: &[Value]) -> Result<usize> {
        let mut stmt = self.conn.prepare(sql)?;
        let param_refs: Vec<&dyn duckdb::ToSql> =
            params.iter().map(|p| p as &dyn duckdb::ToSql).collect();
        Ok(stmt.execute(param_refs.as_slice())?)
    }

    /// Count rows in one of the schema tables.
    pub fn table_count(&self, table: &str) -> Result<i64> {
        if !TABLES.contains(&table) {
            return Err(MtgManagerError::InvalidArgument(format!(
                "Unknown table: {table}"
            )));
        }
        let count = self
            .execute_scalar(&format!("SELECT COUNT(*) FROM {table}"), &[])?
            .and_then(|v| v.as_i64())
            .unwrap_or(0);
        Ok(count)
    }

    /// Access the underlying DuckDB connection for advanced usage.
    pub fn raw(&self) -> &DuckDbConnection {
        &self.conn
    }
}

/// Convert a DuckDB `ValueRef` to a `serde_json::Value`.
fn convert_value_ref(val: ValueRef<'_>) -> serde_json::Value {
    match val {
        ValueRef::Null => serde_json::Value::Null,
        ValueRef::Boolean(b) => serde_json::Value::Bool(b),
        ValueRef::TinyInt(n) => n.into(),
        ValueRef::SmallInt(n) => n.into(),
        ValueRef::Int(n) => n.into(),
        ValueRef::BigInt(n) => n.into(),
        // SUM over INTEGER columns comes back as HUGEINT
        ValueRef::HugeInt(n) => match i64::try_from(n) {
            Ok(i) => i.into(),
            Err(_) => serde_json::Value::String(n.to_string()),
        },
        ValueRef::UTinyInt(n) => n.into(),
        ValueRef::USmallInt(n) => n.into(),
        ValueRef::UInt(n) => n.into(),
        ValueRef::UBigInt(n) => n.into(),
        ValueRef::Float(f) => serde_json::Number::from_f64(f as f64)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        ValueRef::Double(f) => serde_json::Number::from_f64(f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        ValueRef::Text(bytes) => {
            serde_json::Value::String(String::from_utf8_lossy(bytes).into_owned())
        }
        _ => serde_json::Value::Null,
    }
}
