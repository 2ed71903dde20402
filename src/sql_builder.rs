//! Parameterized statement construction for the collection tables.
//!
//! Values are bound through DuckDB placeholders as [`duckdb::types::Value`],
//! never interpolated into the SQL text. Identifiers (tables, columns) are
//! always crate-supplied constants.
//!
//! # Example
//!
//! ```rust
//! use mtg_manager::SqlBuilder;
//! let (sql, params) = SqlBuilder::select("user_cards uc")
//!     .columns(&["uc.id", "uc.quantity"])
//!     .join("JOIN cards c ON c.id = uc.card_id")
//!     .where_eq("uc.user_id", "user-1")
//!     .order_by(&["c.name ASC"])
//!     .build();
//! assert_eq!(params.len(), 1);
//! ```

use duckdb::types::Value;

/// Anything that can be bound as a statement parameter.
pub trait IntoSqlValue {
    fn into_sql_value(self) -> Value;
}

impl IntoSqlValue for Value {
    fn into_sql_value(self) -> Value {
        self
    }
}

impl IntoSqlValue for &str {
    fn into_sql_value(self) -> Value {
        Value::Text(self.to_string())
    }
}

impl IntoSqlValue for String {
    fn into_sql_value(self) -> Value {
        Value::Text(self)
    }
}

impl IntoSqlValue for &String {
    fn into_sql_value(self) -> Value {
        Value::Text(self.clone())
    }
}

impl IntoSqlValue for i64 {
    fn into_sql_value(self) -> Value {
        Value::BigInt(self)
    }
}

impl IntoSqlValue for u32 {
    fn into_sql_value(self) -> Value {
        Value::BigInt(i64::from(self))
    }
}

impl IntoSqlValue for bool {
    fn into_sql_value(self) -> Value {
        Value::Boolean(self)
    }
}

impl<T: IntoSqlValue> IntoSqlValue for Option<T> {
    fn into_sql_value(self) -> Value {
        self.map(IntoSqlValue::into_sql_value).unwrap_or(Value::Null)
    }
}

/// Builds `SELECT` statements. Methods return `&mut Self` for chaining.
pub struct SqlBuilder {
    columns: Vec<String>,
    from: String,
    joins: Vec<String>,
    conditions: Vec<String>,
    params: Vec<Value>,
    group_by: Vec<String>,
    order_by: Vec<String>,
    limit: Option<usize>,
}

impl SqlBuilder {
    /// Start a `SELECT *` against the given table expression.
    pub fn select(table: &str) -> Self {
        Self {
            columns: vec!["*".to_string()],
            from: table.to_string(),
            joins: Vec::new(),
            conditions: Vec::new(),
            params: Vec::new(),
            group_by: Vec::new(),
            order_by: Vec::new(),
            limit: None,
        }
    }

    /// Replace the selected columns.
    pub fn columns(&mut self, cols: &[&str]) -> &mut Self {
        self.columns = cols.iter().map(|c| c.to_string()).collect();
        self
    }

    /// Add a full JOIN clause, e.g. `"JOIN cards c ON c.id = uc.card_id"`.
    pub fn join(&mut self, clause: &str) -> &mut Self {
        self.joins.push(clause.to_string());
        self
    }

    /// `{column} = ?`
    pub fn where_eq(&mut self, column: &str, value: impl IntoSqlValue) -> &mut Self {
        self.conditions.push(format!("{column} = ?"));
        self.params.push(value.into_sql_value());
        self
    }

    /// Raw condition with `?` placeholders, params appended in order.
    pub fn where_clause<V: IntoSqlValue>(
        &mut self,
        condition: &str,
        params: impl IntoIterator<Item = V>,
    ) -> &mut Self {
        self.conditions.push(condition.to_string());
        self.params
            .extend(params.into_iter().map(IntoSqlValue::into_sql_value));
        self
    }

    pub fn group_by(&mut self, cols: &[&str]) -> &mut Self {
        self.group_by.extend(cols.iter().map(|c| c.to_string()));
        self
    }

    /// Add ORDER BY clauses (e.g. `"c.name ASC"`).
    pub fn order_by(&mut self, clauses: &[&str]) -> &mut Self {
        self.order_by.extend(clauses.iter().map(|c| c.to_string()));
        self
    }

    pub fn limit(&mut self, n: usize) -> &mut Self {
        self.limit = Some(n);
        self
    }

    /// Render the statement and its parameters.
    pub fn build(&self) -> (String, Vec<Value>) {
        let mut parts = vec![
            format!("SELECT {}", self.columns.join(", ")),
            format!("FROM {}", self.from),
        ];
        parts.extend(self.joins.iter().cloned());
        if !self.conditions.is_empty() {
            parts.push(format!("WHERE {}", self.conditions.join(" AND ")));
        }
        if !self.group_by.is_empty() {
            parts.push(format!("GROUP BY {}", self.group_by.join(", ")));
        }
        if !self.order_by.is_empty() {
            parts.push(format!("ORDER BY {}", self.order_by.join(", ")));
        }
        if let Some(n) = self.limit {
            parts.push(format!("LIMIT {n}"));
        }
        (parts.join("\n"), self.params.clone())
    }
}

/// Builds `INSERT INTO {table} (...) VALUES (?, ...)`.
pub struct InsertBuilder {
    table: String,
    columns: Vec<String>,
    params: Vec<Value>,
}

impl InsertBuilder {
    pub fn table(table: &str) -> Self {
        Self {
            table: table.to_string(),
            columns: Vec::new(),
            params: Vec::new(),
        }
    }

    pub fn value(&mut self, column: &str, value: impl IntoSqlValue) -> &mut Self {
        self.columns.push(column.to_string());
        self.params.push(value.into_sql_value());
        self
    }

    pub fn build(&self) -> (String, Vec<Value>) {
        let placeholders = vec!["?"; self.columns.len()].join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            self.table,
            self.columns.join(", "),
            placeholders
        );
        (sql, self.params.clone())
    }
}

/// Builds `UPDATE {table} SET ... WHERE ...`.
///
/// Refuses to render an unconditioned update: `build` returns `None`
/// when no `where_eq` was added.
pub struct UpdateBuilder {
    table: String,
    assignments: Vec<String>,
    set_params: Vec<Value>,
    conditions: Vec<String>,
    where_params: Vec<Value>,
}

impl UpdateBuilder {
    pub fn table(table: &str) -> Self {
        Self {
            table: table.to_string(),
            assignments: Vec::new(),
            set_params: Vec::new(),
            conditions: Vec::new(),
            where_params: Vec::new(),
        }
    }

    pub fn set(&mut self, column: &str, value: impl IntoSqlValue) -> &mut Self {
        self.assignments.push(format!("{column} = ?"));
        self.set_params.push(value.into_sql_value());
        self
    }

    pub fn where_eq(&mut self, column: &str, value: impl IntoSqlValue) -> &mut Self {
        self.conditions.push(format!("{column} = ?"));
        self.where_params.push(value.into_sql_value());
        self
    }

    pub fn build(&self) -> Option<(String, Vec<Value>)> {
        if self.conditions.is_empty() || self.assignments.is_empty() {
            return None;
        }
        let sql = format!(
            "UPDATE {} SET {} WHERE {}",
            self.table,
            self.assignments.join(", "),
            self.conditions.join(" AND ")
        );
        let mut params = self.set_params.clone();
        params.extend(self.where_params.iter().cloned());
        Some((sql, params))
    }
}
