//! User lookups and identity resolution.

use crate::auth::IdentityProvider;
use crate::connection::Connection;
use crate::error::{MtgManagerError, Result};
use crate::models::User;
use crate::sql_builder::{InsertBuilder, SqlBuilder};

const USER_COLUMNS: &[&str] = &[
    "id",
    "email",
    "name",
    "strftime(created_at, '%Y-%m-%dT%H:%M:%S') AS created_at",
];

pub struct UserQuery<'a> {
    conn: &'a Connection,
}

impl<'a> UserQuery<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Register a user. Emails are unique.
    pub fn create(&self, email: &str, name: Option<&str>) -> Result<User> {
        let email = email.trim();
        if email.is_empty() {
            return Err(MtgManagerError::InvalidArgument(
                "Email is required".to_string(),
            ));
        }
        if self.find_by_email(email)?.is_some() {
            return Err(MtgManagerError::InvalidArgument(format!(
                "A user with email {email} already exists"
            )));
        }

        let id = uuid::Uuid::new_v4().to_string();
        let name = name.map(str::trim).filter(|n| !n.is_empty());
        let (sql, params) = InsertBuilder::table("users")
            .value("id", &id)
            .value("email", email)
            .value("name", name)
            .build();
        self.conn.execute_statement(&sql, &params)?;
        log::info!("Created user {id} ({email})");

        self.find_by_id(&id)?
            .ok_or_else(|| MtgManagerError::NotFound(format!("User {id} vanished after insert")))
    }

    pub fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let (sql, params) = SqlBuilder::select("users")
            .columns(USER_COLUMNS)
            .where_eq("email", email.trim())
            .limit(1)
            .build();
        Ok(self.conn.execute_into(&sql, &params)?.into_iter().next())
    }

    pub fn find_by_id(&self, id: &str) -> Result<Option<User>> {
        let (sql, params) = SqlBuilder::select("users")
            .columns(USER_COLUMNS)
            .where_eq("id", id)
            .limit(1)
            .build();
        Ok(self.conn.execute_into(&sql, &params)?.into_iter().next())
    }

    pub fn count(&self) -> Result<i64> {
        self.conn.table_count("users")
    }

    /// Resolve the caller to a stored user.
    ///
    /// No identity is `Unauthorized`; an identity with no stored user is
    /// `NotFound`.
    pub fn resolve(&self, provider: &dyn IdentityProvider) -> Result<User> {
        let identity = provider.current_user().ok_or_else(|| {
            MtgManagerError::Unauthorized("No signed-in user".to_string())
        })?;
        self.find_by_email(&identity.email)?.ok_or_else(|| {
            MtgManagerError::NotFound(format!("User {} not found", identity.email))
        })
    }
}
