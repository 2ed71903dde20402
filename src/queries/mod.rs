//! Query modules for the collection manager.
//!
//! The storage-backed queries borrow the [`Connection`](crate::connection::Connection)
//! and return typed records from [`models`](crate::models). The meta snapshot
//! is owned and lives in memory.

pub mod collection;
pub mod decks;
pub mod meta;
pub mod users;

pub use collection::{AddOutcome, CollectionQuery};
pub use decks::DeckQuery;
pub use meta::{MetaDeckFilter, MetaQuery, MetaSort};
pub use users::UserQuery;
