//! Magic: The Gathering collection manager.
//!
//! Keeps users, their card collections and decks in a local DuckDB database,
//! looks cards up on Scryfall, estimates local-currency prices from USD
//! quotes (with a deterministic fallback when no quote is available) and
//! serves a bundled tournament meta snapshot.
//!
//! # Quick start
//!
//! ```no_run
//! use mtg_manager::{MtgManager, PriceLookup};
//!
//! let manager = MtgManager::builder().build().unwrap();
//!
//! // Price a card in local currency
//! let estimate = manager.prices().estimate(&PriceLookup::by_name("Lightning Bolt")).unwrap();
//!
//! // Add it to a collection
//! let user = manager.users().create("player@example.com", Some("Player")).unwrap();
//! let card = manager.cards().first_by_name("Lightning Bolt").unwrap().unwrap();
//! manager.collection().add(&user, &(&card).into()).unwrap();
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod auth;
pub mod config;
pub mod connection;
pub mod error;
pub mod filter;
mod http;
pub mod mana;
pub mod models;
pub mod notify;
pub mod pricing;
pub mod queries;
pub mod scryfall;
pub mod sql_builder;
pub mod translate;

#[cfg(feature = "async")]
pub use async_client::AsyncMtgManager;
pub use auth::{IdentityProvider, StaticIdentity};
pub use config::PricingConfig;
pub use connection::Connection;
pub use error::{MtgManagerError, Result};
pub use filter::CollectionFilterCriteria;
pub use mana::ManaCost;
pub use models::{Health, PriceEstimate, PriceLookup, PriceOrigin, Rarity};
pub use notify::{CollectionChange, CollectionListener, RefreshSignal};
pub use pricing::{PriceEstimator, PriceSource};
pub use scryfall::ScryfallClient;
pub use sql_builder::SqlBuilder;
pub use translate::Translator;

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

// ---------------------------------------------------------------------------
// MtgManagerBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`MtgManager`].
///
/// Use [`MtgManager::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](MtgManagerBuilder::build).
pub struct MtgManagerBuilder {
    db_path: Option<PathBuf>,
    in_memory: bool,
    offline: bool,
    timeout: Duration,
    pricing: PricingConfig,
    scryfall_base: String,
    translate_base: String,
    price_source: Option<Arc<dyn PriceSource>>,
    listeners: Vec<Arc<dyn CollectionListener>>,
}

impl Default for MtgManagerBuilder {
    fn default() -> Self {
        Self {
            db_path: None,
            in_memory: false,
            offline: false,
            timeout: config::DEFAULT_TIMEOUT,
            pricing: PricingConfig::default(),
            scryfall_base: config::SCRYFALL_BASE.to_string(),
            translate_base: config::TRANSLATE_BASE.to_string(),
            price_source: None,
            listeners: Vec::new(),
        }
    }
}

impl MtgManagerBuilder {
    /// Use a specific database file.
    ///
    /// If not set, `collection.duckdb` under the platform data directory is
    /// used (e.g. `~/.local/share/mtg-manager` on Linux).
    pub fn db_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.db_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Keep everything in a throwaway in-memory database.
    pub fn in_memory(mut self) -> Self {
        self.in_memory = true;
        self
    }

    /// Enable or disable offline mode.
    ///
    /// When offline, Scryfall and translation calls fail with
    /// [`MtgManagerError::Offline`] and every price estimate takes the
    /// synthetic fallback. Defaults to `false`.
    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    /// Set the timeout for outbound HTTP calls. Defaults to 10 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn pricing(mut self, pricing: PricingConfig) -> Self {
        self.pricing = pricing;
        self
    }

    pub fn scryfall_base(mut self, url: impl Into<String>) -> Self {
        self.scryfall_base = url.into();
        self
    }

    pub fn translate_base(mut self, url: impl Into<String>) -> Self {
        self.translate_base = url.into();
        self
    }

    /// Price USD quotes from `source` instead of Scryfall.
    pub fn price_source(mut self, source: Arc<dyn PriceSource>) -> Self {
        self.price_source = Some(source);
        self
    }

    /// Register a listener called after every collection mutation.
    pub fn listener(mut self, listener: Arc<dyn CollectionListener>) -> Self {
        self.listeners.push(listener);
        self
    }

    /// Open the database and wire up the HTTP clients.
    ///
    /// No network call is made here; clients connect lazily on first use.
    pub fn build(self) -> Result<MtgManager> {
        let conn = if self.in_memory {
            Connection::open_in_memory()?
        } else {
            let path = self
                .db_path
                .unwrap_or_else(|| config::default_data_dir().join(config::DATABASE_FILE));
            Connection::open(path)?
        };

        let scryfall = Arc::new(ScryfallClient::new(
            self.scryfall_base,
            self.offline,
            self.timeout,
        ));
        let source: Arc<dyn PriceSource> = match self.price_source {
            Some(source) => source,
            None => scryfall.clone() as Arc<dyn PriceSource>,
        };
        let translator = Translator::new(self.translate_base, self.offline, self.timeout);
        let meta = queries::MetaQuery::load()?;

        Ok(MtgManager {
            conn,
            scryfall,
            estimator: PriceEstimator::new(source, self.pricing),
            translator,
            meta,
            listeners: self.listeners,
            offline: self.offline,
        })
    }
}

// ---------------------------------------------------------------------------
// MtgManager
// ---------------------------------------------------------------------------

/// The main entry point.
///
/// Owns the [`Connection`] and the HTTP clients and exposes domain query
/// interfaces as lightweight borrowing wrappers.
///
/// Created via [`MtgManager::builder()`].
pub struct MtgManager {
    conn: Connection,
    scryfall: Arc<ScryfallClient>,
    estimator: PriceEstimator,
    translator: Translator,
    meta: queries::MetaQuery,
    listeners: Vec<Arc<dyn CollectionListener>>,
    offline: bool,
}

impl MtgManager {
    pub fn builder() -> MtgManagerBuilder {
        MtgManagerBuilder::default()
    }

    // -- Query accessors ---------------------------------------------------

    pub fn users(&self) -> queries::UserQuery<'_> {
        queries::UserQuery::new(&self.conn)
    }

    /// Access a user's collection. Mutations notify the registered listeners.
    pub fn collection(&self) -> queries::CollectionQuery<'_> {
        queries::CollectionQuery::new(&self.conn, &self.listeners)
    }

    pub fn decks(&self) -> queries::DeckQuery<'_> {
        queries::DeckQuery::new(&self.conn)
    }

    /// Scryfall card lookups.
    pub fn cards(&self) -> &ScryfallClient {
        &self.scryfall
    }

    pub fn prices(&self) -> &PriceEstimator {
        &self.estimator
    }

    pub fn translator(&self) -> &Translator {
        &self.translator
    }

    /// The bundled tournament meta snapshot.
    pub fn meta(&self) -> &queries::MetaQuery {
        &self.meta
    }

    // -- Utility -----------------------------------------------------------

    /// Storage liveness check. Fails if the user table cannot be read.
    pub fn health(&self) -> Result<Health> {
        let user_count = self.users().count()?;
        Ok(Health {
            status: "ok".to_string(),
            user_count,
            version: env!("CARGO_PKG_VERSION").to_string(),
        })
    }

    /// Return a reference to the underlying [`Connection`] for advanced usage.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for MtgManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pricing = self.estimator.config();
        write!(
            f,
            "MtgManager(scryfall={}, offline={}, rate={}, margin={}, listeners={})",
            self.scryfall.base_url(),
            self.offline,
            pricing.conversion_rate,
            pricing.margin_multiplier,
            self.listeners.len()
        )
    }
}
