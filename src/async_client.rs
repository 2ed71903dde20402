//! Async wrapper around [`MtgManager`] for use in async runtimes (Tokio, etc.).
//!
//! Runs manager operations on the blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free.
//!
//! # Example
//!
//! ```no_run
//! use mtg_manager::{AsyncMtgManager, MtgManager, PriceLookup};
//!
//! #[tokio::main]
//! async fn main() {
//!     let manager = AsyncMtgManager::build(MtgManager::builder()).await.unwrap();
//!
//!     // Run any sync method via closure
//!     let user = manager.run(|m| m.users().find_by_email("player@example.com")).await.unwrap();
//!
//!     // Price a batch of cards concurrently
//!     let prices = manager
//!         .estimate_prices(vec![PriceLookup::by_name("Lightning Bolt")])
//!         .await;
//! }
//! ```

use std::sync::{Arc, Mutex};

use crate::error::{MtgManagerError, Result};
use crate::models::{PriceEstimate, PriceLookup};
use crate::pricing::PriceEstimator;
use crate::{MtgManager, MtgManagerBuilder};

/// Async wrapper around [`MtgManager`].
///
/// The manager is protected by a [`Mutex`] since the DuckDB connection is
/// not `Sync`. Price estimation does not touch the database and runs
/// outside the lock.
pub struct AsyncMtgManager {
    inner: Arc<Mutex<MtgManager>>,
    estimator: PriceEstimator,
}

impl AsyncMtgManager {
    /// Wrap an already built manager.
    pub fn new(manager: MtgManager) -> Self {
        let estimator = manager.prices().clone();
        Self {
            inner: Arc::new(Mutex::new(manager)),
            estimator,
        }
    }

    /// Build the manager on the blocking thread pool.
    pub async fn build(builder: MtgManagerBuilder) -> Result<Self> {
        let manager = tokio::task::spawn_blocking(move || builder.build())
            .await
            .map_err(join_error)??;
        Ok(Self::new(manager))
    }

    /// Run a sync operation on the blocking thread pool.
    ///
    /// The closure receives an `&MtgManager` and should return a `Result<T>`.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&MtgManager) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let manager = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let guard = manager
                .lock()
                .map_err(|_| MtgManagerError::InvalidArgument("Manager lock poisoned".into()))?;
            f(&guard)
        })
        .await
        .map_err(join_error)?
    }

    pub async fn estimate_price(&self, lookup: PriceLookup) -> Result<PriceEstimate> {
        let estimator = self.estimator.clone();
        tokio::task::spawn_blocking(move || estimator.estimate(&lookup))
            .await
            .map_err(join_error)?
    }

    /// Estimate many prices concurrently, one task per lookup.
    ///
    /// Each estimate is paired with the lookup it answers, in request order.
    /// Lookups that fail (no name or id) are logged and left out.
    pub async fn estimate_prices(&self, lookups: Vec<PriceLookup>) -> Vec<(PriceLookup, PriceEstimate)> {
        let handles: Vec<_> = lookups
            .into_iter()
            .map(|lookup| {
                let estimator = self.estimator.clone();
                tokio::task::spawn_blocking(move || {
                    estimator.estimate(&lookup).map(|estimate| (lookup, estimate))
                })
            })
            .collect();

        let mut out = Vec::with_capacity(handles.len());
        for handle in handles {
            match handle.await {
                Ok(Ok(pair)) => out.push(pair),
                Ok(Err(e)) => log::warn!("Skipping price lookup: {e}"),
                Err(e) => log::warn!("Price task failed: {e}"),
            }
        }
        out
    }
}

fn join_error(e: tokio::task::JoinError) -> MtgManagerError {
    MtgManagerError::InvalidArgument(format!("Task join error: {e}"))
}
