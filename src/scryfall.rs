//! Scryfall card database client.
//!
//! Blocking HTTP lookups (search, autocomplete, by-id) parsed into typed
//! [`ScryfallCard`] records. The client is also the authoritative USD
//! [`PriceSource`] for the price estimator.

use once_cell::sync::OnceCell;
use reqwest::blocking::{Client, Response};
use reqwest::{StatusCode, Url};
use std::time::Duration;

use crate::error::{MtgManagerError, Result};
use crate::http;
use crate::models::{PriceLookup, ScryfallCard, ScryfallCatalog, ScryfallList};
use crate::pricing::PriceSource;

/// Autocomplete is skipped for prefixes this short or shorter.
pub const MIN_AUTOCOMPLETE_LEN: usize = 2;

/// Blocking client for the Scryfall REST API.
pub struct ScryfallClient {
    base_url: String,
    offline: bool,
    timeout: Duration,
    client: OnceCell<Client>,
}

impl ScryfallClient {
    /// Create a client against `base_url` (normally [`crate::config::SCRYFALL_BASE`]).
    pub fn new(base_url: impl Into<String>, offline: bool, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            offline,
            timeout,
            client: OnceCell::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Lazy HTTP client, created on first use.
    fn client(&self) -> Result<&Client> {
        http::lazy_client(&self.client, self.offline, self.timeout, "Scryfall lookup")
    }

    /// URL of `base_url` extended with `segments`, each percent-encoded as
    /// a single path segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            MtgManagerError::InvalidArgument(format!("Bad Scryfall base URL {}: {e}", self.base_url))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                MtgManagerError::InvalidArgument(format!(
                    "Scryfall base URL {} cannot take a path",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Request URL for a by-id lookup. `/`, `?` and `#` in the id stay
    /// inside the path segment.
    pub fn card_url(&self, id: &str) -> Result<Url> {
        self.endpoint(&["cards", id.trim()])
    }

    fn get(&self, url: Url, query: &[(&str, &str)]) -> Result<Option<Response>> {
        log::debug!("GET {url} {query:?}");
        let resp = self.client()?.get(url).query(query).send()?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Ok(Some(resp.error_for_status()?))
    }

    /// Fetch one card by Scryfall id. Unknown ids yield `None`.
    pub fn get_by_id(&self, id: &str) -> Result<Option<ScryfallCard>> {
        let id = id.trim();
        if id.is_empty() {
            return Err(MtgManagerError::InvalidArgument(
                "Scryfall id must not be empty".to_string(),
            ));
        }
        match self.get(self.card_url(id)?, &[])? {
            Some(resp) => Ok(Some(resp.json()?)),
            None => Ok(None),
        }
    }

    /// Full-text search ordered by name. No matches yield an empty list.
    pub fn search(&self, query: &str) -> Result<Vec<ScryfallCard>> {
        self.search_with(query, &[("order", "name")])
    }

    /// Most recently released printing whose name matches `name`.
    pub fn first_by_name(&self, name: &str) -> Result<Option<ScryfallCard>> {
        let cards = self.search_with(
            name,
            &[("unique", "cards"), ("order", "released"), ("dir", "desc")],
        )?;
        Ok(cards.into_iter().next())
    }

    fn search_with(&self, query: &str, extra: &[(&str, &str)]) -> Result<Vec<ScryfallCard>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        let mut params = vec![("q", query)];
        params.extend_from_slice(extra);
        match self.get(self.endpoint(&["cards", "search"])?, &params)? {
            Some(resp) => {
                let list: ScryfallList = resp.json()?;
                log::info!("Scryfall search '{query}' returned {} cards", list.data.len());
                Ok(list.data)
            }
            None => Ok(Vec::new()),
        }
    }

    /// Card name suggestions for a typed prefix.
    pub fn autocomplete(&self, prefix: &str) -> Result<Vec<String>> {
        let prefix = prefix.trim();
        if prefix.chars().count() <= MIN_AUTOCOMPLETE_LEN {
            return Ok(Vec::new());
        }
        match self.get(self.endpoint(&["cards", "autocomplete"])?, &[("q", prefix)])? {
            Some(resp) => {
                let catalog: ScryfallCatalog = resp.json()?;
                Ok(catalog.data)
            }
            None => Ok(Vec::new()),
        }
    }
}

impl PriceSource for ScryfallClient {
    fn usd_price(&self, lookup: &PriceLookup) -> Result<Option<f64>> {
        let card = match (lookup.scryfall_id(), lookup.name()) {
            (Some(id), _) => self.get_by_id(id)?,
            (None, Some(name)) => self.first_by_name(name)?,
            (None, None) => None,
        };
        Ok(card.and_then(|c| c.prices.usd))
    }
}
