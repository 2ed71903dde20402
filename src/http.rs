//! Shared blocking HTTP client setup for the Scryfall and MyMemory clients.

use once_cell::sync::OnceCell;
use reqwest::blocking::Client;
use std::time::Duration;

use crate::config;
use crate::error::{MtgManagerError, Result};

/// Return the client in `cell`, building it on first use.
///
/// Offline mode refuses before anything is built; `service` names the
/// caller in that error.
pub(crate) fn lazy_client<'a>(
    cell: &'a OnceCell<Client>,
    offline: bool,
    timeout: Duration,
    service: &str,
) -> Result<&'a Client> {
    if offline {
        return Err(MtgManagerError::Offline(format!(
            "{service} is disabled in offline mode"
        )));
    }
    cell.get_or_try_init(|| {
        Client::builder()
            .timeout(timeout)
            .user_agent(config::USER_AGENT)
            .build()
            .map_err(MtgManagerError::from)
    })
}
