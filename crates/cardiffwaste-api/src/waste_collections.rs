//! Per-property client with a last-known-good snapshot.

use cardiffwaste_core::{ClientConfig, CollectionSnapshot, Uprn};

use crate::client::CardiffApi;
use crate::error::WasteError;
use crate::normalize::normalize;
use crate::search::AddressSearch;
use crate::types::RawCollections;
use crate::user_agent::resolve_user_agent;

/// Result of [`WasteCollections::get_next_collections`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionOutcome {
    /// Normalized from a live 200 response. Also stored as the cached
    /// snapshot.
    Fresh(CollectionSnapshot),
    /// The collections endpoint answered with a non-200 status. The cache is
    /// left untouched.
    NoData { status: u16 },
    /// The live fetch timed out; this is the last known good snapshot (empty
    /// if no fetch has succeeded yet).
    Cached(CollectionSnapshot),
}

impl CollectionOutcome {
    /// The snapshot carried by this outcome; empty for
    /// [`CollectionOutcome::NoData`].
    #[must_use]
    pub fn into_snapshot(self) -> CollectionSnapshot {
        match self {
            CollectionOutcome::Fresh(snapshot) | CollectionOutcome::Cached(snapshot) => snapshot,
            CollectionOutcome::NoData { .. } => CollectionSnapshot::new(),
        }
    }

    #[must_use]
    pub fn is_fresh(&self) -> bool {
        matches!(self, CollectionOutcome::Fresh(_))
    }
}

/// Collection schedule client for a single property.
///
/// The UPRN and user agent are fixed at construction. Each call fetches a new
/// token and session; only the last successful snapshot is kept between
/// calls.
pub struct WasteCollections {
    uprn: Uprn,
    user_agent: String,
    api: CardiffApi,
    last_known_good: CollectionSnapshot,
}

impl WasteCollections {
    /// Creates a client for `uprn` against the production endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`WasteError::Http`] if the HTTP client cannot be constructed.
    pub fn new(uprn: u64) -> Result<Self, WasteError> {
        Self::with_config(uprn, ClientConfig::default())
    }

    /// # Errors
    ///
    /// Returns [`WasteError::Http`] if the HTTP client cannot be constructed.
    pub fn with_config(uprn: u64, config: ClientConfig) -> Result<Self, WasteError> {
        Self::with_uprn(Uprn::new(uprn), config)
    }

    /// Builds a client from an already validated [`Uprn`].
    ///
    /// # Errors
    ///
    /// Returns [`WasteError::Http`] if the HTTP client cannot be constructed.
    pub fn with_uprn(uprn: Uprn, config: ClientConfig) -> Result<Self, WasteError> {
        let user_agent = resolve_user_agent(&config);
        let api = CardiffApi::new(config)?;
        Ok(Self {
            uprn,
            user_agent,
            api,
            last_known_good: CollectionSnapshot::new(),
        })
    }

    /// Parses `uprn` (e.g. `"12345"`) before building the client.
    ///
    /// # Errors
    ///
    /// - [`WasteError::Config`] if `uprn` is not a non-negative integer.
    /// - [`WasteError::Http`] if the HTTP client cannot be constructed.
    pub fn from_uprn_str(uprn: &str, config: ClientConfig) -> Result<Self, WasteError> {
        let uprn: Uprn = uprn.parse()?;
        Self::with_uprn(uprn, config)
    }

    #[must_use]
    pub fn uprn(&self) -> Uprn {
        self.uprn
    }

    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// The snapshot returned when a live fetch times out.
    #[must_use]
    pub fn last_known_good(&self) -> &CollectionSnapshot {
        &self.last_known_good
    }

    /// Fetches raw collection weeks without normalizing or caching them.
    ///
    /// # Errors
    ///
    /// See [`CardiffApi::fetch_raw`].
    pub async fn get_raw_collections(&self) -> Result<RawCollections, WasteError> {
        self.api.fetch_raw(self.uprn, &self.user_agent).await
    }

    /// # Errors
    ///
    /// See [`CardiffApi::check_valid_uprn`].
    pub async fn check_valid_uprn(&self) -> Result<bool, WasteError> {
        self.api.check_valid_uprn(self.uprn, &self.user_agent).await
    }

    /// Fetches and normalizes the next collection per bin type.
    ///
    /// A timeout anywhere in the token → preflight → fetch sequence returns
    /// the last known good snapshot as [`CollectionOutcome::Cached`] instead
    /// of an error.
    ///
    /// # Errors
    ///
    /// Every [`CardiffApi::fetch_raw`] error except [`WasteError::Timeout`].
    pub async fn get_next_collections(&mut self) -> Result<CollectionOutcome, WasteError> {
        let raw = match self.get_raw_collections().await {
            Ok(raw) => raw,
            Err(WasteError::Timeout { stage, .. }) => {
                tracing::warn!(
                    uprn = %self.uprn,
                    %stage,
                    cached_bins = self.last_known_good.len(),
                    "collections fetch timed out; returning last known good snapshot"
                );
                return Ok(CollectionOutcome::Cached(self.last_known_good.clone()));
            }
            Err(e) => return Err(e),
        };

        if !raw.is_ok() {
            return Ok(CollectionOutcome::NoData { status: raw.status });
        }

        let snapshot = normalize(&raw.weeks);
        self.last_known_good = snapshot.clone();
        Ok(CollectionOutcome::Fresh(snapshot))
    }

    /// Address search using this client's endpoints and timeouts.
    ///
    /// Uses the configured user agent, or a fresh random desktop agent per
    /// call.
    ///
    /// # Errors
    ///
    /// See [`CardiffApi::search_address`].
    pub async fn search_address(&self, term: &str) -> Result<AddressSearch, WasteError> {
        let user_agent = resolve_user_agent(self.api.config());
        self.api.search_address(term, &user_agent).await
    }
}
