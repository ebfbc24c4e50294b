//! HTTP client for Cardiff Council's waste collection API.
//!
//! Every collection or search call runs the same sequence: fetch a bearer
//! token from the SOAP authentication service, open a cookie-bearing session
//! with an OPTIONS preflight, then send the authenticated request on that
//! session. Tokens and sessions live for one call and are then dropped.

use cardiffwaste_core::ClientConfig;
use reqwest::Client;

use crate::error::WasteError;

/// Stateless client for the council's token, collections and address search
/// endpoints.
///
/// Use [`CardiffApi::new`] with [`ClientConfig::default`] for production, or
/// [`ClientConfig::with_base_url`] to point at a mock server in tests.
pub struct CardiffApi {
    pub(crate) config: ClientConfig,
    /// Cookie-less client used for token requests.
    pub(crate) token_client: Client,
}

impl CardiffApi {
    /// # Errors
    ///
    /// Returns [`WasteError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(config: ClientConfig) -> Result<Self, WasteError> {
        let token_client = Client::builder()
            .timeout(config.request_timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(|e| WasteError::Http {
                stage: crate::RequestStage::Token,
                source: e,
            })?;

        Ok(Self {
            config,
            token_client,
        })
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}
