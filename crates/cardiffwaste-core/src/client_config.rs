use std::time::Duration;

pub const DEFAULT_TOKEN_URL: &str =
    "https://authwebservice.cardiff.gov.uk/AuthenticationWebService.asmx?op=GetJWT";
pub const DEFAULT_COLLECTIONS_URL: &str =
    "https://api.cardiff.gov.uk/WasteManagement/api/WasteCollection";
pub const DEFAULT_ADDRESS_SEARCH_URL: &str =
    "https://api.cardiff.gov.uk/AddressSearchAPI/api/AddressSearch";

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Endpoints, timeouts and identity used by the Cardiff API client.
///
/// [`ClientConfig::default`] points at the production council endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub token_url: String,
    pub collections_url: String,
    pub address_search_url: String,
    /// Applied to every request: token, preflight, search and collections.
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
    /// Fixed `User-Agent`. `None` picks a random desktop agent.
    pub user_agent: Option<String>,
    /// Propagate preflight transport failures instead of logging them.
    pub strict_preflight: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            token_url: DEFAULT_TOKEN_URL.to_string(),
            collections_url: DEFAULT_COLLECTIONS_URL.to_string(),
            address_search_url: DEFAULT_ADDRESS_SEARCH_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            user_agent: None,
            strict_preflight: false,
        }
    }
}

impl ClientConfig {
    /// Production paths rebased onto `base_url` (a mock server or proxy).
    #[must_use]
    pub fn with_base_url(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            token_url: format!("{base}/AuthenticationWebService.asmx?op=GetJWT"),
            collections_url: format!("{base}/WasteManagement/api/WasteCollection"),
            address_search_url: format!("{base}/AddressSearchAPI/api/AddressSearch"),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    #[must_use]
    pub fn with_request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn with_strict_preflight(mut self, strict: bool) -> Self {
        self.strict_preflight = strict;
        self
    }
}
