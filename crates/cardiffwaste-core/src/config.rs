pub use crate::client_config::ClientConfig;
use crate::client_config::{DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_REQUEST_TIMEOUT_SECS};
use crate::ConfigError;

/// Load client configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is present but its value is invalid.
pub fn load_config() -> Result<ClientConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_config_from_env()
}

/// Load client configuration from environment variables already in the process.
///
/// Unlike [`load_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is present but its value is invalid.
pub fn load_config_from_env() -> Result<ClientConfig, ConfigError> {
    build_config(|key| std::env::var(key))
}

/// Build client configuration using the provided env-var lookup function.
///
/// Every variable is optional; unset variables fall back to the production
/// defaults from [`ClientConfig::default`].
fn build_config<F>(lookup: F) -> Result<ClientConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let defaults = ClientConfig::default();

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_secs = |var: &str, default: u64| -> Result<u64, ConfigError> {
        let Ok(raw) = lookup(var) else {
            return Ok(default);
        };
        let secs = raw
            .trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })?;
        if secs == 0 {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "timeout must be greater than zero".to_string(),
            });
        }
        Ok(secs)
    };

    let parse_bool = |var: &str, default: bool| -> Result<bool, ConfigError> {
        let Ok(raw) = lookup(var) else {
            return Ok(default);
        };
        match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            other => Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("expected a boolean, got \"{other}\""),
            }),
        }
    };

    let token_url = or_default("CARDIFFWASTE_TOKEN_URL", &defaults.token_url);
    let collections_url = or_default("CARDIFFWASTE_COLLECTIONS_URL", &defaults.collections_url);
    let address_search_url = or_default(
        "CARDIFFWASTE_ADDRESS_SEARCH_URL",
        &defaults.address_search_url,
    );

    let request_timeout_secs = parse_secs(
        "CARDIFFWASTE_REQUEST_TIMEOUT_SECS",
        DEFAULT_REQUEST_TIMEOUT_SECS,
    )?;
    let connect_timeout_secs = parse_secs(
        "CARDIFFWASTE_CONNECT_TIMEOUT_SECS",
        DEFAULT_CONNECT_TIMEOUT_SECS,
    )?;

    let user_agent = lookup("CARDIFFWASTE_USER_AGENT")
        .ok()
        .map(|ua| ua.trim().to_string())
        .filter(|ua| !ua.is_empty());

    let strict_preflight = parse_bool("CARDIFFWASTE_STRICT_PREFLIGHT", false)?;

    Ok(ClientConfig {
        token_url,
        collections_url,
        address_search_url,
        request_timeout_secs,
        connect_timeout_secs,
        user_agent,
        strict_preflight,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    #[test]
    fn build_config_with_empty_env_uses_production_defaults() {
        let map: HashMap<&str, &str> = HashMap::new();
        let cfg = build_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg, ClientConfig::default());
        assert_eq!(cfg.request_timeout_secs, 30);
        assert_eq!(cfg.connect_timeout_secs, 10);
        assert!(cfg.user_agent.is_none());
        assert!(!cfg.strict_preflight);
    }

    #[test]
    fn build_config_reads_overrides() {
        let mut map = HashMap::new();
        map.insert("CARDIFFWASTE_COLLECTIONS_URL", "http://localhost:9000/waste");
        map.insert("CARDIFFWASTE_REQUEST_TIMEOUT_SECS", "5");
        map.insert("CARDIFFWASTE_USER_AGENT", "test-agent/1.0");
        map.insert("CARDIFFWASTE_STRICT_PREFLIGHT", "true");
        let cfg = build_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.collections_url, "http://localhost:9000/waste");
        assert_eq!(cfg.request_timeout_secs, 5);
        assert_eq!(cfg.user_agent.as_deref(), Some("test-agent/1.0"));
        assert!(cfg.strict_preflight);
    }

    #[test]
    fn build_config_fails_with_invalid_timeout() {
        let mut map = HashMap::new();
        map.insert("CARDIFFWASTE_REQUEST_TIMEOUT_SECS", "soon");
        let result = build_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CARDIFFWASTE_REQUEST_TIMEOUT_SECS"),
            "expected InvalidEnvVar(CARDIFFWASTE_REQUEST_TIMEOUT_SECS), got: {result:?}"
        );
    }

    #[test]
    fn build_config_rejects_zero_timeout() {
        let mut map = HashMap::new();
        map.insert("CARDIFFWASTE_CONNECT_TIMEOUT_SECS", "0");
        let result = build_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CARDIFFWASTE_CONNECT_TIMEOUT_SECS"),
            "expected InvalidEnvVar(CARDIFFWASTE_CONNECT_TIMEOUT_SECS), got: {result:?}"
        );
    }

    #[test]
    fn build_config_fails_with_invalid_bool() {
        let mut map = HashMap::new();
        map.insert("CARDIFFWASTE_STRICT_PREFLIGHT", "maybe");
        let result = build_config(lookup_from_map(&map));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CARDIFFWASTE_STRICT_PREFLIGHT"
        ));
    }

    #[test]
    fn blank_user_agent_is_treated_as_unset() {
        let mut map = HashMap::new();
        map.insert("CARDIFFWASTE_USER_AGENT", "   ");
        let cfg = build_config(lookup_from_map(&map)).unwrap();
        assert!(cfg.user_agent.is_none());
    }

    #[test]
    fn with_base_url_rebases_every_endpoint() {
        let cfg = ClientConfig::with_base_url("http://127.0.0.1:4000/");
        assert_eq!(
            cfg.token_url,
            "http://127.0.0.1:4000/AuthenticationWebService.asmx?op=GetJWT"
        );
        assert_eq!(
            cfg.collections_url,
            "http://127.0.0.1:4000/WasteManagement/api/WasteCollection"
        );
        assert_eq!(
            cfg.address_search_url,
            "http://127.0.0.1:4000/AddressSearchAPI/api/AddressSearch"
        );
    }
}
