use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("invalid UPRN \"{value}\": {reason}")]
    InvalidUprn { value: String, reason: String },
}
