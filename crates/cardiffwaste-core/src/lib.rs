pub mod address;
pub mod client_config;
pub mod collection;
pub mod config;
pub mod error;
pub mod uprn;

pub use address::AddressMatches;
pub use collection::{BinCollection, CollectionSnapshot, CollectionType};
pub use config::{load_config, load_config_from_env, ClientConfig};
pub use error::ConfigError;
pub use uprn::Uprn;
