//! Client for Cardiff Council's household waste collection API.

pub mod client;
pub mod collections;
pub mod endpoints;
pub mod error;
pub mod normalize;
pub mod search;
pub mod session;
pub mod token;
pub mod types;
pub mod user_agent;
pub mod waste_collections;

pub use cardiffwaste_core::{
    AddressMatches, BinCollection, ClientConfig, CollectionSnapshot, CollectionType, Uprn,
};
pub use client::CardiffApi;
pub use error::{RequestStage, WasteError};
pub use normalize::{normalize, normalize_response};
pub use search::{search_address, AddressSearch};
pub use session::Session;
pub use token::BearerToken;
pub use types::{RawBin, RawCollections, RawWeek};
pub use waste_collections::{CollectionOutcome, WasteCollections};
