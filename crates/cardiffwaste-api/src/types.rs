//! Upstream response types.

use cardiffwaste_core::Uprn;
use serde::{Deserialize, Deserializer};

/// Body of a successful collections response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionsResponse {
    pub collection_weeks: Vec<RawWeek>,
}

/// One scheduled pickup week, in the order the upstream returned it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawWeek {
    /// `YYYY-MM-DDTHH:MM:SS`.
    pub date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub bins: Vec<RawBin>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBin {
    #[serde(rename = "type")]
    pub bin_type: String,
    pub collection_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image_url: String,
}

/// Treats an explicit JSON `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Raw collection weeks plus the HTTP status they came with.
///
/// `weeks` is empty whenever `status` is not 200.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCollections {
    pub weeks: Vec<RawWeek>,
    pub status: u16,
}

impl RawCollections {
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// The JSON payload carried inside `GetJWTResult`.
#[derive(Deserialize)]
pub(crate) struct TokenPayload {
    pub access_token: String,
}

/// One entry of the address search response array.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AddressRecord {
    pub uprn: Uprn,
    pub full_address: String,
}
