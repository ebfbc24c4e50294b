//! Normalized waste-collection records.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// How a collection relates to the regular schedule.
///
/// The upstream reports `Standard` and `Moved`; anything else is kept as the
/// lowercased upstream value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CollectionType {
    Scheduled,
    Rescheduled,
    Other(String),
}

impl CollectionType {
    /// Maps an upstream `collectionType` value onto a [`CollectionType`].
    #[must_use]
    pub fn from_upstream(raw: &str) -> Self {
        let lowered = raw.to_lowercase();
        match lowered.as_str() {
            "standard" => Self::Scheduled,
            "moved" => Self::Rescheduled,
            _ => Self::Other(lowered),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Rescheduled => "rescheduled",
            Self::Other(s) => s,
        }
    }
}

impl fmt::Display for CollectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for CollectionType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// The next collection for one bin type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BinCollection {
    pub collection_date: NaiveDate,
    pub collection_type: CollectionType,
    pub image_url: String,
    /// When this record was produced from a live response.
    pub observed_at: DateTime<Utc>,
}

impl BinCollection {
    /// Compares every field except `observed_at`.
    #[must_use]
    pub fn same_collection(&self, other: &Self) -> bool {
        self.collection_date == other.collection_date
            && self.collection_type == other.collection_type
            && self.image_url == other.image_url
    }
}

/// One [`BinCollection`] per lowercased bin type, in first-seen order.
///
/// Serializes as a JSON object keyed by bin type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionSnapshot {
    entries: Vec<(String, BinCollection)>,
}

impl CollectionSnapshot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn get(&self, bin_type: &str) -> Option<&BinCollection> {
        self.entries
            .iter()
            .find(|(key, _)| key == bin_type)
            .map(|(_, record)| record)
    }

    #[must_use]
    pub fn contains(&self, bin_type: &str) -> bool {
        self.get(bin_type).is_some()
    }

    /// Inserts `record` under `bin_type` unless that type is already present.
    ///
    /// Returns `false` and leaves the snapshot unchanged when the type was
    /// already recorded.
    pub fn insert_if_absent(&mut self, bin_type: impl Into<String>, record: BinCollection) -> bool {
        self.insert_with(bin_type, || record)
    }

    /// Like [`CollectionSnapshot::insert_if_absent`], but only builds the
    /// record when `bin_type` is new.
    pub fn insert_with<F>(&mut self, bin_type: impl Into<String>, record: F) -> bool
    where
        F: FnOnce() -> BinCollection,
    {
        let bin_type = bin_type.into();
        if self.contains(&bin_type) {
            return false;
        }
        self.entries.push((bin_type, record()));
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BinCollection)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn bin_types(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Compares two snapshots ignoring every `observed_at` stamp.
    #[must_use]
    pub fn same_collections(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .entries
                .iter()
                .zip(&other.entries)
                .all(|((ka, va), (kb, vb))| ka == kb && va.same_collection(vb))
    }
}

impl IntoIterator for CollectionSnapshot {
    type Item = (String, BinCollection);
    type IntoIter = std::vec::IntoIter<(String, BinCollection)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Serialize for CollectionSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (bin_type, record) in &self.entries {
            map.serialize_entry(bin_type, record)?;
        }
        map.end()
    }
}
