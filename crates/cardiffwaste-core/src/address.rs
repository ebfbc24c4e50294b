use std::collections::BTreeMap;

use crate::Uprn;

/// Address search results: property identifier to full address label.
pub type AddressMatches = BTreeMap<Uprn, String>;
