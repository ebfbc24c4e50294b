//! Free-text address search.

use cardiffwaste_core::{AddressMatches, ClientConfig};
use reqwest::StatusCode;

use crate::client::CardiffApi;
use crate::endpoints::{with_headers, AddressSearchRequest, API_HEADERS};
use crate::error::{classify, RequestStage, WasteError};
use crate::types::AddressRecord;
use crate::user_agent::resolve_user_agent;

/// Result of an address search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressSearch {
    /// Matching properties, keyed by UPRN.
    Matches(AddressMatches),
    /// The upstream found nothing for `term`. Not a failure; callers may
    /// treat it as an empty result.
    EmptyMatches { term: String },
}

impl AddressSearch {
    /// The matches, or an empty map for [`AddressSearch::EmptyMatches`].
    #[must_use]
    pub fn into_matches(self) -> AddressMatches {
        match self {
            AddressSearch::Matches(matches) => matches,
            AddressSearch::EmptyMatches { .. } => AddressMatches::new(),
        }
    }
}

/// Searches for `term` with a one-off client built from `config`.
///
/// Uses the configured user agent, or a random desktop agent for this call.
///
/// # Errors
///
/// See [`CardiffApi::search_address`]. Also returns [`WasteError::Http`] if
/// the client cannot be constructed.
pub async fn search_address(config: &ClientConfig, term: &str) -> Result<AddressSearch, WasteError> {
    let api = CardiffApi::new(config.clone())?;
    let user_agent = resolve_user_agent(config);
    api.search_address(term, &user_agent).await
}

impl CardiffApi {
    /// Resolves a free-text address into candidate UPRNs.
    ///
    /// Duplicate UPRNs in the response are not deduplicated upstream; the
    /// last label seen for a UPRN wins.
    ///
    /// # Errors
    ///
    /// - [`WasteError::InvalidSearchTerm`] if `term` is blank.
    /// - [`WasteError::Timeout`] (carrying `term`) if any step times out.
    /// - [`WasteError::UnexpectedStatus`] for a non-2xx status other than 204.
    /// - [`WasteError::Decode`] if the body is not an array of
    ///   `{uprn, fullAddress}` records.
    /// - [`WasteError::Connection`] / [`WasteError::Http`] on other transport
    ///   failures.
    pub async fn search_address(
        &self,
        term: &str,
        user_agent: &str,
    ) -> Result<AddressSearch, WasteError> {
        if term.trim().is_empty() {
            return Err(WasteError::InvalidSearchTerm);
        }
        let endpoint = self.config.address_search_url.as_str();

        let token = self.request_token(user_agent, term).await?;
        let session = self.preflight(user_agent, endpoint, term).await?;

        let request = session
            .client
            .post(endpoint)
            .header(reqwest::header::AUTHORIZATION, token.authorization());
        let response = with_headers(request, API_HEADERS)
            .json(&AddressSearchRequest { search_term: term })
            .send()
            .await
            .map_err(|e| classify(RequestStage::AddressSearch, term, e))?;

        let status = response.status();
        if status == StatusCode::NO_CONTENT {
            tracing::warn!(term, "address search returned no matches");
            return Ok(AddressSearch::EmptyMatches {
                term: term.to_string(),
            });
        }
        if !status.is_success() {
            return Err(WasteError::UnexpectedStatus {
                stage: RequestStage::AddressSearch,
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| classify(RequestStage::AddressSearch, term, e))?;
        let records: Vec<AddressRecord> = serde_json::from_str(&body)
            .map_err(|e| WasteError::decode(format!("address search for \"{term}\""), e))?;

        if records.is_empty() {
            tracing::warn!(term, "address search returned an empty list");
            return Ok(AddressSearch::EmptyMatches {
                term: term.to_string(),
            });
        }

        let mut matches = AddressMatches::new();
        for record in records {
            matches.insert(record.uprn, record.full_address);
        }
        tracing::debug!(term, matches = matches.len(), "address search complete");
        Ok(AddressSearch::Matches(matches))
    }
}
