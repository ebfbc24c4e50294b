//! Collections endpoint: raw fetch and UPRN existence probe.

use cardiffwaste_core::Uprn;

use crate::client::CardiffApi;
use crate::endpoints::{with_headers, CollectionsRequest, API_HEADERS, COLLECTIONS_MARKER};
use crate::error::{classify, RequestStage, WasteError};
use crate::types::{CollectionsResponse, RawCollections};

impl CardiffApi {
    /// Fetches the raw collection weeks for `uprn`.
    ///
    /// A non-200 status is not an error: it comes back as
    /// [`RawCollections::status`] with no weeks.
    ///
    /// # Errors
    ///
    /// - [`WasteError::Timeout`] if the token, preflight or collections
    ///   request times out.
    /// - [`WasteError::Connection`] / [`WasteError::Http`] on other transport
    ///   failures.
    /// - [`WasteError::Decode`] if a 200 body lacks a valid
    ///   `collectionWeeks` array, or the token response is malformed.
    pub async fn fetch_raw(
        &self,
        uprn: Uprn,
        user_agent: &str,
    ) -> Result<RawCollections, WasteError> {
        let (status, body) = self.post_collections(uprn, user_agent).await?;

        if status != 200 {
            tracing::debug!(%uprn, status, "collections request returned no data");
            return Ok(RawCollections {
                weeks: Vec::new(),
                status,
            });
        }

        let parsed: CollectionsResponse = serde_json::from_str(&body)
            .map_err(|e| WasteError::decode(format!("collections for uprn {uprn}"), e))?;

        tracing::debug!(%uprn, weeks = parsed.collection_weeks.len(), "collections fetched");
        Ok(RawCollections {
            weeks: parsed.collection_weeks,
            status,
        })
    }

    /// Reports whether `uprn` has collection data: status 200 and a body
    /// mentioning `collectionWeeks`. The body is not parsed.
    ///
    /// # Errors
    ///
    /// Same transport and token errors as [`CardiffApi::fetch_raw`].
    pub async fn check_valid_uprn(&self, uprn: Uprn, user_agent: &str) -> Result<bool, WasteError> {
        let (status, body) = self.post_collections(uprn, user_agent).await?;
        Ok(status == 200 && body.contains(COLLECTIONS_MARKER))
    }

    async fn post_collections(
        &self,
        uprn: Uprn,
        user_agent: &str,
    ) -> Result<(u16, String), WasteError> {
        let subject = uprn.to_string();
        let endpoint = self.config.collections_url.as_str();

        let token = self.request_token(user_agent, &subject).await?;
        let session = self.preflight(user_agent, endpoint, &subject).await?;

        let request = session
            .client
            .post(endpoint)
            .header(reqwest::header::AUTHORIZATION, token.authorization());
        let response = with_headers(request, API_HEADERS)
            .json(&CollectionsRequest::new(uprn))
            .send()
            .await
            .map_err(|e| classify(RequestStage::Collections, &subject, e))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| classify(RequestStage::Collections, &subject, e))?;

        Ok((status, body))
    }
}
