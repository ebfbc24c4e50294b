//! Bearer token acquisition from the SOAP authentication service.

use std::fmt;

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::client::CardiffApi;
use crate::endpoints::{with_headers, GET_JWT_ENVELOPE, GET_JWT_RESULT_ELEMENT, TOKEN_HEADERS};
use crate::error::{classify, RequestStage, WasteError};
use crate::types::TokenPayload;

/// Short-lived credential for the collections and address search endpoints.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub(crate) fn authorization(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken([redacted])")
    }
}

impl CardiffApi {
    /// Requests a fresh bearer token.
    ///
    /// # Errors
    ///
    /// - [`WasteError::Connection`] if the token endpoint cannot be reached.
    /// - [`WasteError::Timeout`] if the request times out.
    /// - [`WasteError::Decode`] if the XML or embedded JSON cannot be parsed
    ///   or lacks `access_token`.
    pub async fn acquire_token(&self, user_agent: &str) -> Result<BearerToken, WasteError> {
        self.request_token(user_agent, &self.config.token_url).await
    }

    /// `subject` is reported in [`WasteError::Timeout`] so a timeout while
    /// fetching a token for a collection or search names what it was for.
    pub(crate) async fn request_token(
        &self,
        user_agent: &str,
        subject: &str,
    ) -> Result<BearerToken, WasteError> {
        let request = self
            .token_client
            .post(&self.config.token_url)
            .header(reqwest::header::USER_AGENT, user_agent);
        let response = with_headers(request, TOKEN_HEADERS)
            .body(GET_JWT_ENVELOPE)
            .send()
            .await
            .map_err(|e| classify(RequestStage::Token, subject, e))?;

        tracing::debug!(status = response.status().as_u16(), "token response received");

        let body = response
            .text()
            .await
            .map_err(|e| classify(RequestStage::Token, subject, e))?;

        extract_access_token(&body)
    }
}

/// Pulls `access_token` out of the JSON text of the `GetJWTResult` element.
pub(crate) fn extract_access_token(xml: &str) -> Result<BearerToken, WasteError> {
    let payload = extract_element_text(xml, GET_JWT_RESULT_ELEMENT)?
        .ok_or_else(|| WasteError::decode("token response", "missing GetJWTResult element"))?;

    let token: TokenPayload = serde_json::from_str(&payload)
        .map_err(|e| WasteError::decode("GetJWTResult payload", e))?;

    if token.access_token.is_empty() {
        return Err(WasteError::decode(
            "GetJWTResult payload",
            "access_token is empty",
        ));
    }
    Ok(BearerToken(token.access_token))
}

/// Returns the text of the first element whose local name is `element`, or
/// `None` if no such element exists.
fn extract_element_text(xml: &str, element: &str) -> Result<Option<String>, WasteError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut inside = false;
    let mut text = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.local_name().as_ref() == element.as_bytes() => {
                inside = true;
            }
            Ok(Event::Empty(e)) if e.local_name().as_ref() == element.as_bytes() => {
                return Ok(Some(String::new()));
            }
            Ok(Event::End(e)) if inside && e.local_name().as_ref() == element.as_bytes() => {
                return Ok(Some(text));
            }
            Ok(Event::Text(e)) if inside => {
                let chunk = e
                    .unescape()
                    .map_err(|err| WasteError::decode("token response", err))?;
                text.push_str(&chunk);
            }
            Ok(Event::CData(e)) if inside => {
                text.push_str(&String::from_utf8_lossy(e.as_ref()));
            }
            Ok(Event::Eof) => return Ok(None),
            Err(e) => return Err(WasteError::decode("token response", e)),
            _ => {}
        }
    }
}
