//! Cookie-bearing sessions opened with a CORS preflight.

use reqwest::{Client, Method};

use crate::client::CardiffApi;
use crate::endpoints::{with_headers, PREFLIGHT_HEADERS};
use crate::error::{classify, RequestStage, WasteError};

/// An HTTP client whose cookie jar holds whatever the preflight set.
///
/// Valid for one logical operation; never reused across calls.
pub struct Session {
    pub(crate) client: Client,
}

impl CardiffApi {
    /// Opens a session against `endpoint` by sending an OPTIONS preflight.
    ///
    /// The preflight is best-effort: its status and body are ignored, and a
    /// transport failure is only logged unless
    /// [`ClientConfig::strict_preflight`](cardiffwaste_core::ClientConfig::strict_preflight)
    /// is set.
    ///
    /// # Errors
    ///
    /// - [`WasteError::Http`] if the session client cannot be constructed.
    /// - With strict preflight only: [`WasteError::Connection`],
    ///   [`WasteError::Timeout`] or [`WasteError::Http`] when the preflight
    ///   request fails.
    pub async fn open_session(
        &self,
        user_agent: &str,
        endpoint: &str,
    ) -> Result<Session, WasteError> {
        self.preflight(user_agent, endpoint, endpoint).await
    }

    pub(crate) async fn preflight(
        &self,
        user_agent: &str,
        endpoint: &str,
        subject: &str,
    ) -> Result<Session, WasteError> {
        let client = Client::builder()
            .cookie_store(true)
            .timeout(self.config.request_timeout())
            .connect_timeout(self.config.connect_timeout())
            .user_agent(user_agent)
            .build()
            .map_err(|e| WasteError::Http {
                stage: RequestStage::Preflight,
                source: e,
            })?;

        let request = client.request(Method::OPTIONS, endpoint);
        match with_headers(request, PREFLIGHT_HEADERS).send().await {
            Ok(response) => {
                tracing::debug!(
                    endpoint,
                    status = response.status().as_u16(),
                    cookies = response.cookies().count(),
                    "preflight complete"
                );
            }
            Err(e) if self.config.strict_preflight => {
                return Err(classify(RequestStage::Preflight, subject, e));
            }
            Err(e) => {
                tracing::warn!(endpoint, error = %e, "preflight failed; continuing without session cookies");
            }
        }

        Ok(Session { client })
    }
}
