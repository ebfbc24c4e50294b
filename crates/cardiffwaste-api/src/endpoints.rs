//! Fixed request shapes for the council's authentication and waste APIs.
//!
//! Headers and payloads are immutable here and attached to each request as
//! it is built, so no request ever sees values left over from another.

use cardiffwaste_core::Uprn;
use reqwest::RequestBuilder;
use serde::Serialize;

pub const GET_JWT_ENVELOPE: &str = concat!(
    "<?xml version='1.0' encoding='utf-8'?>",
    "<soap:Envelope xmlns:xsi='http://www.w3.org/2001/XMLSchema-instance'",
    " xmlns:xsd='http://www.w3.org/2001/XMLSchema'",
    " xmlns:soap='http://schemas.xmlsoap.org/soap/envelope/'>",
    "<soap:Body>",
    "<GetJWT xmlns='http://tempuri.org/' />",
    "</soap:Body>",
    "</soap:Envelope>"
);

/// Element in the SOAP response whose text is the JSON token payload.
pub const GET_JWT_RESULT_ELEMENT: &str = "GetJWTResult";

/// Present in a collections response body only when the UPRN has data.
pub const COLLECTIONS_MARKER: &str = "collectionWeeks";

pub const SYSTEM_REFERENCE: &str = "web";
pub const LANGUAGE: &str = "eng";

const ORIGIN: &str = "https://www.cardiff.gov.uk";
const REFERER: &str = "https://www.cardiff.gov.uk/";
const SEC_CH_UA: &str = r#"" Not;A Brand";v="99", "Google Chrome";v="97", "Chromium";v="97""#;

pub const TOKEN_HEADERS: &[(&str, &str)] = &[
    ("sec-ch-ua", SEC_CH_UA),
    ("Accept", "*/*"),
    ("Content-Type", r#"text/xml; charset="UTF-8""#),
    ("sec-ch-ua-mobile", "?0"),
    ("sec-ch-ua-platform", r#""Windows""#),
    ("Origin", ORIGIN),
    ("Sec-Fetch-Site", "same-site"),
    ("Sec-Fetch-Mode", "cors"),
    ("Sec-Fetch-Dest", "empty"),
    ("Referer", REFERER),
    ("Accept-Language", "en-GB,en;q=0.9"),
];

pub const PREFLIGHT_HEADERS: &[(&str, &str)] = &[
    ("Accept", "*/*"),
    ("Access-Control-Request-Method", "POST"),
    ("Access-Control-Request-Headers", "authorization,content-type"),
    ("Origin", ORIGIN),
    ("Sec-Fetch-Mode", "cors"),
    ("Sec-Fetch-Site", "same-site"),
    ("Sec-Fetch-Dest", "empty"),
    ("Referer", REFERER),
    ("Accept-Language", "en-GB,en;q=0.9"),
];

pub const API_HEADERS: &[(&str, &str)] = &[
    ("sec-ch-ua", SEC_CH_UA),
    ("Accept", "application/json, text/javascript, */*; q=0.01"),
    ("Content-Type", "application/json; charset=UTF-8"),
    ("sec-ch-ua-mobile", "?0"),
    ("Origin", ORIGIN),
    ("Sec-Fetch-Site", "same-site"),
    ("Sec-Fetch-Mode", "cors"),
    ("Sec-Fetch-Dest", "empty"),
    ("Referer", REFERER),
    ("Accept-Language", "en-GB,en;q=0.9"),
];

/// Attaches each `(name, value)` pair to `request`.
pub(crate) fn with_headers(request: RequestBuilder, headers: &[(&str, &str)]) -> RequestBuilder {
    headers
        .iter()
        .fold(request, |req, (name, value)| req.header(*name, *value))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionsRequest {
    pub system_reference: &'static str,
    pub language: &'static str,
    pub uprn: Uprn,
}

impl CollectionsRequest {
    #[must_use]
    pub fn new(uprn: Uprn) -> Self {
        Self {
            system_reference: SYSTEM_REFERENCE,
            language: LANGUAGE,
            uprn,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressSearchRequest<'a> {
    pub search_term: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collections_request_sends_uprn_as_integer() {
        let uprn: Uprn = "12345".parse().unwrap();
        let body = serde_json::to_value(CollectionsRequest::new(uprn)).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"systemReference": "web", "language": "eng", "uprn": 12345})
        );
    }

    #[test]
    fn address_search_request_uses_camel_case() {
        let body = serde_json::to_value(AddressSearchRequest {
            search_term: "1 High Street",
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"searchTerm": "1 High Street"}));
    }

    #[test]
    fn envelope_requests_get_jwt() {
        assert!(GET_JWT_ENVELOPE.starts_with("<?xml"));
        assert!(GET_JWT_ENVELOPE.contains("<GetJWT xmlns='http://tempuri.org/' />"));
    }
}
