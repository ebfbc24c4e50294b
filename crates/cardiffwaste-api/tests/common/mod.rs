//! Shared wiremock fixtures for the Cardiff API integration tests.

#![allow(dead_code)]

use cardiffwaste_api::ClientConfig;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_TOKEN: &str = "test.jwt.token";
pub const TEST_USER_AGENT: &str = "cardiffwaste-test/0.1";

pub const TOKEN_PATH: &str = "/AuthenticationWebService.asmx";
pub const COLLECTIONS_PATH: &str = "/WasteManagement/api/WasteCollection";
pub const SEARCH_PATH: &str = "/AddressSearchAPI/api/AddressSearch";

/// Config pointing at `server` with a fixed user agent and a 1-second timeout.
pub fn test_config(server: &MockServer) -> ClientConfig {
    ClientConfig::with_base_url(&server.uri())
        .with_user_agent(TEST_USER_AGENT)
        .with_request_timeout_secs(1)
}

pub fn token_xml(token: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\
         <soap:Envelope xmlns:soap=\"http://schemas.xmlsoap.org/soap/envelope/\" \
         xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\" \
         xmlns:xsd=\"http://www.w3.org/2001/XMLSchema\">\
         <soap:Body><GetJWTResponse xmlns=\"http://tempuri.org/\">\
         <GetJWTResult>{{&quot;access_token&quot;:&quot;{token}&quot;,&quot;expires_in&quot;:1800,&quot;token_type&quot;:&quot;Bearer&quot;}}</GetJWTResult>\
         </GetJWTResponse></soap:Body></soap:Envelope>"
    )
}

pub async fn mount_token(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .and(query_param("op", "GetJWT"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/xml; charset=utf-8")
                .set_body_string(token_xml(TEST_TOKEN)),
        )
        .mount(server)
        .await;
}

pub async fn mount_preflight(server: &MockServer, endpoint_path: &str) {
    Mock::given(method("OPTIONS"))
        .and(path(endpoint_path.to_string()))
        .respond_with(
            ResponseTemplate::new(204).insert_header("set-cookie", "ARRAffinity=abc123; Path=/"),
        )
        .mount(server)
        .await;
}

/// Token and preflight mocks for the collections endpoint.
pub async fn mount_collections_handshake(server: &MockServer) {
    mount_token(server).await;
    mount_preflight(server, COLLECTIONS_PATH).await;
}

pub async fn mount_search_handshake(server: &MockServer) {
    mount_token(server).await;
    mount_preflight(server, SEARCH_PATH).await;
}

/// Three weeks in chronological order; General appears twice.
pub fn collections_body() -> serde_json::Value {
    serde_json::json!({
        "uprn": "100100112233",
        "collectionWeeks": [
            {
                "date": "2024-03-04T00:00:00",
                "bins": [
                    {"type": "General", "collectionType": "Standard", "imageUrl": "https://example.test/general.png"},
                    {"type": "Food", "collectionType": "Standard", "imageUrl": "https://example.test/food.png"}
                ]
            },
            {
                "date": "2024-03-11T00:00:00",
                "bins": [
                    {"type": "Recycling", "collectionType": "Moved", "imageUrl": "https://example.test/recycling.png"},
                    {"type": "General", "collectionType": "Moved", "imageUrl": "https://example.test/general-late.png"}
                ]
            },
            {
                "date": "2024-03-18T00:00:00",
                "bins": [
                    {"type": "Garden", "collectionType": "Standard", "imageUrl": "https://example.test/garden.png"}
                ]
            }
        ]
    })
}
