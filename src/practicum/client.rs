use std::time::Duration;

use reqwest::Client;
use reqwest::header::AUTHORIZATION;
use serde_json::Value;
use tracing::debug;

use crate::error::{BotError, Malformed};
use crate::validator::server_fault;

pub const ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

/// Anything that can fetch the raw status payload for a cursor.
#[allow(async_fn_in_trait)]
pub trait StatusSource {
    async fn fetch(&self, from_date: i64) -> Result<Value, BotError>;
}

pub struct PracticumClient {
    token: String,
    client: Client,
    endpoint: String,
}

impl PracticumClient {
    /// Create a client for `endpoint`; the production URL is [`ENDPOINT`].
    pub fn with_endpoint(
        token: String,
        endpoint: String,
        timeout: Duration,
    ) -> reqwest::Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            token,
            client,
            endpoint,
        })
    }
}

impl StatusSource for PracticumClient {
    async fn fetch(&self, from_date: i64) -> Result<Value, BotError> {
        debug!(endpoint = %self.endpoint, from_date, "requesting homework statuses");
        let response = self
            .client
            .get(&self.endpoint)
            .header(AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        let parsed = serde_json::from_str::<Value>(&body);

        if !status.is_success() {
            // Error payloads are server faults no matter which status carried them.
            if let Ok(value) = &parsed
                && let Some(fault) = server_fault(value)
            {
                return Err(fault);
            }
            return Err(BotError::TransportFault(format!(
                "endpoint {} returned status {}",
                self.endpoint,
                status.as_u16()
            )));
        }

        parsed.map_err(|e| BotError::MalformedResponse(Malformed::InvalidJson(e.to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> PracticumClient {
        PracticumClient::with_endpoint(
            "secret".into(),
            format!("{}/api/user_api/homework_statuses/", server.uri()),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn fetch_sends_token_and_cursor() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(header("authorization", "OAuth secret"))
            .and(query_param("from_date", "1700000000"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "homeworks": [],
                "current_date": 1700000600
            })))
            .expect(1)
            .mount(&server)
            .await;

        let body = client_for(&server).fetch(1_700_000_000).await.unwrap();
        assert_eq!(body["current_date"], 1700000600);
    }

    #[tokio::test]
    async fn non_success_status_is_transport_fault() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
            .mount(&server)
            .await;

        let err = client_for(&server).fetch(0).await.unwrap_err();
        assert!(matches!(err, BotError::TransportFault(ref msg) if msg.contains("503")));
    }

    #[tokio::test]
    async fn error_body_is_server_fault_regardless_of_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "code": "not_authenticated",
                "message": "Учетные данные не были предоставлены."
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).fetch(0).await.unwrap_err();
        assert_eq!(
            err,
            BotError::ServerFault(
                "code: not_authenticated, Учетные данные не были предоставлены.".into()
            )
        );
    }

    #[tokio::test]
    async fn invalid_json_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server).fetch(0).await.unwrap_err();
        assert!(matches!(
            err,
            BotError::MalformedResponse(Malformed::InvalidJson(_))
        ));
    }

    #[tokio::test]
    async fn connection_refused_is_transport_fault() {
        let client = PracticumClient::with_endpoint(
            "secret".into(),
            "http://127.0.0.1:1/".into(),
            Duration::from_secs(1),
        )
        .unwrap();
        let err = client.fetch(0).await.unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::TransportFault);
    }
}
