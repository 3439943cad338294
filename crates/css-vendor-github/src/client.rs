use css_vendor::{HttpClient, HttpResponse, TransportError};

pub(crate) const USER_AGENT: &str = "css-vendor";

/// `reqwest`-backed GET used to pull raw stylesheets.
///
/// No timeout is configured and redirects follow reqwest's defaults.
#[derive(Clone, Default)]
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl HttpClient for ReqwestClient {
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        let response = self
            .client
            .get(url)
            .header("User-Agent", USER_AGENT)
            .send()
            .await
            .map_err(|e| TransportError(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError(format!("failed to read body: {e}")))?;

        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[tokio::test]
    async fn returns_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/open-props/index.css"))
            .and(header("User-Agent", USER_AGENT))
            .respond_with(ResponseTemplate::new(200).set_body_string(":root{}"))
            .mount(&server)
            .await;

        let response = ReqwestClient::new()
            .get(&format!("{}/open-props/index.css", server.uri()))
            .await
            .unwrap();

        assert_eq!(response, HttpResponse::ok(":root{}"));
    }

    #[tokio::test]
    async fn non_success_status_is_not_a_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
            .mount(&server)
            .await;

        let response = ReqwestClient::new()
            .get(&format!("{}/missing.css", server.uri()))
            .await
            .unwrap();

        assert_eq!(response.status, 404);
    }

    #[tokio::test]
    async fn unreachable_host_is_a_transport_error() {
        let result = ReqwestClient::new().get("http://127.0.0.1:1/a.css").await;
        assert!(result.is_err());
    }
}
