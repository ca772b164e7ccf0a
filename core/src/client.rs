use reqwest::{Client, RequestBuilder};
use tracing::{debug, info, instrument};

use crate::config::SiteConfig;
use crate::errors::{SiteError, SiteResult};
use crate::types::{ErrorBody, LikeResponse, WaiverOutcome, WaiverSubmission};

const CSRF_HEADER: &str = "X-CSRFToken";

/// Client for the site's HTTP endpoints
///
/// Failures are returned to the caller as-is; nothing is retried.
#[derive(Debug, Clone)]
pub struct SiteClient {
    client: Client,
    base_url: String,
    csrf_token: Option<String>,
}

impl SiteClient {
    pub fn new(config: &SiteConfig) -> SiteResult<Self> {
        let base_url = config.base_url().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(SiteError::ConfigError(
                "A base URL is required to reach the site".to_string(),
            ));
        }

        Ok(Self {
            client: Client::new(),
            base_url,
            csrf_token: config.csrf_token.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn with_csrf(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.csrf_token {
            Some(token) => request.header(CSRF_HEADER, token),
            None => request,
        }
    }

    /// Likes a video and returns the updated counter
    #[instrument(skip(self))]
    pub async fn like_video(&self, video_id: u64) -> SiteResult<LikeResponse> {
        let url = self.url(&format!("api/video/{}/like", video_id));
        debug!("Posting like to {}", url);

        let response = self
            .with_csrf(self.client.post(&url))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| SiteError::RequestError(format!("Failed to send like: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.map_err(|e| {
                SiteError::ResponseError(format!("Failed to read error response: {}", e))
            })?;
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or(body);

            return Err(SiteError::HttpError {
                status_code: status.as_u16(),
                message: format!("Like request failed: {}", message),
            });
        }

        let like = response
            .json::<LikeResponse>()
            .await
            .map_err(|e| SiteError::ParsingError(format!("Failed to parse like response: {}", e)))?;

        if !like.success {
            return Err(SiteError::ResponseError(
                "The site did not record the like".to_string(),
            ));
        }

        info!("Video {} now has {} likes", video_id, like.like_count);
        Ok(like)
    }

    /// Posts a signed waiver form
    #[instrument(skip(self, submission))]
    pub async fn submit_waiver(
        &self,
        path: &str,
        submission: &WaiverSubmission,
    ) -> SiteResult<WaiverOutcome> {
        let url = self.url(path);
        debug!("Posting waiver form to {}", url);

        let response = self
            .with_csrf(self.client.post(&url))
            .form(submission)
            .send()
            .await
            .map_err(|e| SiteError::RequestError(format!("Failed to submit waiver: {}", e)))?;

        let status = response.status();
        if status.is_success() || status.is_redirection() {
            Ok(WaiverOutcome::Accepted)
        } else {
            Ok(WaiverOutcome::Rejected {
                status_code: status.as_u16(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(base_url: &str) -> SiteConfig {
        SiteConfig {
            base_url: Some(base_url.to_string()),
            ..SiteConfig::defaults()
        }
    }

    #[test]
    fn test_url_joining() {
        let client = SiteClient::new(&config("https://clips.test/")).unwrap();
        assert_eq!(client.base_url(), "https://clips.test");
        assert_eq!(client.url("/api/video/7/like"), "https://clips.test/api/video/7/like");
        assert_eq!(client.url("waiver/abc"), "https://clips.test/waiver/abc");
    }

    #[test]
    fn test_empty_base_url_rejected() {
        let result = SiteClient::new(&config("/"));
        assert!(matches!(result, Err(SiteError::ConfigError(_))));
    }

    fn submission() -> WaiverSubmission {
        WaiverSubmission {
            legal_name: "Jordan Reyes".to_string(),
            agreement: true,
            client_name: None,
            client_email: None,
        }
    }

    #[tokio::test]
    async fn test_like_video_returns_count() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/video/7/like"))
            .and(header("X-CSRFToken", "tok-123"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"success": true, "like_count": 12})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = SiteClient::new(&SiteConfig {
            csrf_token: Some("tok-123".to_string()),
            ..config(&server.uri())
        })
        .unwrap();
        let like = client.like_video(7).await.unwrap();
        assert_eq!(
            like,
            LikeResponse {
                success: true,
                like_count: 12
            }
        );
    }

    #[tokio::test]
    async fn test_like_not_recorded_is_response_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/video/7/like"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": false})))
            .mount(&server)
            .await;

        let client = SiteClient::new(&config(&server.uri())).unwrap();
        let result = client.like_video(7).await;
        assert!(matches!(result, Err(SiteError::ResponseError(_))));
    }

    #[tokio::test]
    async fn test_like_http_error_carries_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/video/404/like"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"message": "Video not found"})),
            )
            .mount(&server)
            .await;

        let client = SiteClient::new(&config(&server.uri())).unwrap();
        match client.like_video(404).await {
            Err(SiteError::HttpError {
                status_code,
                message,
            }) => {
                assert_eq!(status_code, 404);
                assert!(message.contains("Video not found"));
            }
            other => panic!("Expected HttpError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_submit_waiver_posts_form() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/payment/waiver/basic"))
            .and(header("X-CSRFToken", "tok-123"))
            .and(body_string_contains("agreement=on"))
            .and(body_string_contains("legal_name=Jordan+Reyes"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = SiteClient::new(&SiteConfig {
            csrf_token: Some("tok-123".to_string()),
            ..config(&server.uri())
        })
        .unwrap();
        let outcome = client
            .submit_waiver("/payment/waiver/basic", &submission())
            .await
            .unwrap();
        assert_eq!(outcome, WaiverOutcome::Accepted);
    }

    #[tokio::test]
    async fn test_submit_waiver_follows_redirect() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/payment/waiver/basic"))
            .respond_with(ResponseTemplate::new(303).insert_header("Location", "/booking/confirmed"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/booking/confirmed"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let client = SiteClient::new(&config(&server.uri())).unwrap();
        let outcome = client
            .submit_waiver("payment/waiver/basic", &submission())
            .await
            .unwrap();
        assert_eq!(outcome, WaiverOutcome::Accepted);
    }

    #[tokio::test]
    async fn test_submit_waiver_rejected_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/payment/waiver/basic"))
            .respond_with(ResponseTemplate::new(400))
            .mount(&server)
            .await;

        let client = SiteClient::new(&config(&server.uri())).unwrap();
        let outcome = client
            .submit_waiver("/payment/waiver/basic", &submission())
            .await
            .unwrap();
        assert_eq!(outcome, WaiverOutcome::Rejected { status_code: 400 });
    }

    #[tokio::test]
    async fn test_unreachable_site_is_request_error() {
        // Port 9 (discard) on localhost is expected to refuse connections
        let client = SiteClient::new(&config("http://127.0.0.1:9")).unwrap();
        let result = client.like_video(1).await;
        assert!(matches!(result, Err(SiteError::RequestError(_))));
    }
}
