//! LinkedIn Posts API adapter for publishing

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use trendpost_domain::{PublishError, PublishReceipt, Publisher, SanitizedPost};

pub const DEFAULT_BASE_URL: &str = "https://api.linkedin.com";
pub const DEFAULT_API_VERSION: &str = "202306";
pub const DEFAULT_AUTHOR_NAMESPACE: &str = "li";

/// Credentials for posting as a LinkedIn member
#[derive(Debug)]
pub struct LinkedInCredentials {
    pub access_token: SecretString,
    pub user_id: String,
}

/// LinkedIn publisher for creating member posts
pub struct LinkedInPublisher {
    client: Client,
    credentials: LinkedInCredentials,
    base_url: String,
    api_version: String,
    author_namespace: String,
}

impl LinkedInPublisher {
    pub fn with_base_url(
        credentials: LinkedInCredentials,
        base_url: String,
        api_version: String,
        author_namespace: String,
    ) -> reqwest::Result<Self> {
        let client = Client::builder().build()?;

        Ok(Self {
            client,
            credentials,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_version,
            author_namespace,
        })
    }

    /// Author URN of the member the post is created for
    pub fn author_urn(&self) -> String {
        format!(
            "urn:{}:person:{}",
            self.author_namespace, self.credentials.user_id
        )
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreatePostRequest<'a> {
    author: String,
    lifecycle_state: &'a str,
    commentary: &'a str,
    distribution: Distribution,
    visibility: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Distribution {
    feed_distribution: &'static str,
    target_entities: Vec<String>,
    third_party_distribution_channels: Vec<String>,
}

#[async_trait]
impl Publisher for LinkedInPublisher {
    async fn publish(&self, post: &SanitizedPost) -> Result<PublishReceipt, PublishError> {
        let request = CreatePostRequest {
            author: self.author_urn(),
            lifecycle_state: "PUBLISHED",
            commentary: post.as_str(),
            distribution: Distribution {
                feed_distribution: "MAIN_FEED",
                target_entities: vec![],
                third_party_distribution_channels: vec![],
            },
            visibility: "PUBLIC",
        };

        let url = format!("{}/rest/posts", self.base_url);

        let response = self
            .client
            .post(&url)
            .header(
                "Authorization",
                format!("Bearer {}", self.credentials.access_token.expose_secret()),
            )
            .header("LinkedIn-Version", self.api_version.as_str())
            .json(&request)
            .send()
            .await
            .map_err(|e| PublishError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PublishError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(PublishError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(PublishReceipt {
            status_code: status.as_u16(),
            body,
        })
    }

    fn platform(&self) -> &'static str {
        "linkedin"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trendpost_domain::DraftPost;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn credentials() -> LinkedInCredentials {
        LinkedInCredentials {
            access_token: SecretString::new("test-token".into()),
            user_id: "abc123".to_string(),
        }
    }

    fn publisher_for(server: &MockServer) -> LinkedInPublisher {
        LinkedInPublisher::with_base_url(
            credentials(),
            server.uri(),
            DEFAULT_API_VERSION.to_string(),
            DEFAULT_AUTHOR_NAMESPACE.to_string(),
        )
        .unwrap()
    }

    fn sample_post() -> SanitizedPost {
        SanitizedPost::from_draft(&DraftPost("AI news (today)".to_string()))
    }

    #[tokio::test]
    async fn test_publish_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rest/posts"))
            .and(header("Authorization", "Bearer test-token"))
            .and(header("LinkedIn-Version", "202306"))
            .and(header("Content-Type", "application/json"))
            .and(body_json(serde_json::json!({
                "author": "urn:li:person:abc123",
                "lifecycleState": "PUBLISHED",
                "commentary": "AI news \\(today\\)",
                "distribution": {
                    "feedDistribution": "MAIN_FEED",
                    "targetEntities": [],
                    "thirdPartyDistributionChannels": []
                },
                "visibility": "PUBLIC"
            })))
            .respond_with(ResponseTemplate::new(201).insert_header("x-restli-id", "urn:li:share:1"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let receipt = publisher_for(&mock_server)
            .publish(&sample_post())
            .await
            .unwrap();

        assert_eq!(receipt.status_code, 201);
        assert_eq!(receipt.body, "");
    }

    #[tokio::test]
    async fn test_publish_rejected() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rest/posts"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_string(r#"{"status":401,"message":"Invalid access token"}"#),
            )
            .mount(&mock_server)
            .await;

        let result = publisher_for(&mock_server).publish(&sample_post()).await;

        match result {
            Err(PublishError::Rejected { status, body }) => {
                assert_eq!(status, 401);
                assert!(body.contains("Invalid access token"));
            }
            other => panic!("expected Rejected, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_publish_unreachable() {
        let publisher = LinkedInPublisher::with_base_url(
            credentials(),
            "http://127.0.0.1:1".to_string(),
            DEFAULT_API_VERSION.to_string(),
            DEFAULT_AUTHOR_NAMESPACE.to_string(),
        )
        .unwrap();

        let result = publisher.publish(&sample_post()).await;

        assert!(matches!(result, Err(PublishError::Network(_))));
    }

    #[test]
    fn test_author_urn_uses_namespace() {
        let publisher = LinkedInPublisher::with_base_url(
            credentials(),
            DEFAULT_BASE_URL.to_string(),
            DEFAULT_API_VERSION.to_string(),
            "test".to_string(),
        )
        .unwrap();

        assert_eq!(publisher.author_urn(), "urn:test:person:abc123");
        assert_eq!(publisher.platform(), "linkedin");
    }
}
