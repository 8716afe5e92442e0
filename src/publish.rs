use std::env;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use serde::{Deserialize, Serialize};

use crate::compose::pack_lines;
use crate::config::PublishConfig;
use crate::RunMode;

/// Outcome of one publish call. Dry runs report suppression explicitly
/// instead of pretending a post happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishResult {
    Sent(String),
    Suppressed,
}

#[async_trait]
pub trait Publisher: Send + Sync {
    async fn publish(&self, text: &str, reply_to: Option<&str>)
        -> Result<PublishResult, String>;
}

/// Posts to the X v2 API with bearer auth from the environment.
#[derive(Clone)]
pub struct XPublisher {
    client: reqwest::Client,
    api_base: String,
    bearer_token: String,
    mode: RunMode,
    rate_limit: Duration,
}

#[derive(Serialize)]
struct PostRequest<'a> {
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply: Option<PostReply<'a>>,
}

#[derive(Serialize)]
struct PostReply<'a> {
    in_reply_to_tweet_id: &'a str,
}

#[derive(Deserialize)]
struct PostResponse {
    data: PostData,
}

#[derive(Deserialize)]
struct PostData {
    id: String,
}

impl XPublisher {
    /// Credentials come from the environment; everything else from
    /// config. Dry runs never touch the network, so a missing token is
    /// only an error in production mode.
    pub fn from_env(mode: RunMode, config: &PublishConfig) -> Result<Self, String> {
        let bearer_token = match mode {
            RunMode::Production => env::var("X_API_BEARER_TOKEN")
                .map_err(|_| "X_API_BEARER_TOKEN is not set".to_string())?,
            RunMode::LocalDryRun => env::var("X_API_BEARER_TOKEN").unwrap_or_default(),
        };
        Ok(Self {
            client: reqwest::Client::new(),
            api_base: config.api_base.clone(),
            bearer_token,
            mode,
            rate_limit: Duration::from_millis(config.rate_limit_ms),
        })
    }
}

#[async_trait]
impl Publisher for XPublisher {
    async fn publish(
        &self,
        text: &str,
        reply_to: Option<&str>,
    ) -> Result<PublishResult, String> {
        tracing::info!("sending post:\n{}", text);
        if self.mode == RunMode::LocalDryRun {
            tracing::info!("dry run, post suppressed");
            return Ok(PublishResult::Suppressed);
        }

        // fixed pause to stay under the platform's throttling policy
        tokio::time::sleep(self.rate_limit).await;

        let request = PostRequest {
            text,
            reply: reply_to.map(|id| PostReply {
                in_reply_to_tweet_id: id,
            }),
        };
        let response = self
            .client
            .post(format!("{}/tweets", self.api_base.trim_end_matches('/')))
            .header(AUTHORIZATION, format!("Bearer {}", self.bearer_token))
            .json(&request)
            .send()
            .await
            .map_err(|err| format!("post request failed: {}", err))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(format!("post error {}: {}", status, body.trim()));
        }

        let body: PostResponse = response
            .json()
            .await
            .map_err(|err| format!("post response parse failed: {}", err))?;
        Ok(PublishResult::Sent(body.data.id))
    }
}

/// Send an ordered line sequence as a thread: lines are packed into
/// chunks and each chunk replies to the previous one. A failed or
/// suppressed chunk loses the reply linkage; later chunks still go out
/// as top-level posts.
pub async fn send_thread<P: Publisher>(publisher: &P, lines: &[String], limit: usize) {
    let mut previous_id: Option<String> = None;
    for chunk in pack_lines(lines, limit) {
        previous_id = match publisher.publish(&chunk, previous_id.as_deref()).await {
            Ok(PublishResult::Sent(id)) => Some(id),
            Ok(PublishResult::Suppressed) => None,
            Err(err) => {
                tracing::warn!("publish failed, continuing without thread parent: {}", err);
                None
            }
        };
    }
}
