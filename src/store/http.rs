use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::StoreConfig;
use crate::stats::FandomCount;
use crate::store::Store;

/// JSON client for the stats service. The wire format is owned by the
/// service; this client only assumes the operations exist and that
/// increments and marks are atomic server-side.
#[derive(Clone)]
pub struct HttpStore {
    endpoint: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct IncrementRequest<'a> {
    fandom: &'a str,
    day: i64,
}

#[derive(Deserialize)]
struct IncrementResponse {
    works_seen: u64,
}

#[derive(Serialize)]
struct MarkWorkRequest {
    work_id: u64,
}

#[derive(Serialize)]
struct MarkThresholdRequest<'a> {
    fandom: &'a str,
    day: i64,
}

#[derive(Deserialize)]
struct MarkResponse {
    already_present: bool,
}

#[derive(Deserialize)]
struct CountersResponse {
    counters: Vec<FandomCount>,
}

#[derive(Deserialize)]
struct ClearResponse {
    removed: u64,
}

impl HttpStore {
    pub fn from_config(config: &StoreConfig) -> Result<Self, String> {
        let timeout = Duration::from_millis(config.timeout_ms);
        HttpStore::new(config.endpoint.clone(), timeout)
    }

    pub fn new(endpoint: String, timeout: Duration) -> Result<Self, String> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| format!("failed to build store client: {}", err))?;
        Ok(Self { endpoint, client })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.endpoint.trim_end_matches('/'), path)
    }

    async fn post_json<Req, Resp>(&self, path: &str, request: &Req) -> Result<Resp, String>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned,
    {
        let response = self
            .client
            .post(self.url(path))
            .json(request)
            .send()
            .await
            .map_err(|err| format!("store request failed: {}", err))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(format!("store error {}: {}", status, body.trim()));
        }

        response
            .json::<Resp>()
            .await
            .map_err(|err| format!("store response parse failed: {}", err))
    }
}

#[async_trait]
impl Store for HttpStore {
    async fn counters_for_day(&self, day: i64) -> Result<Vec<FandomCount>, String> {
        let response = self
            .client
            .get(self.url("counters"))
            .query(&[("day", day)])
            .send()
            .await
            .map_err(|err| format!("store request failed: {}", err))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(format!("store error {}: {}", status, body.trim()));
        }

        let body: CountersResponse = response
            .json()
            .await
            .map_err(|err| format!("store response parse failed: {}", err))?;
        Ok(body.counters)
    }

    async fn increment_counter(&self, fandom: &str, day: i64) -> Result<u64, String> {
        let body: IncrementResponse = self
            .post_json("counters/increment", &IncrementRequest { fandom, day })
            .await?;
        Ok(body.works_seen)
    }

    async fn mark_seen_if_absent(&self, work_id: u64) -> Result<bool, String> {
        let body: MarkResponse = self
            .post_json("works/mark", &MarkWorkRequest { work_id })
            .await?;
        Ok(body.already_present)
    }

    async fn mark_threshold_if_absent(&self, fandom: &str, day: i64) -> Result<bool, String> {
        let body: MarkResponse = self
            .post_json("thresholds/mark", &MarkThresholdRequest { fandom, day })
            .await?;
        Ok(body.already_present)
    }

    async fn clear_threshold_markers(&self) -> Result<u64, String> {
        let body: ClearResponse = self
            .post_json("thresholds/clear", &serde_json::json!({}))
            .await?;
        Ok(body.removed)
    }
}
