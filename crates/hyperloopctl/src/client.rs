//! HTTP client for communicating with hyperloopd.

use anyhow::{anyhow, Context, Result};
use hyperloop_common::{ComparisonChart, DashboardFrame, DashboardQuery, TrackerView, WeatherPanel};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
struct SessionCreated {
    session_id: Uuid,
}

#[derive(Debug, Deserialize)]
struct TipResponse {
    tip: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Daemon health as reported by `/v1/health`
#[derive(Debug, Deserialize)]
pub struct HealthInfo {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub sessions: usize,
}

/// Client for communicating with hyperloopd
pub struct DaemonClient {
    http: Client,
    base_url: String,
}

impl DaemonClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .context("building HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn create_session(&self) -> Result<Uuid> {
        let response = self
            .http
            .post(self.url("/v1/session"))
            .send()
            .await
            .map_err(|e| self.unreachable(e))?;
        let created: SessionCreated = decode(response).await?;
        Ok(created.session_id)
    }

    pub async fn end_session(&self, id: Uuid) -> Result<()> {
        let response = self
            .http
            .delete(self.url(&format!("/v1/session/{}", id)))
            .send()
            .await
            .map_err(|e| self.unreachable(e))?;
        check(response).await.map(|_| ())
    }

    /// Run one interaction cycle on the daemon
    pub async fn dashboard(&self, id: Uuid, query: &DashboardQuery) -> Result<DashboardFrame> {
        let mut params = vec![
            ("status", query.status_filter.to_string()),
            ("sort", query.sort_key.to_string()),
        ];
        if let Some(a) = &query.pod_a {
            params.push(("pod_a", a.clone()));
        }
        if let Some(b) = &query.pod_b {
            params.push(("pod_b", b.clone()));
        }

        self.get(&format!("/v1/session/{}/dashboard", id), &params).await
    }

    pub async fn pods(&self, id: Uuid, query: &DashboardQuery) -> Result<TrackerView> {
        let params = [
            ("status", query.status_filter.to_string()),
            ("sort", query.sort_key.to_string()),
        ];
        self.get(&format!("/v1/session/{}/pods", id), &params).await
    }

    pub async fn compare(&self, id: Uuid, pod_a: &str, pod_b: &str) -> Result<ComparisonChart> {
        let params = [("pod_a", pod_a.to_string()), ("pod_b", pod_b.to_string())];
        self.get(&format!("/v1/session/{}/compare", id), &params).await
    }

    pub async fn weather(&self) -> Result<WeatherPanel> {
        self.get("/v1/weather", &[]).await
    }

    pub async fn tip(&self) -> Result<String> {
        let tip: TipResponse = self.get("/v1/tip", &[]).await?;
        Ok(tip.tip)
    }

    pub async fn health(&self) -> Result<HealthInfo> {
        self.get("/v1/health", &[]).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, params: &[(&str, String)]) -> Result<T> {
        let response = self
            .http
            .get(self.url(path))
            .query(params)
            .send()
            .await
            .map_err(|e| self.unreachable(e))?;
        decode(response).await
    }

    fn unreachable(&self, e: reqwest::Error) -> anyhow::Error {
        anyhow!(
            "Cannot reach hyperloopd at {}: {}\n\n\
             Start it with: hyperloopd\n\
             Or run without a daemon: hyperloopctl --local <command>",
            self.base_url,
            e
        )
    }
}

async fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => status.canonical_reason().unwrap_or("unknown error").to_string(),
    };
    Err(anyhow!("hyperloopd returned {}: {}", status.as_u16(), message))
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let response = check(response).await?;
    response.json::<T>().await.context("decoding daemon response")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trimmed() {
        let client = DaemonClient::new("http://127.0.0.1:7870/").unwrap();
        assert_eq!(client.url("/v1/health"), "http://127.0.0.1:7870/v1/health");
    }

    #[test]
    fn test_health_decodes() {
        let body = r#"{"status":"ok","version":"0.3.0","uptime_seconds":12,"sessions":2}"#;
        let health: HealthInfo = serde_json::from_str(body).unwrap();
        assert_eq!(health.status, "ok");
        assert_eq!(health.sessions, 2);
    }

    #[test]
    fn test_error_body_decodes() {
        let body = r#"{"error":"unknown pod: Avishkar-9","code":"unknown_pod"}"#;
        let err: ErrorBody = serde_json::from_str(body).unwrap();
        assert!(err.error.contains("Avishkar-9"));
    }
}
