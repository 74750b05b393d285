use anyhow::{Context, Result};
use reqwest::StatusCode;

use nutrigram_core::models::{
    Achievement, AchievementsResponse, AiReport, DailySummary, GenerateReportRequest,
    PeriodicSummary, ReportType, TelegramId, WeightHistory,
};

/// Thin client over the nutrition backend. One instance per process; every
/// view borrows it and issues its own requests.
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(format!(
                "nutrigram-cli/{} (nutrition dashboard)",
                env!("CARGO_PKG_VERSION")
            ))
            .timeout(std::time::Duration::from_secs(10))
            .connect_timeout(std::time::Duration::from_secs(5))
            .build()
            .expect("Failed to build HTTP client");
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn daily_summary(&self, id: TelegramId) -> Result<DailySummary> {
        let url = format!("{}/api/v1/nutrition/daily-summary", self.base_url);
        let resp = self
            .client
            .get(&url)
            .query(&[("telegram_id", id.to_string())])
            .send()
            .await
            .context("Failed to reach nutrition API")?
            .error_for_status()
            .context("Daily summary request failed")?;

        resp.json()
            .await
            .context("Failed to parse daily summary response")
    }

    pub async fn periodic_summary(&self, id: TelegramId, days: u32) -> Result<PeriodicSummary> {
        let url = format!("{}/api/v1/nutrition/periodic-summary", self.base_url);
        let resp = self
            .client
            .get(&url)
            .query(&[
                ("telegram_id", id.to_string()),
                ("days", days.to_string()),
            ])
            .send()
            .await
            .context("Failed to reach nutrition API")?
            .error_for_status()
            .context("Periodic summary request failed")?;

        resp.json()
            .await
            .context("Failed to parse periodic summary response")
    }

    pub async fn weight_history(&self, id: TelegramId, limit: u32) -> Result<WeightHistory> {
        let url = format!("{}/api/v1/users/weight-history", self.base_url);
        let resp = self
            .client
            .get(&url)
            .query(&[
                ("telegram_id", id.to_string()),
                ("limit", limit.to_string()),
            ])
            .send()
            .await
            .context("Failed to reach nutrition API")?
            .error_for_status()
            .context("Weight history request failed")?;

        resp.json()
            .await
            .context("Failed to parse weight history response")
    }

    pub async fn achievements(&self, id: TelegramId) -> Result<Vec<Achievement>> {
        let url = format!("{}/api/v1/achievements/", self.base_url);
        let resp = self
            .client
            .get(&url)
            .query(&[("telegram_id", id.to_string())])
            .send()
            .await
            .context("Failed to reach nutrition API")?
            .error_for_status()
            .context("Achievements request failed")?;

        let data: AchievementsResponse = resp
            .json()
            .await
            .context("Failed to parse achievements response")?;
        Ok(data.achievements)
    }

    /// `Ok(None)` is the backend's not-found signal: no report of this type
    /// has been generated yet.
    pub async fn last_report(
        &self,
        id: TelegramId,
        report_type: ReportType,
    ) -> Result<Option<AiReport>> {
        let url = format!("{}/api/v1/analytics/last-ai-report", self.base_url);
        let resp = self
            .client
            .get(&url)
            .query(&[
                ("telegram_id", id.to_string()),
                ("report_type", report_type.as_str().to_string()),
            ])
            .send()
            .await
            .context("Failed to reach nutrition API")?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let resp = resp
            .error_for_status()
            .context("Report lookup request failed")?;
        let report = resp
            .json()
            .await
            .context("Failed to parse report response")?;
        Ok(Some(report))
    }

    pub async fn generate_report(&self, request: &GenerateReportRequest) -> Result<AiReport> {
        let url = format!("{}/api/v1/analytics/generate-ai-report", self.base_url);
        let resp = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .context("Failed to reach nutrition API")?
            .error_for_status()
            .context("Report generation request failed")?;

        resp.json()
            .await
            .context("Failed to parse generated report response")
    }

    /// The export payload, verbatim. Saved to disk by the export view.
    pub async fn user_report(&self, id: TelegramId) -> Result<Vec<u8>> {
        let url = format!("{}/api/v1/users/user-report", self.base_url);
        let resp = self
            .client
            .get(&url)
            .query(&[("telegram_id", id.to_string())])
            .send()
            .await
            .context("Failed to reach nutrition API")?
            .error_for_status()
            .context("User report request failed")?;

        let bytes = resp
            .bytes()
            .await
            .context("Failed to download user report")?;
        Ok(bytes.to_vec())
    }
}
