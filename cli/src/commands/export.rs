use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};

use nutrigram_core::models::TelegramId;
use nutrigram_core::state;

use crate::api::ApiClient;

use super::helpers::take_data;

pub(crate) async fn cmd_export(
    api: &ApiClient,
    identity: Option<TelegramId>,
    output: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let state = state::load(identity, |id| async move {
        Ok(api.user_report(id).await?)
    })
    .await;

    let payload = take_data(state, json);
    let path = output.unwrap_or_else(|| PathBuf::from(export_file_name(Utc::now())));

    std::fs::write(&path, &payload)
        .with_context(|| format!("Failed to write export file: {}", path.display()))?;

    if json {
        println!(
            "{}",
            serde_json::json!({
                "path": path.display().to_string(),
                "bytes": payload.len(),
            })
        );
    } else {
        let bytes = payload.len();
        println!("Saved nutrition report to {} ({bytes} bytes)", path.display());
    }

    Ok(())
}

fn export_file_name(now: DateTime<Utc>) -> String {
    let stamp = now.to_rfc3339_opts(SecondsFormat::Millis, true);
    format!("nutrition_report_{stamp}.txt")
}
