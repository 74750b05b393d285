use std::process;

use anyhow::Result;
use serde_json::Value;

use nutrigram_core::models::{
    AiReport, GenerateReportRequest, ReportType, TelegramId, parse_report_type,
};
use nutrigram_core::state::{self, FetchError, FetchState};

use crate::api::ApiClient;

use super::helpers::take_data;

pub(crate) async fn cmd_report_show(
    api: &ApiClient,
    identity: Option<TelegramId>,
    report_type: Option<&str>,
    json: bool,
) -> Result<()> {
    // Each report type owns an independent state; with no type given, both
    // lookups run concurrently and render their own outcome.
    let states: Vec<(ReportType, FetchState<AiReport>)> = match report_type {
        Some(raw) => {
            let requested = parse_report_type(raw)?;
            vec![(requested, load_report(api, identity, requested).await)]
        }
        None => {
            let (quality, nutrition) = tokio::join!(
                load_report(api, identity, ReportType::Quality),
                load_report(api, identity, ReportType::Nutrition),
            );
            vec![
                (ReportType::Quality, quality),
                (ReportType::Nutrition, nutrition),
            ]
        }
    };

    let mut hard_failure = false;

    if json {
        let mut obj = serde_json::Map::new();
        for (report_type, state) in &states {
            let key = match report_type {
                ReportType::Quality => "quality_report",
                ReportType::Nutrition => "nutrition_report",
            };
            let value = match state {
                FetchState::Data(report) => serde_json::to_value(report)?,
                FetchState::Error(FetchError::NotFound) | FetchState::Loading => Value::Null,
                FetchState::Error(err) => {
                    hard_failure = true;
                    serde_json::json!({ "error": err.user_message() })
                }
            };
            obj.insert(key.to_string(), value);
        }
        println!("{}", serde_json::to_string_pretty(&Value::Object(obj))?);
    } else {
        for (report_type, state) in &states {
            if render_section(*report_type, state) {
                hard_failure = true;
            }
        }
    }

    if hard_failure {
        process::exit(1);
    }
    Ok(())
}

pub(crate) async fn cmd_report_generate(
    api: &ApiClient,
    identity: Option<TelegramId>,
    report_type: &str,
    limit: u32,
    json: bool,
) -> Result<()> {
    let report_type = parse_report_type(report_type)?;

    let state = state::load(identity, |id| async move {
        let request = GenerateReportRequest {
            telegram_id: id,
            report_type,
            limit,
        };
        Ok(api.generate_report(&request).await?)
    })
    .await;

    let report = take_data(state, json);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_report(&report);
    Ok(())
}

async fn load_report(
    api: &ApiClient,
    identity: Option<TelegramId>,
    report_type: ReportType,
) -> FetchState<AiReport> {
    state::load(identity, |id| async move {
        match api.last_report(id, report_type).await? {
            Some(report) => Ok(report),
            None => Err(FetchError::NotFound),
        }
    })
    .await
}

/// Renders one report section; returns true on a hard failure (anything but
/// data or the instructive not-found message).
fn render_section(report_type: ReportType, state: &FetchState<AiReport>) -> bool {
    println!("=== {} ===\n", report_type.title());
    match state {
        FetchState::Data(report) => {
            print_body(report);
            false
        }
        FetchState::Error(FetchError::NotFound) => {
            println!("{}\n", FetchError::NotFound.user_message());
            false
        }
        FetchState::Error(err) => {
            eprintln!("{}\n", err.user_message());
            true
        }
        FetchState::Loading => true,
    }
}

fn print_report(report: &AiReport) {
    println!("=== {} ===\n", report.report_type.title());
    print_body(report);
}

fn print_body(report: &AiReport) {
    let created = report.created_at.format("%Y-%m-%d %H:%M");
    println!("Generated: {created}\n");
    println!("{}\n", report.content.trim_end());
}
