use std::process;

use anyhow::Result;

use nutrigram_core::chart;
use nutrigram_core::models::TelegramId;
use nutrigram_core::state;

use crate::api::ApiClient;

use super::helpers::{gauge, take_data};

pub(crate) async fn cmd_achievements(
    api: &ApiClient,
    identity: Option<TelegramId>,
    json: bool,
) -> Result<()> {
    let state = state::load(identity, |id| async move {
        Ok(api.achievements(id).await?)
    })
    .await;

    let achievements = take_data(state, json);
    let total = achievements.len();
    let progress = chart::unlock_progress(&achievements);
    let (unlocked, locked) = chart::partition_by_unlock(achievements);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "unlocked": unlocked,
                "locked": locked,
                "unlocked_count": unlocked.len(),
                "total": total,
                "progress": progress,
            }))?
        );
        return Ok(());
    }

    if total == 0 {
        eprintln!("No achievements available");
        process::exit(2);
    }

    println!("=== Achievements ===\n");
    let percent = (progress * 100.0).round() as i64;
    let count = unlocked.len();
    println!("  Progress ({count}/{total})  {}", gauge(percent, 24));

    println!("\n  Unlocked:");
    if unlocked.is_empty() {
        println!("    (none yet)");
    }
    for a in &unlocked {
        let name = &a.name;
        let description = &a.description;
        println!("    ✔ {name} — {description}");
    }

    println!("\n  Upcoming:");
    if locked.is_empty() {
        println!("    (all unlocked)");
    }
    for a in &locked {
        let name = &a.name;
        let description = &a.description;
        println!("    · {name} — {description}");
    }

    Ok(())
}
