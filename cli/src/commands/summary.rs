use anyhow::Result;

use nutrigram_core::chart;
use nutrigram_core::models::TelegramId;
use nutrigram_core::state;

use crate::api::ApiClient;

use super::helpers::{gauge, ratio_label, take_data, truncate};

pub(crate) async fn cmd_summary(
    api: &ApiClient,
    identity: Option<TelegramId>,
    json: bool,
) -> Result<()> {
    let state = state::load(identity, |id| async move {
        Ok(api.daily_summary(id).await?)
    })
    .await;

    let mut summary = take_data(state, json);
    chart::sort_logs_newest_first(&mut summary.food_logs);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("=== Today ===\n");

    let target = summary.user_nutrition;
    let metrics = [
        ("Calories", summary.total_calories, target.map(|n| n.calories), "kcal"),
        ("Proteins", summary.total_proteins, target.map(|n| n.proteins), "g"),
        ("Fats", summary.total_fats, target.map(|n| n.fats), "g"),
        ("Carbs", summary.total_carbohydrates, target.map(|n| n.carbohydrates), "g"),
    ];
    for (name, actual, norm, unit) in metrics {
        let percent = chart::percent_of_target(actual, norm.unwrap_or(0.0));
        let bar = gauge(percent, 20);
        let ratio = ratio_label(actual, norm);
        println!("  {name:<9} {bar}  {ratio} {unit}");
    }

    if let Some(norm) = target {
        let cal = chart::remaining_toward_target(summary.total_calories, norm.calories);
        let p = chart::remaining_toward_target(summary.total_proteins, norm.proteins);
        let f = chart::remaining_toward_target(summary.total_fats, norm.fats);
        let c = chart::remaining_toward_target(summary.total_carbohydrates, norm.carbohydrates);
        println!("\n  Remaining: {cal:.0} kcal | P:{p:.0}g F:{f:.0}g C:{c:.0}g");
    }

    if summary.food_logs.is_empty() {
        eprintln!("\nNo meals logged today");
        return Ok(());
    }

    println!("\nMeals:");
    for meal in &summary.food_logs {
        let time = meal.date_added.format("%H:%M");
        let rating = &meal.rating;
        let name = truncate(&meal.food_name, 40);
        let cal = meal.calories;
        let p = meal.proteins;
        let f = meal.fats;
        let c = meal.carbohydrates;
        println!("  {time}  {rating}  {name} — {cal:.0} kcal | P:{p:.0}g F:{f:.0}g C:{c:.0}g");
    }

    Ok(())
}
