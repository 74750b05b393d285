use anyhow::Result;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

use nutrigram_core::chart;
use nutrigram_core::models::{PeriodicSummary, TelegramId, WeightHistory};
use nutrigram_core::state;

use crate::api::ApiClient;

use super::helpers::{plot_row, ratio_label, take_data};

const BAR_WIDTH: usize = 30;
const PLOT_WIDTH: usize = 31;

pub(crate) async fn cmd_analytics(
    api: &ApiClient,
    identity: Option<TelegramId>,
    days: u32,
    weight_limit: u32,
    json: bool,
) -> Result<()> {
    // Both datasets load concurrently; the view renders once both settle.
    let (nutrition_state, weight_state) = tokio::join!(
        state::load(identity, |id| async move {
            Ok(api.periodic_summary(id, days).await?)
        }),
        state::load(identity, |id| async move {
            Ok(api.weight_history(id, weight_limit).await?)
        }),
    );

    let nutrition = take_data(nutrition_state, json);
    let mut weight = take_data(weight_state, json);
    chart::sort_weights_oldest_first(&mut weight.records);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "nutrition": nutrition,
                "weight": weight,
            }))?
        );
        return Ok(());
    }

    render_nutrition(&nutrition, days);
    render_weight(&weight);

    Ok(())
}

fn render_nutrition(nutrition: &PeriodicSummary, days: u32) {
    println!("=== Last {days} days ===\n");

    if nutrition.days.is_empty() {
        eprintln!("No nutrition entries in the last {days} days\n");
        return;
    }

    #[derive(Tabled)]
    struct DayRow {
        #[tabled(rename = "Date")]
        date: String,
        #[tabled(rename = "Calories")]
        calories: String,
        #[tabled(rename = "Proteins")]
        proteins: String,
        #[tabled(rename = "Fats")]
        fats: String,
        #[tabled(rename = "Carbs")]
        carbs: String,
    }

    let rows: Vec<DayRow> = nutrition
        .days
        .iter()
        .map(|d| DayRow {
            date: d.date.format("%Y-%m-%d").to_string(),
            calories: format!("{:.0}", d.total_calories),
            proteins: format!("{:.0}g", d.total_proteins),
            fats: format!("{:.0}g", d.total_fats),
            carbs: format!("{:.0}g", d.total_carbohydrates),
        })
        .collect();

    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
        .to_string();
    println!("{table}");

    // Calorie bars share one axis: the largest value (or the norm, when it
    // is higher) plus headroom, so the norm line always fits on the chart.
    let data_max = nutrition
        .days
        .iter()
        .map(|d| d.total_calories)
        .fold(0.0, f64::max);
    let norm = nutrition.user_nutrition.map(|n| n.calories);
    let axis_max = chart::scaled_axis_max(data_max.max(norm.unwrap_or(0.0)));

    if axis_max > 0.0 {
        println!("\n  Calories (axis to {axis_max:.0} kcal)");
        for day in &nutrition.days {
            let filled = bar_cells(day.total_calories, axis_max);
            let bar: String = "█".repeat(filled) + &"░".repeat(BAR_WIDTH - filled);
            let date = day.date.format("%m-%d");
            let cal = day.total_calories;
            println!("  {date}  {bar}  {cal:.0}");
        }
        if let Some(norm) = norm {
            let marker = bar_cells(norm, axis_max);
            println!("  norm   {}  {norm:.0}", ruler(marker));
        }
    }

    println!("\n  Averages (non-empty days):");
    let target = nutrition.user_nutrition;
    let strip = [
        ("Calories", nutrition.average_calories, target.map(|n| n.calories), "kcal"),
        ("Proteins", nutrition.average_proteins, target.map(|n| n.proteins), "g"),
        ("Fats", nutrition.average_fats, target.map(|n| n.fats), "g"),
        ("Carbs", nutrition.average_carbohydrates, target.map(|n| n.carbohydrates), "g"),
    ];
    for (name, avg, norm, unit) in strip {
        let ratio = ratio_label(avg, norm);
        println!("    {name:<9} {ratio} {unit}");
    }
    println!();
}

fn render_weight(weight: &WeightHistory) {
    println!("=== Weight ===\n");

    if weight.records.is_empty() {
        eprintln!("No weight entries yet");
        return;
    }

    let values: Vec<f64> = weight.records.iter().map(|r| r.weight).collect();
    if let Some(domain) = chart::padded_domain(&values, weight.target_weight) {
        let lo = domain.lower;
        let hi = domain.upper;
        println!("  axis: {lo:.1} .. {hi:.1} kg");
        for record in &weight.records {
            let date = record.date.format("%Y-%m-%d");
            let kg = record.weight;
            let row = plot_row(&domain, record.weight, PLOT_WIDTH, '●');
            println!("  {date}  {kg:>5.1} kg  {row}");
        }
        if let Some(target) = weight.target_weight {
            let row = plot_row(&domain, target, PLOT_WIDTH, '▼');
            println!("  target      {target:>5.1} kg  {row}");
        }
    }
}

#[allow(clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn bar_cells(value: f64, axis_max: f64) -> usize {
    (((value / axis_max) * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH)
}

/// A dashed line with one tick, marking the norm on the bar axis.
fn ruler(position: usize) -> String {
    let mut row = vec!['╌'; BAR_WIDTH];
    if let Some(cell) = row.get_mut(position.min(BAR_WIDTH - 1)) {
        *cell = '┊';
    }
    row.into_iter().collect()
}
