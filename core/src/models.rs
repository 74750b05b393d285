use std::fmt;

use anyhow::{Result, bail};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Numeric user id handed over by the Mini-App host bridge.
///
/// Treated as trusted input; it is resolved once at startup and passed
/// explicitly into every view. No view derives it on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TelegramId(pub i64);

impl fmt::Display for TelegramId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One logged meal. Timestamps are UTC without an offset suffix on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodLog {
    pub food_name: String,
    pub calories: f64,
    pub proteins: f64,
    pub fats: f64,
    pub carbohydrates: f64,
    pub date_added: NaiveDateTime,
    pub rating: String,
}

/// The user's configured daily norms (`user_nutrition` on the wire).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct NutritionTarget {
    pub calories: f64,
    pub proteins: f64,
    pub fats: f64,
    pub carbohydrates: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailySummary {
    pub total_calories: f64,
    pub total_proteins: f64,
    pub total_fats: f64,
    pub total_carbohydrates: f64,
    pub food_logs: Vec<FoodLog>,
    pub user_nutrition: Option<NutritionTarget>,
}

/// Totals for a single day of the periodic view. The backend includes the
/// day's food logs too; the analytics view only needs the totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub total_calories: f64,
    pub total_proteins: f64,
    pub total_fats: f64,
    pub total_carbohydrates: f64,
    #[serde(default)]
    pub food_logs: Vec<FoodLog>,
}

/// Per-day totals over a window, plus averages the backend computes over
/// the non-empty days only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodicSummary {
    pub days: Vec<DaySummary>,
    pub user_nutrition: Option<NutritionTarget>,
    pub average_calories: f64,
    pub average_proteins: f64,
    pub average_fats: f64,
    pub average_carbohydrates: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WeightRecord {
    pub date: NaiveDateTime,
    pub weight: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightHistory {
    pub records: Vec<WeightRecord>,
    pub target_weight: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Achievement {
    pub code: String,
    pub name: String,
    pub description: String,
    pub icon_url: Option<String>,
    /// Unlock timestamp as the backend emits it; `None` means still locked.
    pub unlocked_at: Option<String>,
}

impl Achievement {
    #[must_use]
    pub fn is_unlocked(&self) -> bool {
        self.unlocked_at.is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AchievementsResponse {
    pub achievements: Vec<Achievement>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportType {
    #[serde(rename = "quality-report")]
    Quality,
    #[serde(rename = "nutrition-report")]
    Nutrition,
}

impl ReportType {
    /// Wire name of the report type, as the API expects it.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Quality => "quality-report",
            Self::Nutrition => "nutrition-report",
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Quality => "Meal quality analysis",
            Self::Nutrition => "Macro balance analysis",
        }
    }
}

pub fn parse_report_type(s: &str) -> Result<ReportType> {
    match s.to_lowercase().as_str() {
        "quality" | "quality-report" => Ok(ReportType::Quality),
        "nutrition" | "nutrition-report" => Ok(ReportType::Nutrition),
        _ => bail!("Invalid report type '{s}'. Use 'quality' or 'nutrition'"),
    }
}

/// An AI-generated markdown narrative. At most one "latest" report per type
/// is ever displayed; generating a new one replaces it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiReport {
    pub id: i64,
    pub report_type: ReportType,
    pub content: String,
    pub created_at: NaiveDateTime,
}

/// Body of the one write request the client issues.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateReportRequest {
    pub telegram_id: TelegramId,
    pub report_type: ReportType,
    pub limit: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_daily_summary() {
        // Extra backend fields (fiber, amount, entry_uuid, ...) must be ignored.
        let raw = r#"{
            "total_calories": 1800.0,
            "total_proteins": 90.5,
            "total_fats": 60.0,
            "total_carbohydrates": 210.0,
            "food_logs": [
                {
                    "food_name": "Oatmeal with berries",
                    "calories": 320.0,
                    "proteins": 11.0,
                    "fats": 6.5,
                    "carbohydrates": 54.0,
                    "fiber": 7.2,
                    "amount": 250,
                    "date_added": "2026-08-05T08:15:00",
                    "is_saved": true,
                    "message_id": 42,
                    "entry_uuid": "7c0e",
                    "rating": "🟢"
                }
            ],
            "user_nutrition": {
                "calories": 2000.0,
                "proteins": 120.0,
                "fats": 65.0,
                "carbohydrates": 250.0
            }
        }"#;

        let summary: DailySummary = serde_json::from_str(raw).unwrap();
        assert_eq!(summary.food_logs.len(), 1);
        assert_eq!(summary.food_logs[0].food_name, "Oatmeal with berries");
        assert_eq!(summary.food_logs[0].rating, "🟢");
        let target = summary.user_nutrition.unwrap();
        assert!((target.calories - 2000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_daily_summary_without_target() {
        let raw = r#"{
            "total_calories": 0.0,
            "total_proteins": 0.0,
            "total_fats": 0.0,
            "total_carbohydrates": 0.0,
            "food_logs": [],
            "user_nutrition": null
        }"#;

        let summary: DailySummary = serde_json::from_str(raw).unwrap();
        assert!(summary.food_logs.is_empty());
        assert!(summary.user_nutrition.is_none());
    }

    #[test]
    fn test_parse_periodic_summary() {
        let raw = r#"{
            "days": [
                {
                    "date": "2026-08-04",
                    "total_calories": 1750.0,
                    "total_proteins": 88.0,
                    "total_fats": 58.0,
                    "total_carbohydrates": 200.0,
                    "food_logs": []
                },
                {
                    "date": "2026-08-05",
                    "total_calories": 1800.0,
                    "total_proteins": 90.0,
                    "total_fats": 60.0,
                    "total_carbohydrates": 210.0
                }
            ],
            "user_nutrition": null,
            "average_calories": 1775.0,
            "average_proteins": 89.0,
            "average_fats": 59.0,
            "average_carbohydrates": 205.0
        }"#;

        let summary: PeriodicSummary = serde_json::from_str(raw).unwrap();
        assert_eq!(summary.days.len(), 2);
        assert_eq!(
            summary.days[0].date,
            NaiveDate::from_ymd_opt(2026, 8, 4).unwrap()
        );
        assert!((summary.average_calories - 1775.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_weight_history() {
        let raw = r#"{
            "records": [
                {"date": "2026-08-01T07:00:00", "weight": 71.0},
                {"date": "2026-07-20T07:30:00", "weight": 70.2}
            ],
            "target_weight": 65.0
        }"#;

        let history: WeightHistory = serde_json::from_str(raw).unwrap();
        assert_eq!(history.records.len(), 2);
        assert_eq!(history.target_weight, Some(65.0));
    }

    #[test]
    fn test_parse_weight_history_no_target() {
        let raw = r#"{"records": [], "target_weight": null}"#;
        let history: WeightHistory = serde_json::from_str(raw).unwrap();
        assert!(history.records.is_empty());
        assert!(history.target_weight.is_none());
    }

    #[test]
    fn test_parse_achievements() {
        let raw = r#"{
            "achievements": [
                {
                    "code": "first_log",
                    "name": "First bite",
                    "description": "Log your first meal",
                    "icon_url": "/static/achievements/first_log.png",
                    "unlocked_at": "2026-07-01T12:00:00"
                },
                {
                    "code": "week_streak",
                    "name": "Full week",
                    "description": "Log meals seven days in a row",
                    "icon_url": null,
                    "unlocked_at": null
                }
            ]
        }"#;

        let response: AchievementsResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.achievements.len(), 2);
        assert!(response.achievements[0].is_unlocked());
        assert!(!response.achievements[1].is_unlocked());
    }

    #[test]
    fn test_parse_ai_report() {
        let raw = r###"{
            "id": 7,
            "report_type": "quality-report",
            "content": "## Summary\nMostly balanced meals.",
            "created_at": "2026-08-05T10:00:00"
        }"###;

        let report: AiReport = serde_json::from_str(raw).unwrap();
        assert_eq!(report.report_type, ReportType::Quality);
        assert!(report.content.starts_with("## Summary"));
    }

    #[test]
    fn test_parse_report_type() {
        assert_eq!(parse_report_type("quality").unwrap(), ReportType::Quality);
        assert_eq!(
            parse_report_type("nutrition-report").unwrap(),
            ReportType::Nutrition
        );
        assert_eq!(
            parse_report_type("NUTRITION").unwrap(),
            ReportType::Nutrition
        );
        assert!(parse_report_type("weekly").is_err());
    }

    #[test]
    fn test_generate_request_serialization() {
        let request = GenerateReportRequest {
            telegram_id: TelegramId(12345),
            report_type: ReportType::Nutrition,
            limit: 10,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["telegram_id"], 12345);
        assert_eq!(json["report_type"], "nutrition-report");
        assert_eq!(json["limit"], 10);
    }
}
