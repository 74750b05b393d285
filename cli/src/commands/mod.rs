mod achievements;
mod analytics;
mod export;
mod helpers;
mod report;
mod summary;

pub(crate) use achievements::cmd_achievements;
pub(crate) use analytics::cmd_analytics;
pub(crate) use export::cmd_export;
pub(crate) use report::{cmd_report_generate, cmd_report_show};
pub(crate) use summary::cmd_summary;
