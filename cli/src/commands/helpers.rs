use std::process;

use serde::Serialize;

use nutrigram_core::chart::AxisDomain;
use nutrigram_core::state::{FetchError, FetchState};

const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

/// Percentage label for a progress gauge. Values above 100 render in red so
/// an overshoot is visible at a glance.
pub(crate) fn percent_label(percent: i64) -> String {
    if percent > 100 {
        format!("{RED}{percent}%{RESET}")
    } else {
        format!("{percent}%")
    }
}

/// `[████████░░░░] 67%`. Fill is capped at the gauge width, the label is not.
#[allow(clippy::cast_sign_loss)]
pub(crate) fn gauge(percent: i64, width: usize) -> String {
    let filled = (percent.clamp(0, 100) as usize * width) / 100;
    let bar: String = "█".repeat(filled) + &"░".repeat(width - filled);
    format!("[{bar}] {}", percent_label(percent))
}

/// `1800/2000` when a target exists, plain `1800` otherwise.
pub(crate) fn ratio_label(actual: f64, target: Option<f64>) -> String {
    match target {
        Some(t) => format!("{actual:.0}/{t:.0}"),
        None => format!("{actual:.0}"),
    }
}

/// One horizontal axis line with `marker` placed at the value's normalized
/// position inside the domain.
#[allow(clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub(crate) fn plot_row(domain: &AxisDomain, value: f64, width: usize, marker: char) -> String {
    let pos = (domain.position(value) * (width.saturating_sub(1)) as f64).round() as usize;
    let mut row = vec!['·'; width];
    row[pos] = marker;
    row.into_iter().collect()
}

pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let kept: String = s.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}

pub(crate) fn json_error(message: &str) -> String {
    #[derive(Serialize)]
    struct CliError<'a> {
        error: &'a str,
    }
    serde_json::to_string(&CliError { error: message })
        .unwrap_or_else(|_| format!("{{\"error\":\"{message}\"}}"))
}

/// Prints the view's fixed error message (plus the transport detail for
/// diagnostics) and exits. Errors never propagate past their own view.
pub(crate) fn render_failure(err: &FetchError, json: bool) -> ! {
    if json {
        println!("{}", json_error(err.user_message()));
    } else {
        eprintln!("{}", err.user_message());
    }
    if let FetchError::Transport(detail) = err {
        eprintln!("  ({detail})");
    }
    process::exit(1);
}

/// Unwraps a settled view state, diverging on anything but `Data`.
pub(crate) fn take_data<T>(state: FetchState<T>, json: bool) -> T {
    match state {
        FetchState::Data(value) => value,
        FetchState::Error(err) => render_failure(&err, json),
        FetchState::Loading => {
            render_failure(&FetchError::Transport("view never settled".to_string()), json)
        }
    }
}
