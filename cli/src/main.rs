mod api;
mod commands;
mod config;

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::api::ApiClient;
use crate::commands::{
    cmd_achievements, cmd_analytics, cmd_export, cmd_report_generate, cmd_report_show, cmd_summary,
};
use crate::config::Config;

#[derive(Parser)]
#[command(
    name = "nutrigram",
    version,
    about = "Nutrition dashboards in your terminal",
    long_about = "\n\n  ███╗   ██╗ ██████╗\n  ████╗  ██║██╔════╝\n  ██╔██╗ ██║██║  ███╗\n  ██║╚██╗██║██║   ██║\n  ██║ ╚████║╚██████╔╝\n  ╚═╝  ╚═══╝ ╚═════╝\n  nutrigram — your nutrition, at a glance.\n"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show today's totals, progress toward your norms, and the meal log
    Summary {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Weekly nutrition and weight analytics
    Analytics {
        /// How many days to include
        #[arg(short, long, default_value = "7")]
        days: u32,
        /// How many weight records to fetch
        #[arg(long, default_value = "15")]
        weight_limit: u32,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show achievements and unlock progress
    Achievements {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// AI-generated reports
    Report {
        #[command(subcommand)]
        command: ReportCommands,
    },
    /// Download your nutrition report as a text file
    Export {
        /// Destination path (default: nutrition_report_<timestamp>.txt)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum ReportCommands {
    /// Show the latest report(s)
    Show {
        /// Report type: quality or nutrition (default: both)
        #[arg(short = 't', long = "type")]
        report_type: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Generate a fresh report
    Generate {
        /// Report type: quality or nutrition
        #[arg(short = 't', long = "type")]
        report_type: String,
        /// How many recent meals the report should cover
        #[arg(short, long, default_value = "10")]
        limit: u32,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let api = ApiClient::new(&config.api_url);
    // Resolved once here; every view receives it rather than re-deriving it.
    let identity = config.telegram_id;

    match cli.command {
        Commands::Summary { json } => cmd_summary(&api, identity, json).await,
        Commands::Analytics {
            days,
            weight_limit,
            json,
        } => cmd_analytics(&api, identity, days, weight_limit, json).await,
        Commands::Achievements { json } => cmd_achievements(&api, identity, json).await,
        Commands::Report { command } => match command {
            ReportCommands::Show { report_type, json } => {
                cmd_report_show(&api, identity, report_type.as_deref(), json).await
            }
            ReportCommands::Generate {
                report_type,
                limit,
                json,
            } => cmd_report_generate(&api, identity, &report_type, limit, json).await,
        },
        Commands::Export { output, json } => cmd_export(&api, identity, output, json).await,
    }
}
