use std::path::{Path, PathBuf};

use anyhow::Context;
use care_dashboard::report::{self, format_value};
use care_dashboard::{Aggregation, CaregiverMode, Dimension, Session, Tab};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "care-dashboard")]
#[command(about = "Care visit dashboard over care-management exports", long_about = None)]
struct Cli {
    /// Default log level when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show dataset size, date range and filter options
    Summary {
        #[arg(long)]
        input: PathBuf,
    },
    /// Compute one dashboard tab
    View {
        #[arg(long)]
        input: PathBuf,
        #[arg(long, value_enum, default_value_t = TabArg::Quality)]
        tab: TabArg,
        #[arg(long, value_enum, default_value_t = ModeArg::Total)]
        mode: ModeArg,
        #[command(flatten)]
        selection: Selection,
        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Generate a markdown report covering every tab
    Report {
        #[arg(long)]
        input: PathBuf,
        #[arg(long, value_enum, default_value_t = ModeArg::Total)]
        mode: ModeArg,
        #[command(flatten)]
        selection: Selection,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
}

/// Restricts a dimension to the listed values; omitted dimensions keep everything.
#[derive(clap::Args)]
struct Selection {
    #[arg(long)]
    resident: Vec<String>,
    #[arg(long)]
    caregiver: Vec<String>,
    #[arg(long)]
    care_label: Vec<String>,
    #[arg(long)]
    status: Vec<String>,
}

impl Selection {
    fn apply(self, session: &mut Session) {
        let dimensions = [
            (Dimension::Resident, self.resident),
            (Dimension::Caregiver, self.caregiver),
            (Dimension::CareLabel, self.care_label),
            (Dimension::Status, self.status),
        ];
        for (dimension, values) in dimensions {
            if !values.is_empty() {
                session.filter_mut().select(dimension, values);
            }
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum TabArg {
    Quality,
    Caregivers,
    Residents,
    Operational,
}

impl From<TabArg> for Tab {
    fn from(value: TabArg) -> Self {
        match value {
            TabArg::Quality => Tab::Quality,
            TabArg::Caregivers => Tab::Caregivers,
            TabArg::Residents => Tab::Residents,
            TabArg::Operational => Tab::Operational,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Total,
    Average,
}

impl From<ModeArg> for CaregiverMode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Total => CaregiverMode::Total,
            ModeArg::Average => CaregiverMode::Average,
        }
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load(input: &Path) -> anyhow::Result<Session> {
    Session::from_path(input)
        .with_context(|| format!("failed to load care export {}", input.display()))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match cli.command {
        Commands::Summary { input } => {
            let session = load(&input)?;
            println!(
                "{} records loaded from {}.",
                session.records().len(),
                input.display()
            );
            match session.date_range() {
                Some((start, end)) => println!("Activity from {start} to {end}."),
                None => println!("No dated activity."),
            }
            for field in session.columns().unresolved() {
                println!("Column not found: {field:?}");
            }
            for dimension in Dimension::ALL {
                let options = session.filter().options(dimension);
                println!("{dimension:?}: {} values", options.len());
                for option in options {
                    println!("  - {option}");
                }
            }
        }
        Commands::View {
            input,
            tab,
            mode,
            selection,
            json,
        } => {
            let mut session = load(&input)?;
            selection.apply(&mut session);
            let tab = Tab::from(tab);
            let result = session.view(tab, mode.into());

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
                return Ok(());
            }

            match result {
                Aggregation::NoData => println!("No data matches the selected filters."),
                Aggregation::Data(view) => {
                    println!("{}:", tab.title());
                    for (index, label) in view.chart.labels.iter().enumerate() {
                        let values: Vec<String> = view
                            .chart
                            .series
                            .iter()
                            .map(|series| {
                                format!("{} {}", series.name, format_value(series.values[index]))
                            })
                            .collect();
                        println!("- {label}: {}", values.join(", "));
                    }
                    println!();
                    println!("Top entries:");
                    for entry in &view.ranked {
                        println!("- {}: {}", entry.label, format_value(entry.value));
                    }
                }
            }
        }
        Commands::Report {
            input,
            mode,
            selection,
            out,
        } => {
            let mut session = load(&input)?;
            selection.apply(&mut session);
            let report = report::build_report(&session, mode.into());
            std::fs::write(&out, report)
                .with_context(|| format!("failed to write {}", out.display()))?;
            info!(out = %out.display(), "report written");
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}
