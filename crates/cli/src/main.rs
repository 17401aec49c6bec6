// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod session;

use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::{Result, eyre::Context};
use nomination_api::parse_record_json;
use nomination_domain::{DEFAULT_MIN_OFFSET_HOURS, ScheduleRecord, ValidationConfig};
use session::{SessionSummary, Step};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_log::AsTrace;

fn main() -> Result<()> {
    color_eyre::install()?;
    let args: Args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    let output: String = args.run()?;
    println!("{output}");
    Ok(())
}

/// Nomination CLI - replays ship nomination schedule form sessions
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Minimum number of hours between chained schedule fields
    #[arg(long, global = true, default_value_t = DEFAULT_MIN_OFFSET_HOURS)]
    min_offset_hours: i64,

    /// Keep the next field's calendar on the same day as the previous field
    #[arg(long, global = true)]
    no_next_day: bool,

    /// Run stored values through the offset rule when loading them
    #[arg(long, global = true)]
    strict_history: bool,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

#[derive(Clone, Debug, Subcommand)]
enum Command {
    /// Replay a JSON session script and print the resulting form state
    #[command(visible_alias = "r")]
    Replay {
        /// Path to a JSON array of steps
        script: PathBuf,
    },

    /// Load a stored record and report its schedule violations
    #[command(visible_alias = "c")]
    Check {
        /// Path to the record JSON
        record: PathBuf,
    },
}

impl Args {
    fn run(&self) -> Result<String> {
        let config: ValidationConfig = self.config();
        let summary: SessionSummary = match &self.command {
            Command::Replay { script } => {
                let steps: Vec<Step> = session::parse_script(&read(script)?)
                    .wrap_err_with(|| format!("invalid session script {}", script.display()))?;
                info!("Replaying {} step(s) from {}", steps.len(), script.display());
                session::replay(config, &steps)?
            }
            Command::Check { record } => {
                let record: ScheduleRecord = parse_record_json(&read(record)?)?;
                session::replay(config, &[Step::Load { record }, Step::Validate])?
            }
        };

        serde_json::to_string_pretty(&summary).wrap_err("failed to render session summary")
    }

    fn config(&self) -> ValidationConfig {
        ValidationConfig {
            min_offset_hours: self.min_offset_hours,
            allow_next_day: !self.no_next_day,
            preserve_historical_data: !self.strict_history,
            ..ValidationConfig::default()
        }
    }

    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).wrap_err_with(|| format!("failed to read {}", path.display()))
}
