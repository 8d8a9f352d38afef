use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{DateTime, FixedOffset, Local};
use clap::Parser;
use tracing::info;

use obsbind_core::{BindingEngine, ResolutionContext, StepSequencer};

use crate::config::{ImportConfig, ScriptedAnswers};

/// Bind a CSV file against an import configuration
#[derive(Debug, Parser)]
pub struct ImportCommand {
    /// Path to the import configuration YAML file
    #[arg(value_name = "CONFIG")]
    pub config_path: PathBuf,

    /// Path to the CSV data file
    #[arg(value_name = "DATA")]
    pub data_path: PathBuf,

    /// Write the bound observations to this file instead of stdout
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Reference time (RFC 3339) filling unset timestamp fields;
    /// defaults to now
    #[arg(long, value_name = "TIME")]
    pub reference_time: Option<String>,
}

impl ImportCommand {
    pub fn execute(&self) -> Result<i32> {
        let config = load_config(&self.config_path)?;
        let rows = read_csv(&self.data_path)?;
        info!(
            rows = rows.len(),
            columns = config.columns.len(),
            "loaded table"
        );

        let table = config.build_table(rows);
        let catalog = config.build_catalog();
        let context = ResolutionContext::new(table, catalog, config.decimal_separator);

        let mut sequencer = StepSequencer::new(BindingEngine::new(context));
        let mut answers = ScriptedAnswers::new(config.answers);
        let mut answered = 0usize;
        while let Some(unit) = sequencer.next_unit()? {
            let Some(answer) = answers.answer(&unit) else {
                bail!("no scripted answer for outstanding demand: {unit:?}");
            };
            sequencer.submit(&unit, answer)?;
            answered += 1;
        }
        info!(answered, "resolution complete");

        let engine = sequencer.into_engine();
        let reference = self.reference_time()?;
        let observations = engine.observations(&reference)?;

        let rendered = serde_json::to_string_pretty(&observations)?;
        match &self.output {
            Some(path) => fs::write(path, rendered)
                .with_context(|| format!("cannot write {}", path.display()))?,
            None => println!("{rendered}"),
        }
        Ok(0)
    }

    fn reference_time(&self) -> Result<DateTime<FixedOffset>> {
        match &self.reference_time {
            Some(raw) => DateTime::parse_from_rfc3339(raw)
                .with_context(|| format!("invalid reference time '{raw}'")),
            None => Ok(Local::now().fixed_offset()),
        }
    }
}

fn load_config(path: &Path) -> Result<ImportConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("cannot read configuration {}", path.display()))?;
    serde_yaml::from_str(&raw)
        .with_context(|| format!("invalid configuration {}", path.display()))
}

fn read_csv(path: &Path) -> Result<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("cannot read data file {}", path.display()))?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}
