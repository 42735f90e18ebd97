//! `creeds convert` command implementation.

use std::path::PathBuf;

use clap::Args;
use creeds_config::{CliSettings, Config, ConvertConfig};
use creeds_convert::{ConvertOptions, convert};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the convert command.
#[derive(Args)]
pub(crate) struct ConvertArgs {
    /// YAML source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// JSON data directory to write records into (overrides config).
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Parse and normalize every file without writing.
    #[arg(long)]
    dry_run: bool,

    /// Path to configuration file (default: auto-discover creeds.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl ConvertArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            data_dir: self.data_dir,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let convert_config = &config.convert_resolved;

        output.info(&format!("Source: {}", convert_config.source_dir.display()));
        output.info(&format!("Data: {}", convert_config.data_dir.display()));
        if self.dry_run {
            output.warning("Dry run: no files will be written");
        }

        let options = convert_options(convert_config, self.dry_run);
        let report = convert(
            &convert_config.source_dir,
            &convert_config.data_dir,
            &options,
        )?;

        for failed in &report.failed {
            output.warning(&format!(
                "Skipped {}: {}",
                failed.source.display(),
                failed.error
            ));
        }

        for path in &report.uncategorized {
            output.warning(&format!(
                "{} is not inside a category folder and won't be listed",
                path.display()
            ));
        }

        let total = report.converted.len() + report.failed.len();
        if !report.is_success() {
            return Err(CliError::Partial {
                failed: report.failed.len(),
                total,
                what: "files",
            });
        }

        output.success(&format!("Converted {total} files"));
        Ok(())
    }
}

/// Converter options from resolved configuration.
fn convert_options(config: &ConvertConfig, dry_run: bool) -> ConvertOptions {
    let defaults = ConvertOptions::default();
    ConvertOptions {
        strip_fields: config
            .strip_fields
            .clone()
            .unwrap_or(defaults.strip_fields),
        dry_run,
    }
}
