//! `creeds build` command implementation.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use creeds_config::{CliSettings, Config, SiteConfig};
use creeds_renderer::RenderOptions;
use creeds_site::{BuildConfig, StaticSiteBuilder};
use creeds_store::Store;
use creeds_store_fs::FsStore;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// JSON data directory (overrides config).
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Output directory for the generated site (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover creeds.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl BuildArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            data_dir: self.data_dir,
            output_dir: self.output_dir,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let data_dir = &config.convert_resolved.data_dir;
        let output_dir = &config.site_resolved.output_dir;

        output.info(&format!("Data: {}", data_dir.display()));
        output.info(&format!("Output: {}", output_dir.display()));

        let store: Arc<dyn Store> = Arc::new(FsStore::new(data_dir.clone()));
        let builder = StaticSiteBuilder::new(store, build_config(&config.site_resolved));
        let report = builder.build(output_dir)?;

        for id in &report.placeholders {
            output.warning(&format!("{id}: unrecognized record type"));
        }
        for failed in &report.failed {
            output.warning(&format!("{}: {}", failed.id, failed.error));
        }

        let total = report.pages.len() + report.failed.len();
        if !report.is_success() {
            return Err(CliError::Partial {
                failed: report.failed.len(),
                total,
                what: "pages",
            });
        }

        output.success(&format!(
            "Built {} pages to {}",
            report.pages.len(),
            output_dir.display()
        ));
        Ok(())
    }
}

/// Site builder configuration from resolved configuration.
fn build_config(site: &SiteConfig) -> BuildConfig {
    let defaults = RenderOptions::default();
    BuildConfig {
        site_title: site.title.clone(),
        render: RenderOptions {
            thesis_documents: site
                .thesis_documents
                .clone()
                .unwrap_or(defaults.thesis_documents),
        },
    }
}
