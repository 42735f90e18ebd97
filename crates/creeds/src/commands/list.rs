//! `creeds list` command implementation.

use std::path::PathBuf;

use clap::Args;
use creeds_config::{CliSettings, Config};
use creeds_store::{DocumentRef, Store};
use creeds_store_fs::FsStore;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the list command.
#[derive(Args)]
pub(crate) struct ListArgs {
    /// JSON data directory (overrides config).
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover creeds.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl ListArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            data_dir: self.data_dir,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let store = FsStore::new(config.convert_resolved.data_dir.clone());
        let documents = store.list()?;

        for (category, ids) in group_by_category(&documents) {
            output.heading(category);
            for id in ids {
                output.info(&format!("  {id}"));
            }
        }
        output.success(&format!("{} documents", documents.len()));
        Ok(())
    }
}

/// Group documents by category, keeping store order.
fn group_by_category(documents: &[DocumentRef]) -> Vec<(&str, Vec<&str>)> {
    let mut groups: Vec<(&str, Vec<&str>)> = Vec::new();
    for doc in documents {
        if let Some((category, ids)) = groups.last_mut()
            && *category == doc.category
        {
            ids.push(doc.id.as_str());
            continue;
        }
        groups.push((doc.category.as_str(), vec![doc.id.as_str()]));
    }
    groups
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn doc(category: &str, id: &str) -> DocumentRef {
        DocumentRef {
            category: category.to_owned(),
            id: id.to_owned(),
        }
    }

    #[test]
    fn test_group_by_category() {
        let documents = vec![
            doc("catechisms", "heidelberg-catechism"),
            doc("catechisms", "westminster-shorter-catechism"),
            doc("creeds", "apostles-creed"),
        ];

        let groups = group_by_category(&documents);

        assert_eq!(
            groups,
            vec![
                (
                    "catechisms",
                    vec!["heidelberg-catechism", "westminster-shorter-catechism"]
                ),
                ("creeds", vec!["apostles-creed"]),
            ]
        );
    }

    #[test]
    fn test_group_by_category_empty() {
        assert!(group_by_category(&[]).is_empty());
    }
}
