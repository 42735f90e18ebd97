//! CLI error types.

use creeds_config::ConfigError;
use creeds_convert::ConvertError;
use creeds_site::BuildError;
use creeds_store::StoreError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Convert(#[from] ConvertError),

    #[error("{0}")]
    Build(#[from] BuildError),

    #[error("{0}")]
    Store(#[from] StoreError),

    /// The batch finished but some items failed.
    #[error("{failed} of {total} {what} failed")]
    Partial {
        failed: usize,
        total: usize,
        what: &'static str,
    },
}
