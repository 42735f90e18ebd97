//! Environment variable expansion for configuration strings.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in `value`.
///
/// `field` names the configuration key for error messages.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    shellexpand::env(value)
        .map(std::borrow::Cow::into_owned)
        .map_err(|e| ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} not set", e.var_name),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_plain_value_unchanged() {
        assert_eq!(expand_env("data", "convert.data_dir").unwrap(), "data");
    }

    #[test]
    fn test_expand_default_when_unset() {
        let value = expand_env("${CREEDS_TEST_SURELY_UNSET:-fallback}", "site.title").unwrap();
        assert_eq!(value, "fallback");
    }

    #[test]
    fn test_expand_unset_is_error() {
        let err = expand_env("${CREEDS_TEST_SURELY_UNSET}", "site.title").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { ref field, .. } if field == "site.title"));
        assert!(err.to_string().contains("CREEDS_TEST_SURELY_UNSET"));
    }
}
