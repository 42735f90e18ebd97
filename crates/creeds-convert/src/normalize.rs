//! YAML to JSON value conversion with presentational field stripping.

use serde_json::{Map, Number, Value as Json};
use serde_yaml::Value as Yaml;

/// Error returned when a YAML value has no JSON equivalent.
#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    /// Mapping key that can't be turned into a JSON object key.
    #[error("Unsupported mapping key: {0}")]
    UnsupportedKey(String),
    /// Float that JSON can't represent (NaN or infinity).
    #[error("Non-finite number: {0}")]
    NonFiniteNumber(String),
}

/// Convert a YAML value to JSON, dropping every mapping entry whose key is in
/// `strip_fields` at any depth.
///
/// Mapping order is preserved. Scalar keys (numbers, booleans) are
/// stringified. Tags are discarded and their inner value kept.
pub fn normalize(value: Yaml, strip_fields: &[String]) -> Result<Json, NormalizeError> {
    Ok(match value {
        Yaml::Null => Json::Null,
        Yaml::Bool(b) => Json::Bool(b),
        Yaml::Number(n) => Json::Number(number(&n)?),
        Yaml::String(s) => Json::String(s),
        Yaml::Sequence(items) => Json::Array(
            items
                .into_iter()
                .map(|item| normalize(item, strip_fields))
                .collect::<Result<_, _>>()?,
        ),
        Yaml::Mapping(mapping) => {
            let mut object = Map::with_capacity(mapping.len());
            for (key, value) in mapping {
                let key = key_string(key)?;
                if strip_fields.iter().any(|f| *f == key) {
                    continue;
                }
                object.insert(key, normalize(value, strip_fields)?);
            }
            Json::Object(object)
        }
        Yaml::Tagged(tagged) => normalize(tagged.value, strip_fields)?,
    })
}

fn number(n: &serde_yaml::Number) -> Result<Number, NormalizeError> {
    if let Some(i) = n.as_i64() {
        return Ok(i.into());
    }
    if let Some(u) = n.as_u64() {
        return Ok(u.into());
    }
    n.as_f64()
        .and_then(Number::from_f64)
        .ok_or_else(|| NormalizeError::NonFiniteNumber(n.to_string()))
}

fn key_string(key: Yaml) -> Result<String, NormalizeError> {
    match key {
        Yaml::String(s) => Ok(s),
        Yaml::Number(n) => Ok(n.to_string()),
        Yaml::Bool(b) => Ok(b.to_string()),
        Yaml::Tagged(tagged) => key_string(tagged.value),
        other => Err(NormalizeError::UnsupportedKey(format!("{other:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn strip(fields: &[&str]) -> Vec<String> {
        fields.iter().map(|f| (*f).to_owned()).collect()
    }

    fn yaml(s: &str) -> Yaml {
        serde_yaml::from_str(s).unwrap()
    }

    #[test]
    fn test_normalize_strips_fields_at_any_depth() {
        let value = yaml(
            r"
name: belgic-confession
format: two-column
chapters:
  - number: 1
    name: Of God
    style: {bold: true}
    text: We believe
",
        );

        let json = normalize(value, &strip(&["format", "style"])).unwrap();

        assert_eq!(
            json,
            json!({
                "name": "belgic-confession",
                "chapters": [{"number": 1, "name": "Of God", "text": "We believe"}]
            })
        );
    }

    #[test]
    fn test_normalize_preserves_key_order() {
        let json = normalize(yaml("zeta: 1\nalpha: 2\nmid: 3"), &[]).unwrap();

        let keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_normalize_stringifies_scalar_keys() {
        let json = normalize(yaml("1: one\ntrue: yes"), &[]).unwrap();

        assert_eq!(json, json!({"1": "one", "true": "yes"}));
    }

    #[test]
    fn test_normalize_rejects_sequence_keys() {
        let err = normalize(yaml("? [a, b]\n: value"), &[]).unwrap_err();

        assert!(matches!(err, NormalizeError::UnsupportedKey(_)));
    }

    #[test]
    fn test_normalize_numbers() {
        let json = normalize(yaml("year: 1563\nratio: 0.5\nbig: 18446744073709551615"), &[])
            .unwrap();

        assert_eq!(json["year"], json!(1563));
        assert_eq!(json["ratio"], json!(0.5));
        assert_eq!(json["big"], json!(u64::MAX));
    }

    #[test]
    fn test_normalize_rejects_nan() {
        let err = normalize(yaml("x: .nan"), &[]).unwrap_err();

        assert!(matches!(err, NormalizeError::NonFiniteNumber(_)));
    }

    #[test]
    fn test_normalize_unwraps_tags() {
        let json = normalize(yaml("text: !md '*I believe*'"), &[]).unwrap();

        assert_eq!(json, json!({"text": "*I believe*"}));
    }
}
