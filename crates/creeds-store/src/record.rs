//! Typed record model.
//!
//! A stored record is a JSON object with a `type` field naming its category.
//! [`Record::from_value`] reads the category, then parses the body into the
//! matching variant. Body sub-shapes (Lord's Day catechism vs. flat catechism,
//! article chapters vs. text chapters) are resolved here by key presence, so
//! consumers match on enums instead of probing keys.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Declared document category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Creed,
    Confession,
    Catechism,
    Document,
}

impl RecordKind {
    /// Parse the value of a record's `type` field.
    ///
    /// Returns `None` for anything other than the four known categories.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "creed" => Some(Self::Creed),
            "confession" => Some(Self::Confession),
            "catechism" => Some(Self::Catechism),
            "document" => Some(Self::Document),
            _ => None,
        }
    }

    /// The `type` field value for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Creed => "creed",
            Self::Confession => "confession",
            Self::Catechism => "catechism",
            Self::Document => "document",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A number or string taken verbatim from the source.
///
/// Used for chapter/article/question numbers and publication years. The
/// source value is authoritative and is displayed as-is, so `1.5` stays
/// `1.5` and `381.0` stays `381.0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Label {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Label {
    fn from(n: i64) -> Self {
        Self::Number(n.into())
    }
}

impl From<&str> for Label {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

/// Scripture citations attached to a question, article or section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Verses {
    /// Bare citation strings.
    List(Vec<String>),
    /// Citation label mapped to its verses, in source order.
    Map(IndexMap<String, Vec<Label>>),
}

/// A creed: a single flat text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creed {
    pub name: String,
    #[serde(default)]
    pub publication_year: Option<Label>,
    pub text: String,
}

/// A confession: ordered chapters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Confession {
    pub name: String,
    #[serde(default)]
    pub publication_year: Option<Label>,
    pub chapters: Vec<Chapter>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    pub number: Label,
    pub name: String,
    #[serde(flatten)]
    pub body: ChapterBody,
}

/// Chapter content. A chapter with an `articles` key is an article chapter
/// even if it also carries `text`. A chapter with neither is a heading with
/// empty text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChapterBody {
    Articles {
        articles: Vec<Article>,
    },
    Text {
        #[serde(default)]
        text: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub number: Label,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verses: Option<Verses>,
}

/// A catechism, either grouped by Lord's Day or a flat question list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catechism {
    pub name: String,
    #[serde(default)]
    pub publication_year: Option<Label>,
    #[serde(flatten)]
    pub body: CatechismBody,
}

/// Catechism content. The presence of a `days` key selects [`CatechismBody::Days`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CatechismBody {
    Days { days: Vec<Day> },
    Questions { questions: Vec<Question> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Day {
    pub number: Label,
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub number: Label,
    pub question: String,
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verses: Option<Verses>,
}

/// A historical document: a sequence of named sections and bare theses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoricalDocument {
    pub name: String,
    #[serde(default)]
    pub publication_year: Option<Label>,
    pub chapters: Vec<DocumentEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocumentEntry {
    Section(Section),
    Thesis(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub name: String,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verses: Option<Verses>,
}

/// One confessional document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    Creed(Creed),
    Confession(Confession),
    Catechism(Catechism),
    Document(HistoricalDocument),
    /// A record whose `type` is missing or not one of the known categories.
    Unrecognized {
        /// The declared `type`, if it was a string.
        declared: Option<String>,
        name: Option<String>,
    },
}

/// Error returned when a stored record can't be parsed.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    /// The content is not valid JSON.
    #[error("Invalid JSON: {0}")]
    Json(#[source] serde_json::Error),
    /// The record declares a known type but its body doesn't match that shape.
    #[error("Malformed {kind} record: {source}")]
    Shape {
        kind: RecordKind,
        #[source]
        source: serde_json::Error,
    },
}

impl Record {
    /// Parse a record from JSON text.
    pub fn from_json(content: &str) -> Result<Self, RecordError> {
        let value: Value = serde_json::from_str(content).map_err(RecordError::Json)?;
        Self::from_value(value)
    }

    /// Parse a record from an already-decoded JSON value.
    pub fn from_value(value: Value) -> Result<Self, RecordError> {
        let declared = value.get("type").and_then(Value::as_str).map(str::to_owned);
        let Some(kind) = declared.as_deref().and_then(RecordKind::parse) else {
            let name = value.get("name").and_then(Value::as_str).map(str::to_owned);
            return Ok(Self::Unrecognized { declared, name });
        };

        let shape = |source| RecordError::Shape { kind, source };
        let record = match kind {
            RecordKind::Creed => Self::Creed(serde_json::from_value(value).map_err(shape)?),
            RecordKind::Confession => {
                Self::Confession(serde_json::from_value(value).map_err(shape)?)
            }
            RecordKind::Catechism => Self::Catechism(serde_json::from_value(value).map_err(shape)?),
            RecordKind::Document => Self::Document(serde_json::from_value(value).map_err(shape)?),
        };
        Ok(record)
    }

    /// Declared kind, or `None` for unrecognized records.
    pub fn kind(&self) -> Option<RecordKind> {
        match self {
            Self::Creed(_) => Some(RecordKind::Creed),
            Self::Confession(_) => Some(RecordKind::Confession),
            Self::Catechism(_) => Some(RecordKind::Catechism),
            Self::Document(_) => Some(RecordKind::Document),
            Self::Unrecognized { .. } => None,
        }
    }

    /// Document name as stored.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Creed(r) => Some(&r.name),
            Self::Confession(r) => Some(&r.name),
            Self::Catechism(r) => Some(&r.name),
            Self::Document(r) => Some(&r.name),
            Self::Unrecognized { name, .. } => name.as_deref(),
        }
    }

    pub fn publication_year(&self) -> Option<&Label> {
        match self {
            Self::Creed(r) => r.publication_year.as_ref(),
            Self::Confession(r) => r.publication_year.as_ref(),
            Self::Catechism(r) => r.publication_year.as_ref(),
            Self::Document(r) => r.publication_year.as_ref(),
            Self::Unrecognized { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_parse_creed() {
        let record = Record::from_value(json!({
            "type": "creed",
            "name": "apostles-creed",
            "text": "I believe..."
        }))
        .unwrap();

        assert_eq!(
            record,
            Record::Creed(Creed {
                name: "apostles-creed".to_owned(),
                publication_year: None,
                text: "I believe...".to_owned(),
            })
        );
    }

    #[test]
    fn test_parse_catechism_with_days() {
        let record = Record::from_value(json!({
            "type": "catechism",
            "name": "heidelberg-catechism",
            "publication_year": 1563,
            "days": [{
                "number": 1,
                "questions": [{
                    "number": 1,
                    "question": "What is your only comfort?",
                    "answer": "That I am not my own.",
                    "verses": {"Rom.": ["14:7", "14:8"]}
                }]
            }]
        }))
        .unwrap();

        let Record::Catechism(catechism) = record else {
            panic!("expected catechism");
        };
        assert_eq!(catechism.publication_year, Some(Label::from(1563)));
        let CatechismBody::Days { days } = catechism.body else {
            panic!("expected days");
        };
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].questions[0].number, Label::from(1));
        let Some(Verses::Map(verses)) = &days[0].questions[0].verses else {
            panic!("expected verse map");
        };
        assert_eq!(
            verses.get("Rom."),
            Some(&vec![Label::from("14:7"), Label::from("14:8")])
        );
    }

    #[test]
    fn test_parse_catechism_without_days_is_flat() {
        let record = Record::from_value(json!({
            "type": "catechism",
            "name": "westminster-shorter-catechism",
            "questions": [{
                "number": 1,
                "question": "What is the chief end of man?",
                "answer": "To glorify God.",
                "verses": ["1 Cor. 10:31"]
            }]
        }))
        .unwrap();

        let Record::Catechism(Catechism {
            body: CatechismBody::Questions { questions },
            ..
        }) = record
        else {
            panic!("expected flat catechism");
        };
        assert_eq!(questions.len(), 1);
        assert_eq!(
            questions[0].verses,
            Some(Verses::List(vec!["1 Cor. 10:31".to_owned()]))
        );
    }

    #[test]
    fn test_parse_confession_chapter_shapes() {
        let record = Record::from_value(json!({
            "type": "confession",
            "name": "belgic-confession",
            "chapters": [
                {"number": 1, "name": "Of God", "text": "We believe..."},
                {
                    "number": "2",
                    "name": "Of Scripture",
                    "text": "ignored",
                    "articles": [{"number": 1, "text": "The Word."}]
                }
            ]
        }))
        .unwrap();

        let Record::Confession(confession) = record else {
            panic!("expected confession");
        };
        assert!(matches!(
            confession.chapters[0].body,
            ChapterBody::Text { .. }
        ));
        assert_eq!(confession.chapters[1].number, Label::from("2"));
        let ChapterBody::Articles { articles } = &confession.chapters[1].body else {
            panic!("articles key should win over text");
        };
        assert_eq!(articles[0].verses, None);
    }

    #[test]
    fn test_parse_document_entries() {
        let record = Record::from_value(json!({
            "type": "document",
            "name": "Martin Luther's 95 theses",
            "chapters": [
                "When our Lord and Master...",
                {"name": "Preface", "text": "Out of love..."}
            ]
        }))
        .unwrap();

        let Record::Document(doc) = record else {
            panic!("expected document");
        };
        assert_eq!(
            doc.chapters[0],
            DocumentEntry::Thesis("When our Lord and Master...".to_owned())
        );
        assert!(matches!(&doc.chapters[1], DocumentEntry::Section(s) if s.name == "Preface"));
    }

    #[test]
    fn test_float_labels_parse_and_display_verbatim() {
        let record = Record::from_value(json!({
            "type": "confession",
            "name": "second-helvetic-confession",
            "publication_year": 1566.0,
            "chapters": [{
                "number": 2,
                "name": "Of Interpreting the Holy Scriptures",
                "articles": [{"number": 1.5, "text": "The true interpretation."}]
            }]
        }))
        .unwrap();

        assert_eq!(record.publication_year().unwrap().to_string(), "1566.0");
        let Record::Confession(confession) = record else {
            panic!("expected confession");
        };
        let ChapterBody::Articles { articles } = &confession.chapters[0].body else {
            panic!("expected articles");
        };
        assert_eq!(articles[0].number.to_string(), "1.5");
    }

    #[test]
    fn test_float_year_on_creed() {
        let record = Record::from_value(json!({
            "type": "creed",
            "name": "nicene-creed",
            "publication_year": 381.0,
            "text": "We believe in one God."
        }))
        .unwrap();

        assert_eq!(record.publication_year().map(ToString::to_string).as_deref(), Some("381.0"));
    }

    #[test]
    fn test_heading_only_chapter_has_empty_text() {
        let record = Record::from_value(json!({
            "type": "confession",
            "name": "belgic-confession",
            "chapters": [
                {"number": 1, "name": "Preface"},
                {"number": 2, "name": "Of God", "text": "We believe..."}
            ]
        }))
        .unwrap();

        let Record::Confession(confession) = record else {
            panic!("expected confession");
        };
        assert_eq!(confession.chapters[0].body, ChapterBody::Text { text: String::new() });
        assert_eq!(confession.chapters.len(), 2);
    }

    #[test]
    fn test_unknown_type_is_unrecognized() {
        let record = Record::from_value(json!({"type": "psalter", "name": "genevan"})).unwrap();

        assert_eq!(
            record,
            Record::Unrecognized {
                declared: Some("psalter".to_owned()),
                name: Some("genevan".to_owned()),
            }
        );
        assert_eq!(record.kind(), None);
        assert_eq!(record.name(), Some("genevan"));
    }

    #[test]
    fn test_missing_type_is_unrecognized() {
        let record = Record::from_value(json!({"name": "untyped"})).unwrap();
        assert!(matches!(record, Record::Unrecognized { declared: None, .. }));
    }

    #[test]
    fn test_known_type_with_wrong_shape_is_error() {
        let err = Record::from_value(json!({"type": "creed", "name": "x"})).unwrap_err();
        assert!(matches!(
            err,
            RecordError::Shape {
                kind: RecordKind::Creed,
                ..
            }
        ));
        assert!(err.to_string().starts_with("Malformed creed record"));
    }

    #[test]
    fn test_invalid_json_is_error() {
        let err = Record::from_json("{not json").unwrap_err();
        assert!(matches!(err, RecordError::Json(_)));
    }

    #[test]
    fn test_label_display_is_verbatim() {
        assert_eq!(Label::from(7).to_string(), "7");
        assert_eq!(Label::from("7a").to_string(), "7a");
    }
}
