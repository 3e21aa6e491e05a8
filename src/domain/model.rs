use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_KEY_FIELD: &str = "key";
pub const DEFAULT_VALUE_FIELD: &str = "value";

/// Why a payload could not be treated as a flat mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidReason {
    /// The payload (or the selected sub-document) does not exist.
    Missing,
    Null,
    /// An array was supplied where a mapping was expected.
    Sequence,
    NotAMapping { kind: &'static str },
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidReason::Missing => write!(f, "input is missing"),
            InvalidReason::Null => write!(f, "input is null"),
            InvalidReason::Sequence => write!(f, "expected a mapping, got an array"),
            InvalidReason::NotAMapping { kind } => write!(f, "expected a mapping, got a {}", kind),
        }
    }
}

/// Result of the boundary check. Only `ValidMapping` reaches the transformation.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedInput<'a> {
    ValidMapping(&'a Map<String, Value>),
    Invalid(InvalidReason),
}

/// Non-fatal notice emitted when a conversion degrades to an empty result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    InvalidInput(InvalidReason),
    EmptyInput,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::InvalidInput(reason) => {
                write!(f, "expected a non-null mapping ({})", reason)
            }
            Diagnostic::EmptyInput => write!(f, "provided mapping is empty"),
        }
    }
}

/// Names of the two fields every output entry is serialized with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryFields {
    pub key: String,
    pub value: String,
}

impl Default for EntryFields {
    fn default() -> Self {
        Self {
            key: DEFAULT_KEY_FIELD.to_string(),
            value: DEFAULT_VALUE_FIELD.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryOptions {
    pub fields: EntryFields,
    pub humanize_keys: bool,
}

impl Default for EntryOptions {
    fn default() -> Self {
        Self {
            fields: EntryFields::default(),
            humanize_keys: true,
        }
    }
}

impl EntryOptions {
    pub fn new(key_field: impl Into<String>, value_field: impl Into<String>, humanize_keys: bool) -> Self {
        Self {
            fields: EntryFields {
                key: key_field.into(),
                value: value_field.into(),
            },
            humanize_keys,
        }
    }

    pub fn with_key_field(mut self, name: impl Into<String>) -> Self {
        self.fields.key = name.into();
        self
    }

    pub fn with_value_field(mut self, name: impl Into<String>) -> Self {
        self.fields.value = name.into();
        self
    }

    pub fn with_humanize_keys(mut self, humanize_keys: bool) -> Self {
        self.humanize_keys = humanize_keys;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutputEntry {
    pub label: String,
    pub value: Value,
}

/// Ordered entries plus the field names they serialize under.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OutputSequence {
    pub fields: EntryFields,
    pub entries: Vec<OutputEntry>,
}

impl OutputSequence {
    pub fn empty(fields: EntryFields) -> Self {
        Self {
            fields,
            entries: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &OutputEntry> {
        self.entries.iter()
    }

    /// 轉成 `{key_field: label, value_field: value}` 物件；欄位同名時 value 覆蓋 label
    pub fn to_records(&self) -> Vec<Map<String, Value>> {
        self.entries
            .iter()
            .map(|entry| {
                let mut record = Map::with_capacity(2);
                record.insert(self.fields.key.clone(), Value::String(entry.label.clone()));
                record.insert(self.fields.value.clone(), entry.value.clone());
                record
            })
            .collect()
    }
}

impl Serialize for OutputSequence {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.to_records())
    }
}

/// Entries together with every diagnostic raised while producing them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Conversion {
    pub entries: OutputSequence,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
}

impl OutputFormat {
    pub const NAMES: [&'static str; 2] = ["json", "csv"];

    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(format!("unsupported output format: {}", other)),
        }
    }
}
