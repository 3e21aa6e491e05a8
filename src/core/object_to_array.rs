//! Flat mapping → ordered `{key, value}` entries for charts and tables.
//!
//! Invalid payloads never fail. They produce an empty sequence plus a
//! [`Diagnostic`] delivered to a [`DiagnosticSink`].

use crate::core::humanize::humanize;
use crate::domain::model::{
    Conversion, Diagnostic, EntryOptions, InvalidReason, OutputEntry, OutputSequence, ParsedInput,
};
use crate::domain::ports::DiagnosticSink;
use serde_json::{Map, Value};

/// Classifies a weakly-typed payload. `None` stands for an absent value.
pub fn parse_input(input: Option<&Value>) -> ParsedInput<'_> {
    match input {
        None => ParsedInput::Invalid(InvalidReason::Missing),
        Some(Value::Null) => ParsedInput::Invalid(InvalidReason::Null),
        Some(Value::Array(_)) => ParsedInput::Invalid(InvalidReason::Sequence),
        Some(Value::Object(map)) => ParsedInput::ValidMapping(map),
        Some(Value::Bool(_)) => ParsedInput::Invalid(InvalidReason::NotAMapping { kind: "boolean" }),
        Some(Value::Number(_)) => ParsedInput::Invalid(InvalidReason::NotAMapping { kind: "number" }),
        Some(Value::String(_)) => ParsedInput::Invalid(InvalidReason::NotAMapping { kind: "string" }),
    }
}

/// Converts `input` into entries, reporting degraded cases to `sink`.
pub fn object_to_array_with<S>(input: Option<&Value>, options: &EntryOptions, sink: &mut S) -> OutputSequence
where
    S: DiagnosticSink + ?Sized,
{
    let map = match parse_input(input) {
        ParsedInput::ValidMapping(map) => map,
        ParsedInput::Invalid(reason) => {
            sink.notice(Diagnostic::InvalidInput(reason));
            return OutputSequence::empty(options.fields.clone());
        }
    };

    if map.is_empty() {
        sink.notice(Diagnostic::EmptyInput);
        return OutputSequence::empty(options.fields.clone());
    }

    OutputSequence {
        fields: options.fields.clone(),
        entries: to_entries(map, options.humanize_keys),
    }
}

/// Same as [`object_to_array_with`], collecting diagnostics into the result.
pub fn object_to_array(input: Option<&Value>, options: &EntryOptions) -> Conversion {
    let mut diagnostics = Vec::new();
    let entries = object_to_array_with(input, options, &mut diagnostics);
    Conversion {
        entries,
        diagnostics,
    }
}

fn to_entries(map: &Map<String, Value>, humanize_keys: bool) -> Vec<OutputEntry> {
    map.iter()
        .map(|(key, value)| OutputEntry {
            label: if humanize_keys { humanize(key) } else { key.clone() },
            value: match value {
                Value::Null => Value::String(String::new()),
                other => other.clone(),
            },
        })
        .collect()
}

/// Logs every diagnostic as a warning and keeps it for later reporting.
#[derive(Debug, Default)]
pub struct TracingSink {
    seen: Vec<Diagnostic>,
}

impl TracingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.seen
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.seen
    }
}

impl DiagnosticSink for TracingSink {
    fn notice(&mut self, diagnostic: Diagnostic) {
        tracing::warn!("⚠️ Entry conversion: {}", diagnostic);
        self.seen.push(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn labels(conversion: &Conversion) -> Vec<&str> {
        conversion.entries.iter().map(|e| e.label.as_str()).collect()
    }

    #[test]
    fn test_length_matches_key_count() {
        let payloads = [
            json!({"a": 1}),
            json!({"completed": 68, "pending": 22, "failed": 10}),
            json!({"revenue": 1200.5, "orders": 42, "customers": 17, "avgOrder": 28.58, "note": null}),
        ];

        for payload in &payloads {
            let conversion = object_to_array(Some(payload), &EntryOptions::default());
            assert_eq!(conversion.entries.len(), payload.as_object().unwrap().len());
            assert!(conversion.diagnostics.is_empty());
        }
    }

    #[test]
    fn test_invalid_inputs_yield_empty_sequence() {
        let cases = [
            (None, InvalidReason::Missing),
            (Some(json!(null)), InvalidReason::Null),
            (Some(json!(42)), InvalidReason::NotAMapping { kind: "number" }),
            (Some(json!("summary")), InvalidReason::NotAMapping { kind: "string" }),
            (Some(json!(true)), InvalidReason::NotAMapping { kind: "boolean" }),
            (Some(json!([1, 2, 3])), InvalidReason::Sequence),
        ];

        for (input, reason) in cases {
            let conversion = object_to_array(input.as_ref(), &EntryOptions::default());
            assert!(conversion.entries.is_empty());
            assert_eq!(conversion.diagnostics, vec![Diagnostic::InvalidInput(reason)]);
        }
    }

    #[test]
    fn test_empty_mapping() {
        let conversion = object_to_array(Some(&json!({})), &EntryOptions::default());
        assert!(conversion.entries.is_empty());
        assert_eq!(conversion.diagnostics, vec![Diagnostic::EmptyInput]);
        assert_eq!(serde_json::to_value(&conversion.entries).unwrap(), json!([]));
    }

    #[test]
    fn test_custom_field_names() {
        let payload = json!({"key": "not a label", "value": 3, "other": false});
        let options = EntryOptions::new("k", "v", true);
        let conversion = object_to_array(Some(&payload), &options);

        for record in conversion.entries.to_records() {
            let names: Vec<&str> = record.keys().map(String::as_str).collect();
            assert_eq!(names, vec!["k", "v"]);
        }
    }

    #[test]
    fn test_humanize_toggle() {
        let payload = json!({"firstName": 1});

        let raw = object_to_array(Some(&payload), &EntryOptions::new("key", "value", false));
        assert_eq!(
            serde_json::to_value(&raw.entries).unwrap(),
            json!([{"key": "firstName", "value": 1}])
        );

        let humanized = object_to_array(Some(&payload), &EntryOptions::default());
        assert_eq!(
            serde_json::to_value(&humanized.entries).unwrap(),
            json!([{"key": "First Name", "value": 1}])
        );
    }

    #[test]
    fn test_only_null_is_coerced() {
        let payload = json!({"a": null, "c": 0, "d": false, "e": ""});
        let conversion = object_to_array(Some(&payload), &EntryOptions::default());
        let values: Vec<&Value> = conversion.entries.iter().map(|e| &e.value).collect();
        assert_eq!(values, vec![&json!(""), &json!(0), &json!(false), &json!("")]);
    }

    #[test]
    fn test_values_are_never_humanized() {
        let payload = json!({"status": "paymentFailed"});
        let conversion = object_to_array(Some(&payload), &EntryOptions::default());
        assert_eq!(conversion.entries.entries[0].value, json!("paymentFailed"));
    }

    #[test]
    fn test_insertion_order_is_kept() {
        let payload: Value = serde_json::from_str(r#"{"b": 1, "a": 2}"#).unwrap();
        let conversion = object_to_array(Some(&payload), &EntryOptions::default());
        assert_eq!(labels(&conversion), vec!["B", "A"]);
        assert_eq!(
            serde_json::to_value(&conversion.entries).unwrap(),
            json!([{"key": "B", "value": 1}, {"key": "A", "value": 2}])
        );
    }

    #[test]
    fn test_nested_values_pass_through() {
        let payload = json!({"funnel": {"viewed": 1000}, "tags": ["a", "b"]});
        let conversion = object_to_array(Some(&payload), &EntryOptions::default());
        assert_eq!(conversion.entries.entries[0].value, json!({"viewed": 1000}));
        assert_eq!(conversion.entries.entries[1].value, json!(["a", "b"]));
    }

    #[test]
    fn test_tracing_sink_keeps_diagnostics() {
        let mut sink = TracingSink::new();
        let entries = object_to_array_with(Some(&json!([])), &EntryOptions::default(), &mut sink);
        assert!(entries.is_empty());
        assert_eq!(
            sink.diagnostics(),
            &[Diagnostic::InvalidInput(InvalidReason::Sequence)]
        );
    }
}
