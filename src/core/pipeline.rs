use crate::core::object_to_array::{object_to_array_with, TracingSink};
use crate::core::summary::items_summary_by;
use crate::core::{ConfigProvider, Pipeline, Storage};
use crate::domain::model::{Conversion, OutputFormat, OutputSequence};
use crate::utils::error::{Result, ShapeError};
use serde_json::Value;
use std::path::Path;

pub struct ShapePipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> ShapePipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    pub fn config(&self) -> &C {
        &self.config
    }
}

/// 依 JSON pointer 取出子文件；找不到時回傳 `None`
pub fn select(mut document: Value, pointer: Option<&str>) -> Option<Value> {
    match pointer {
        None | Some("") => Some(document),
        Some(pointer) => {
            let selected = document.pointer_mut(pointer).map(Value::take);
            if selected.is_none() {
                tracing::warn!("⚠️ Nothing found at pointer '{}'", pointer);
            }
            selected
        }
    }
}

pub fn render(entries: &OutputSequence, format: OutputFormat) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Json => {
            let mut data = serde_json::to_vec_pretty(entries)?;
            data.push(b'\n');
            Ok(data)
        }
        OutputFormat::Csv => render_csv(entries),
    }
}

fn render_csv(entries: &OutputSequence) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([entries.fields.key.as_str(), entries.fields.value.as_str()])?;

    for entry in entries.iter() {
        let cell = match &entry.value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        writer.write_record([entry.label.as_str(), cell.as_str()])?;
    }

    writer.into_inner().map_err(|e| ShapeError::ProcessingError {
        message: format!("Failed to flush CSV output: {}", e),
    })
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for ShapePipeline<S, C> {
    async fn extract(&self) -> Result<Option<Value>> {
        let input = self.config.input_path();
        tracing::debug!("Reading payload from: {}", input);

        let raw = self.storage.read_file(input).await?;
        let document: Value = serde_json::from_slice(&raw)?;

        Ok(select(document, self.config.pointer()))
    }

    async fn transform(&self, data: Option<Value>) -> Result<Conversion> {
        let options = self.config.entry_options();
        let mut sink = TracingSink::new();
        let entries = object_to_array_with(data.as_ref(), &options, &mut sink);

        if !entries.is_empty() {
            tracing::info!(
                "Shaped {} entries: {}",
                entries.len(),
                items_summary_by(&entries.entries, self.config.summary_limit(), |e| e.label.as_str())
            );
        }

        Ok(Conversion {
            entries,
            diagnostics: sink.into_diagnostics(),
        })
    }

    async fn load(&self, result: Conversion) -> Result<String> {
        let format = self.config.output_format();
        let file_name = self.config.output_file();
        let data = render(&result.entries, format)?;

        tracing::debug!("Writing {} ({} bytes) to storage", file_name, data.len());
        self.storage.write_file(&file_name, &data).await?;

        Ok(Path::new(self.config.output_path())
            .join(&file_name)
            .display()
            .to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Diagnostic, EntryOptions, InvalidReason};
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn with_file(path: &str, data: &str) -> Self {
            let mut files = HashMap::new();
            files.insert(path.to_string(), data.as_bytes().to_vec());
            Self {
                files: Arc::new(Mutex::new(files)),
            }
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                ShapeError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig {
        pointer: Option<String>,
        format: OutputFormat,
        options: EntryOptions,
    }

    impl MockConfig {
        fn new(pointer: Option<&str>, format: OutputFormat) -> Self {
            Self {
                pointer: pointer.map(str::to_string),
                format,
                options: EntryOptions::default(),
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn input_path(&self) -> &str {
            "orders.json"
        }

        fn pointer(&self) -> Option<&str> {
            self.pointer.as_deref()
        }

        fn output_path(&self) -> &str {
            "out"
        }

        fn output_file(&self) -> String {
            format!("entries.{}", self.format.extension())
        }

        fn output_format(&self) -> OutputFormat {
            self.format
        }

        fn entry_options(&self) -> EntryOptions {
            self.options.clone()
        }

        fn summary_limit(&self) -> usize {
            3
        }
    }

    const ORDERS: &str = r#"{"summary": {"completed": 68, "pending": 22, "failed": null}, "total": 100}"#;

    #[tokio::test]
    async fn test_extract_with_pointer() {
        let storage = MockStorage::with_file("orders.json", ORDERS);
        let pipeline = ShapePipeline::new(storage, MockConfig::new(Some("/summary"), OutputFormat::Json));

        let data = pipeline.extract().await.unwrap();
        assert_eq!(data, Some(json!({"completed": 68, "pending": 22, "failed": null})));
    }

    #[tokio::test]
    async fn test_extract_missing_pointer_target() {
        let storage = MockStorage::with_file("orders.json", ORDERS);
        let pipeline = ShapePipeline::new(storage, MockConfig::new(Some("/funnel"), OutputFormat::Json));

        let data = pipeline.extract().await.unwrap();
        assert!(data.is_none());

        let result = pipeline.transform(data).await.unwrap();
        assert!(result.entries.is_empty());
        assert_eq!(
            result.diagnostics,
            vec![Diagnostic::InvalidInput(InvalidReason::Missing)]
        );
    }

    #[tokio::test]
    async fn test_extract_malformed_json() {
        let storage = MockStorage::with_file("orders.json", "{not json");
        let pipeline = ShapePipeline::new(storage, MockConfig::new(None, OutputFormat::Json));

        let err = pipeline.extract().await.unwrap_err();
        assert!(matches!(err, ShapeError::SerializationError(_)));
    }

    #[tokio::test]
    async fn test_load_json() {
        let storage = MockStorage::with_file("orders.json", ORDERS);
        let pipeline = ShapePipeline::new(storage.clone(), MockConfig::new(Some("/summary"), OutputFormat::Json));

        let data = pipeline.extract().await.unwrap();
        let result = pipeline.transform(data).await.unwrap();
        let location = pipeline.load(result).await.unwrap();

        assert_eq!(location, Path::new("out").join("entries.json").display().to_string());
        let written = storage.get_file("entries.json").await.unwrap();
        let value: Value = serde_json::from_slice(&written).unwrap();
        assert_eq!(
            value,
            json!([
                {"key": "Completed", "value": 68},
                {"key": "Pending", "value": 22},
                {"key": "Failed", "value": ""}
            ])
        );
    }

    #[tokio::test]
    async fn test_load_csv() {
        let storage = MockStorage::with_file("orders.json", ORDERS);
        let pipeline = ShapePipeline::new(storage.clone(), MockConfig::new(Some("/summary"), OutputFormat::Csv));

        let data = pipeline.extract().await.unwrap();
        let result = pipeline.transform(data).await.unwrap();
        pipeline.load(result).await.unwrap();

        let written = String::from_utf8(storage.get_file("entries.csv").await.unwrap()).unwrap();
        assert_eq!(written, "key,value\nCompleted,68\nPending,22\nFailed,\n");
    }

    #[test]
    fn test_render_empty_sequence() {
        let empty = OutputSequence::default();
        assert_eq!(render(&empty, OutputFormat::Json).unwrap(), b"[]\n".to_vec());
        assert_eq!(render(&empty, OutputFormat::Csv).unwrap(), b"key,value\n".to_vec());
    }

    #[test]
    fn test_select_whole_document() {
        let doc = json!({"a": 1});
        assert_eq!(select(doc.clone(), None), Some(doc.clone()));
        assert_eq!(select(doc.clone(), Some("")), Some(doc));
    }
}
