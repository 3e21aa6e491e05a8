use crate::domain::model::{Conversion, Diagnostic, EntryOptions, OutputFormat};
use crate::utils::error::Result;
use async_trait::async_trait;
use serde_json::Value;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn input_path(&self) -> &str;
    fn pointer(&self) -> Option<&str>;
    fn output_path(&self) -> &str;
    fn output_file(&self) -> String;
    fn output_format(&self) -> OutputFormat;
    fn entry_options(&self) -> EntryOptions;
    fn summary_limit(&self) -> usize;
}

/// Receives non-fatal notices raised by a conversion.
pub trait DiagnosticSink {
    fn notice(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn notice(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    /// `None` means the payload had nothing at the configured location.
    async fn extract(&self) -> Result<Option<Value>>;
    async fn transform(&self, data: Option<Value>) -> Result<Conversion>;
    async fn load(&self, result: Conversion) -> Result<String>;
}
