use crate::core::Pipeline;
use crate::domain::model::Diagnostic;
use crate::utils::error::Result;

/// Outcome of one extract → transform → load run.
#[derive(Debug, Clone)]
pub struct EngineReport {
    pub output_path: String,
    pub entries: usize,
    pub diagnostics: Vec<Diagnostic>,
}

pub struct ShapeEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ShapeEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    pub async fn run(&self) -> Result<EngineReport> {
        tracing::info!("Starting shape process...");

        tracing::info!("📥 Extracting payload...");
        let payload = self.pipeline.extract().await?;

        tracing::info!("🔄 Transforming payload...");
        let result = self.pipeline.transform(payload).await?;
        let entries = result.entries.len();
        let diagnostics = result.diagnostics.clone();
        if entries == 0 {
            tracing::warn!("⚠️ No entries produced, writing an empty document");
        }

        tracing::info!("💾 Loading {} entries...", entries);
        let output_path = self.pipeline.load(result).await?;
        tracing::info!("📁 Output saved to: {}", output_path);

        Ok(EngineReport {
            output_path,
            entries,
            diagnostics,
        })
    }
}
