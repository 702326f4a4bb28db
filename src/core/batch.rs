use crate::core::Pipeline;
use crate::domain::report::BatchReport;
use crate::utils::error::Result;

pub struct BatchEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> BatchEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn run(&self) -> Result<BatchReport> {
        tracing::info!("Starting batch evaluation");

        // Extract
        let raw = self.pipeline.extract()?;
        tracing::info!("Extracted {} readings", raw.len());

        // Transform
        let transformed = self.pipeline.transform(raw)?;
        let summary = transformed.summary.clone();
        tracing::info!(
            "Evaluated {} readings ({} classified, {} unclassified, {} skipped)",
            summary.rows,
            summary.classified,
            summary.unclassified,
            summary.skipped
        );

        // Load
        let output_path = self.pipeline.load(transformed)?;
        tracing::info!("Results written to {}", output_path);

        Ok(BatchReport {
            output_path,
            summary,
        })
    }
}
