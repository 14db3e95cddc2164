use std::time::Instant;

use crate::core::Pipeline;
use crate::domain::model::{ExportReport, LoadReport, UriRecord};
use crate::utils::error::Result;

pub struct ExportEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ExportEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Extract + transform: the rendered URIs in input order.
    pub async fn convert(&self) -> Result<Vec<UriRecord>> {
        let started = Instant::now();

        tracing::debug!("Extracting tokens...");
        let tokens = self.pipeline.extract().await?;
        tracing::info!("📥 Extracted {} tokens", tokens.len());

        tracing::debug!("Building URIs...");
        let uris = self.pipeline.transform(tokens).await?;
        tracing::info!(
            "🔗 Built {} URIs in {:?}",
            uris.len(),
            started.elapsed()
        );

        Ok(uris)
    }

    /// Load: one QR image per URI. Per-record failures end up in the report.
    pub async fn render(&self, uris: &[UriRecord]) -> Result<LoadReport> {
        let started = Instant::now();

        tracing::debug!("Rendering QR codes...");
        let report = self.pipeline.load(uris).await?;
        tracing::info!(
            "🖼️ Wrote {} QR codes ({} failed) in {:?}",
            report.written.len(),
            report.failures.len(),
            started.elapsed()
        );

        Ok(report)
    }

    pub async fn run(&self) -> Result<ExportReport> {
        let uris = self.convert().await?;
        let load = self.render(&uris).await?;
        Ok(ExportReport { uris, load })
    }
}
