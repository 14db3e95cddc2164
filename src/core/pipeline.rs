use std::path::Path;

use crate::core::extract::parse_tokens;
use crate::core::naming::FileNamer;
use crate::core::{
    ConfigProvider, LoadReport, Pipeline, RecordFailure, Storage, TokenRecord, UriRecord,
};
use crate::qr::render::{save_png, RenderOptions};
use crate::qr::{EncodeOptions, QrCode};
use crate::utils::error::{ExportError, Result};

/// Reads the export through a [`Storage`], builds URIs for the configured
/// target and writes one PNG per URI back through the same storage.
pub struct ExportPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> ExportPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    async fn write_qr(
        &self,
        record: &UriRecord,
        path: &Path,
        options: &RenderOptions,
    ) -> Result<()> {
        let code = QrCode::encode_with_options(
            record.uri.as_bytes(),
            EncodeOptions {
                ec_level: options.ec_level,
                min_version: options.min_version,
                mask: None,
            },
        )?;
        tracing::debug!(
            "{} -> version {} ({}x{} modules)",
            record.display_name,
            code.version(),
            code.size(),
            code.size()
        );
        save_png(&self.storage, &code, options, &path.to_string_lossy()).await
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for ExportPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<TokenRecord>> {
        let input = self.config.input_path();
        tracing::debug!("Reading export from: {}", input);

        let bytes = self.storage.read_file(input).await?;
        let text = String::from_utf8(bytes).map_err(|e| ExportError::ParseError {
            reason: format!("input is not valid UTF-8: {}", e),
        })?;

        parse_tokens(&text)
    }

    async fn transform(&self, tokens: Vec<TokenRecord>) -> Result<Vec<UriRecord>> {
        let target = self.config.target();
        tracing::debug!("Building {} URIs for {}", tokens.len(), target);

        Ok(tokens.iter().map(|token| target.build_uri(token)).collect())
    }

    async fn load(&self, uris: &[UriRecord]) -> Result<LoadReport> {
        let options = self.config.render_options();
        let output_dir = Path::new(self.config.output_dir());
        let mut namer = FileNamer::new();
        let mut report = LoadReport::default();

        for record in uris {
            let path = output_dir.join(namer.file_name(&record.display_name));
            match self.write_qr(record, &path, options).await {
                Ok(()) => {
                    tracing::info!("✅ QR code generated: {}", path.display());
                    report.written.push(path);
                }
                Err(error) => {
                    tracing::warn!("❌ Skipping '{}': {}", record.display_name, error);
                    report.failures.push(RecordFailure {
                        display_name: record.display_name.clone(),
                        error,
                    });
                }
            }
        }

        Ok(report)
    }
}
