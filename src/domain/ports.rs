use crate::domain::model::{LoadReport, TokenRecord, UriRecord};
use crate::domain::target::TargetApp;
use crate::qr::render::RenderOptions;
use crate::utils::error::Result;
use async_trait::async_trait;

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
    fn output_dir(&self) -> &str;
    fn target(&self) -> TargetApp;
    fn render_options(&self) -> &RenderOptions;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<TokenRecord>>;
    async fn transform(&self, tokens: Vec<TokenRecord>) -> Result<Vec<UriRecord>>;
    async fn load(&self, uris: &[UriRecord]) -> Result<LoadReport>;
}
