pub mod config;
pub mod core;
pub mod domain;
pub mod qr;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, Settings};

pub use core::{etl::ExportEngine, pipeline::ExportPipeline};
pub use domain::target::TargetApp;
pub use qr::{EcLevel, QrCode};
pub use utils::error::{ExportError, Result};
