pub mod etl;
pub mod extract;
pub mod naming;
pub mod pipeline;

pub use crate::domain::model::{ExportReport, LoadReport, RecordFailure, TokenRecord, UriRecord};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
