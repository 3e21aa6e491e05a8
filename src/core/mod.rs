pub mod engine;
pub mod format;
pub mod humanize;
pub mod object_to_array;
pub mod pipeline;
pub mod summary;

pub use crate::domain::model::{Conversion, OutputSequence};
pub use crate::domain::ports::{ConfigProvider, DiagnosticSink, Pipeline, Storage};
pub use crate::utils::error::Result;
