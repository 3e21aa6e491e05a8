pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::{cli::LocalStorage, toml_config::ShapeConfig};

pub use crate::core::engine::{EngineReport, ShapeEngine};
pub use crate::core::format::{coerce_number, format_currency, format_fixed, group_thousands};
pub use crate::core::humanize::humanize;
pub use crate::core::object_to_array::{object_to_array, object_to_array_with, parse_input, TracingSink};
pub use crate::core::pipeline::ShapePipeline;
pub use crate::core::summary::{items_summary, items_summary_by, DEFAULT_SUMMARY_LIMIT};
pub use crate::domain::model::{
    Conversion, Diagnostic, EntryFields, EntryOptions, InvalidReason, OutputEntry, OutputFormat,
    OutputSequence, ParsedInput,
};
pub use crate::utils::error::{Result, ShapeError};
