pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::domain::model::OutputFormat;
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use toml_config::ShapeConfig;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "dash-shape")]
#[command(about = "Turn dashboard metric payloads into chart-ready entries")]
pub struct CliConfig {
    /// Input JSON file, or `-` for stdin
    #[arg(short, long)]
    pub input: Option<String>,

    /// JSON pointer to the mapping inside the payload (e.g. /summary)
    #[arg(short, long)]
    pub pointer: Option<String>,

    #[arg(long)]
    pub key_field: Option<String>,

    #[arg(long)]
    pub value_field: Option<String>,

    /// Keep keys as they are instead of humanizing them
    #[arg(long)]
    pub raw_keys: bool,

    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    #[arg(long)]
    pub output_dir: Option<String>,

    #[arg(long)]
    pub output_file: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    /// Show the resolved settings without processing anything
    #[arg(long)]
    pub dry_run: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 命令列參數覆蓋 TOML 設定
    pub fn apply_to(&self, config: &mut ShapeConfig) {
        if let Some(input) = &self.input {
            config.source.input = Some(input.clone());
        }
        if let Some(pointer) = &self.pointer {
            config.source.pointer = Some(pointer.clone());
        }
        if let Some(key_field) = &self.key_field {
            config.entries.key_field = Some(key_field.clone());
        }
        if let Some(value_field) = &self.value_field {
            config.entries.value_field = Some(value_field.clone());
        }
        if self.raw_keys {
            config.entries.humanize_keys = Some(false);
        }
        if let Some(format) = self.format {
            config.load.format = Some(format.to_string());
        }
        if let Some(output_dir) = &self.output_dir {
            config.load.output_path = Some(output_dir.clone());
        }
        if let Some(output_file) = &self.output_file {
            config.load.output_file = Some(output_file.clone());
        }
    }
}
