use crate::core::summary::DEFAULT_SUMMARY_LIMIT;
use crate::core::ConfigProvider;
use crate::domain::model::{EntryOptions, OutputFormat, DEFAULT_KEY_FIELD, DEFAULT_VALUE_FIELD};
use crate::utils::error::{Result, ShapeError};
use crate::utils::validation::{
    validate_json_pointer, validate_non_empty_string, validate_one_of, validate_path, validate_range,
    validate_required_field, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_OUTPUT_PATH: &str = "./output";
pub const MAX_SUMMARY_LIMIT: usize = 100;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShapeConfig {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub entries: EntriesConfig,
    #[serde(default)]
    pub load: LoadConfig,
    pub summary: Option<SummaryConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    /// 輸入 JSON 檔案，`-` 代表 stdin
    pub input: Option<String>,
    pub pointer: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntriesConfig {
    pub key_field: Option<String>,
    pub value_field: Option<String>,
    pub humanize_keys: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoadConfig {
    pub output_path: Option<String>,
    pub output_file: Option<String>,
    pub format: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummaryConfig {
    pub limit: Option<usize>,
}

impl ShapeConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ShapeError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ShapeError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DASHBOARD_EXPORT})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ShapeError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures<'_>| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 相對輸入路徑以 `base` 為基準，stdin 不處理
    pub fn resolve_input(&mut self, base: &Path) {
        if let Some(input) = &self.source.input {
            let path = Path::new(input);
            if input != "-" && path.is_relative() {
                self.source.input = Some(base.join(path).display().to_string());
            }
        }
    }

    pub fn reads_stdin(&self) -> bool {
        self.source.input.as_deref() == Some("-")
    }

    pub fn key_field(&self) -> &str {
        self.entries.key_field.as_deref().unwrap_or(DEFAULT_KEY_FIELD)
    }

    pub fn value_field(&self) -> &str {
        self.entries.value_field.as_deref().unwrap_or(DEFAULT_VALUE_FIELD)
    }

    pub fn humanize_keys(&self) -> bool {
        self.entries.humanize_keys.unwrap_or(true)
    }

    pub fn format(&self) -> OutputFormat {
        self.load
            .format
            .as_deref()
            .and_then(|f| f.parse().ok())
            .unwrap_or_default()
    }

    pub fn validate_config(&self) -> Result<()> {
        let input = validate_required_field("source.input", &self.source.input)?;
        validate_path("source.input", input)?;

        if let Some(pointer) = &self.source.pointer {
            validate_json_pointer("source.pointer", pointer)?;
        }

        validate_non_empty_string("entries.key_field", self.key_field())?;
        validate_non_empty_string("entries.value_field", self.value_field())?;

        if let Some(format) = &self.load.format {
            validate_one_of("load.format", &format.to_ascii_lowercase(), &OutputFormat::NAMES)?;
        }

        validate_path("load.output_path", self.output_path())?;
        if let Some(file) = &self.load.output_file {
            validate_path("load.output_file", file)?;
        }

        validate_range("summary.limit", self.summary_limit(), 0, MAX_SUMMARY_LIMIT)?;

        Ok(())
    }
}

impl ConfigProvider for ShapeConfig {
    fn input_path(&self) -> &str {
        self.source.input.as_deref().unwrap_or_default()
    }

    fn pointer(&self) -> Option<&str> {
        self.source.pointer.as_deref()
    }

    fn output_path(&self) -> &str {
        self.load.output_path.as_deref().unwrap_or(DEFAULT_OUTPUT_PATH)
    }

    fn output_file(&self) -> String {
        self.load
            .output_file
            .clone()
            .unwrap_or_else(|| format!("entries.{}", self.format().extension()))
    }

    fn output_format(&self) -> OutputFormat {
        self.format()
    }

    fn entry_options(&self) -> EntryOptions {
        EntryOptions::new(self.key_field(), self.value_field(), self.humanize_keys())
    }

    fn summary_limit(&self) -> usize {
        self.summary
            .as_ref()
            .and_then(|s| s.limit)
            .unwrap_or(DEFAULT_SUMMARY_LIMIT)
    }
}

impl Validate for ShapeConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
