use crate::core::converter::ConverterRegistry;
use crate::core::Mapping;
use crate::utils::error::{Result, UploadError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    pub api: Option<ApiConfig>,
    #[serde(default)]
    pub mappings: Vec<Mapping>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub access_token: Option<String>,
    pub timeout_seconds: Option<u64>,
}

impl UploadConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(UploadError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| UploadError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${LMIS_TOKEN})，未設定的保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| UploadError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// API 設定，`find-facility` 必須提供
    pub fn require_api(&self) -> Result<&ApiConfig> {
        validation::validate_required_field("api", &self.api)
    }

    pub fn mappings(&self) -> &[Mapping] {
        &self.mappings
    }
}

impl Validate for ApiConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("api.base_url", &self.base_url)?;

        if let Some(timeout) = self.timeout_seconds {
            validation::validate_positive_number("api.timeout_seconds", timeout, 1)?;
        }

        Ok(())
    }
}

impl Validate for UploadConfig {
    fn validate(&self) -> Result<()> {
        if let Some(api) = &self.api {
            api.validate()?;
        }

        let registry = ConverterRegistry::with_defaults();
        for mapping in &self.mappings {
            validation::validate_non_empty_string("mappings.from", &mapping.from)?;
            validation::validate_non_empty_string("mappings.to", &mapping.to)?;
            if !registry.supports(&mapping.r#type) {
                return Err(UploadError::InvalidConfigValueError {
                    field: "mappings.type".to_string(),
                    value: mapping.r#type.clone(),
                    reason: "Unsupported type. Valid types: DIRECT, DIRECT_DATE".to_string(),
                });
            }
        }

        Ok(())
    }
}
