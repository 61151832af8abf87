use crate::config::parse_timestamp_arg;
use crate::utils::error::{FilterError, Result};
use chrono::NaiveDateTime;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub filter: FilterConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterConfig {
    pub district: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub period_minutes: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub directory: Option<String>,
    pub verbose: Option<bool>,
}

impl FileConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let display = path.as_ref().display().to_string();
        let content =
            std::fs::read_to_string(&path).map_err(|e| FilterError::from_io(display, e))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| FilterError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables stay as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| FilterError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn delivery_start(&self) -> Result<Option<NaiveDateTime>> {
        parse_optional_timestamp("filter.start", self.filter.start.as_deref())
    }

    pub fn delivery_end(&self) -> Result<Option<NaiveDateTime>> {
        parse_optional_timestamp("filter.end", self.filter.end.as_deref())
    }
}

fn parse_optional_timestamp(field: &str, raw: Option<&str>) -> Result<Option<NaiveDateTime>> {
    raw.filter(|value| !value.trim().is_empty())
        .map(|value| {
            parse_timestamp_arg(value).map_err(|message| FilterError::InvalidConfigValueError {
                field: field.to_string(),
                value: value.to_string(),
                reason: message,
            })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let config = FileConfig::from_toml_str(
            r#"
[source]
path = "orders.csv"

[filter]
district = "DistrictA"
start = "2023-10-10 00:00:00"
end = "2023-10-11"
period_minutes = 60

[output]
path = "DeliveryOrder.csv"

[logging]
directory = "./logs"
verbose = true
"#,
        )
        .unwrap();

        assert_eq!(config.source.path.as_deref(), Some("orders.csv"));
        assert_eq!(config.filter.period_minutes, Some(60));
        assert!(config.delivery_start().unwrap().is_some());
        assert!(config.delivery_end().unwrap().is_some());
        assert_eq!(config.logging.verbose, Some(true));
    }

    #[test]
    fn test_sections_are_optional() {
        let config = FileConfig::from_toml_str("").unwrap();
        assert!(config.source.path.is_none());
        assert!(config.delivery_start().unwrap().is_none());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("DELIVERY_FILTER_TEST_SOURCE", "/data/orders.csv");

        let config = FileConfig::from_toml_str(
            r#"
[source]
path = "${DELIVERY_FILTER_TEST_SOURCE}"
"#,
        )
        .unwrap();
        assert_eq!(config.source.path.as_deref(), Some("/data/orders.csv"));

        std::env::remove_var("DELIVERY_FILTER_TEST_SOURCE");
    }

    #[test]
    fn test_bad_timestamp_is_reported_with_field() {
        let config = FileConfig::from_toml_str(
            r#"
[filter]
start = "10/10/2023"
"#,
        )
        .unwrap();

        match config.delivery_start() {
            Err(FilterError::InvalidConfigValueError { field, .. }) => {
                assert_eq!(field, "filter.start")
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_toml_is_rejected() {
        assert!(FileConfig::from_toml_str("[source\npath = 1").is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[output]\npath = \"result.csv\"\n")
            .unwrap();

        let config = FileConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.output.path.as_deref(), Some("result.csv"));
    }
}
