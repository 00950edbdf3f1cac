use anyhow::Result;
use serde::Deserialize;
use std::path::Path;

// 配置文件结构，所有字段都有默认值
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub processing: ProcessingConfig,
    pub database: DatabaseConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ApiConfig {
    pub dictionary_url: String,
    pub translation_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            dictionary_url: "https://api.dictionaryapi.dev/api/v2/entries/en".to_string(),
            translation_url: "https://api.mymemory.translated.net/get".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ProcessingConfig {
    pub request_delay_ms: u64,
    pub translation_delay_ms: u64,
    pub max_retries: u32,
    pub request_timeout_seconds: u64,
    pub max_definitions: usize,
    pub max_examples: usize,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        ProcessingConfig {
            request_delay_ms: 500,
            translation_delay_ms: 300,
            max_retries: 2,
            request_timeout_seconds: 15,
            max_definitions: 3,
            max_examples: 2,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DatabaseConfig {
    pub db_file: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        DatabaseConfig {
            db_file: "big-big-words.db".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct OutputConfig {
    pub export_dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            export_dir: ".".to_string(),
        }
    }
}

impl Config {
    /// 读取配置文件，文件不存在时使用默认配置
    pub fn load(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("配置文件 {} 不存在，使用默认配置", path.display());
            return Ok(Config::default());
        }

        let config_content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("配置文件 {} 无法读取: {}", path.display(), e))?;
        Config::parse(&config_content)
    }

    pub fn parse(content: &str) -> Result<Config> {
        let config: Config =
            toml::from_str(content).map_err(|e| anyhow::anyhow!("配置文件解析失败: {}", e))?;
        Ok(config)
    }
}
