use anyhow::{Context, Result};
use bankcsv_extract::ExtractorConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub gemini: GeminiSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiSection {
    pub api_url: String,
    pub model: String,
    /// Inline key. When unset, the GEMINI_API_KEY environment variable is
    /// used instead.
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gemini: GeminiSection {
                api_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
                model: "gemini-2.5-flash".to_string(),
                api_key: None,
                timeout_secs: 60,
            },
        }
    }
}

fn bankcsv_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".bankcsv"))
}

fn ensure_bankcsv_home() -> Result<PathBuf> {
    let dir = bankcsv_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_bankcsv_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    Ok(toml::from_str(&s).context("parse config.toml")?)
}

pub fn save_config(cfg: &Config) -> Result<()> {
    let p = config_path()?;
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    let cfg = Config::default();
    save_config(&cfg)?;
    println!("Wrote {}", p.display());
    Ok(())
}

/// Resolve the loaded config into the extractor's explicit configuration.
pub fn extractor_config(cfg: &Config) -> Result<ExtractorConfig> {
    let api_key = cfg
        .gemini
        .api_key
        .clone()
        .or_else(|| std::env::var("GEMINI_API_KEY").ok())
        .context("no API key: set gemini.api_key in config.toml or GEMINI_API_KEY")?;

    Ok(ExtractorConfig {
        api_url: cfg.gemini.api_url.clone(),
        api_key,
        model: cfg.gemini.model.clone(),
        timeout: Duration::from_secs(cfg.gemini.timeout_secs),
    })
}
