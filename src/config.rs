use crate::error::{ItemizerError, Result};
use receipt_itemizer_common::FieldEscaping;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// バックエンドのオリジンを上書きする環境変数
pub const BACKEND_ENV: &str = "RECEIPT_ITEMIZER_BACKEND";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub backend_origin: String,
    pub process_path: String,
    pub export_dir: Option<PathBuf>,
    pub timeout_seconds: u64,
    pub escape_fields: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_origin: "http://localhost:5000".into(),
            process_path: "/api/process-receipt".into(),
            export_dir: None,
            timeout_seconds: 60,
            escape_fields: false,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config = Self::load_from(&Self::config_path()?)?;
        Ok(config.with_env_override(std::env::var(BACKEND_ENV).ok()))
    }

    /// 指定パスから読み込み（なければ既定値）
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| ItemizerError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("receipt-itemizer").join("config.json"))
    }

    // 環境変数を優先
    fn with_env_override(mut self, backend: Option<String>) -> Self {
        if let Some(origin) = backend.filter(|v| !v.trim().is_empty()) {
            self.backend_origin = origin.trim().to_string();
        }
        self
    }

    /// 出力先（未設定ならカレント）
    pub fn export_dir(&self) -> PathBuf {
        self.export_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn escaping(&self) -> FieldEscaping {
        FieldEscaping::from_flag(self.escape_fields)
    }

    pub fn set_backend(&mut self, origin: String) -> Result<()> {
        let origin = origin.trim().trim_end_matches('/').to_string();
        if !(origin.starts_with("http://") || origin.starts_with("https://")) {
            return Err(ItemizerError::Config(format!(
                "バックエンドURLは http:// または https:// で始めてください: {}",
                origin
            )));
        }
        self.backend_origin = origin;
        Ok(())
    }
}
