use crate::error::{DublettenError, Result};
use dubletten_common::check::EXACT_GROUP_COLUMN;
use dubletten_common::identifier::IDENTIFIER_COLUMN;
use dubletten_common::year::{BOERSENBLATT_DIGICODE, YEAR_GROUP_COLUMN};
use dubletten_common::CheckRequest;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// グループ列（完全一致モード）
    pub group_column: String,
    /// グループ列（Börsenblatt）
    pub year_group_column: String,
    pub identifier_column: String,
    pub digicode: String,
    /// 読み込み後に表示する行数
    pub preview_rows: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            group_column: EXACT_GROUP_COLUMN.into(),
            year_group_column: YEAR_GROUP_COLUMN.into(),
            identifier_column: IDENTIFIER_COLUMN.into(),
            digicode: BOERSENBLATT_DIGICODE.into(),
            preview_rows: 5,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            log::debug!("Konfiguration geladen: {}", config_path.display());
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| DublettenError::Config("Home-Verzeichnis nicht gefunden".into()))?;
        Ok(home.join(".config").join("dubletten-check").join("config.json"))
    }

    /// 完全一致モードのリクエスト
    pub fn exact_request(&self, column: impl Into<String>) -> CheckRequest {
        CheckRequest {
            group_column: self.group_column.clone(),
            identifier_column: self.identifier_column.clone(),
            digicode: self.digicode.clone(),
            ..CheckRequest::exact(column)
        }
    }

    /// Börsenblatt のリクエスト
    pub fn year_request(&self) -> CheckRequest {
        CheckRequest {
            group_column: self.year_group_column.clone(),
            identifier_column: self.identifier_column.clone(),
            digicode: self.digicode.clone(),
            ..CheckRequest::boersenblatt()
        }
    }
}
