//! 永続化される表示設定
//!
//! キー・値ストアに固定キーでテーマを保存する。起動時に一度だけ読み込み、
//! 変更のたびに同期的に書き込む。

use crate::config::Config;
use crate::error::{ProfCalcError, Result};
use profcalc_common::{Theme, THEME_PREFERENCE_KEY};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const PREFERENCES_FILE_NAME: &str = "preferences.json";

/// キー・値ストア
pub trait PreferenceStore {
    fn read(&self, key: &str) -> Result<Option<String>>;
    fn write(&mut self, key: &str, value: &str) -> Result<()>;
}

/// JSONオブジェクト1つを保存するファイルストア
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// ~/.config/profcalc/preferences.json
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(Config::config_dir()?.join(PREFERENCES_FILE_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_map(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        serde_json::from_str(&content).map_err(|e| {
            ProfCalcError::Preference(format!("{} : {}", self.path.display(), e))
        })
    }
}

impl PreferenceStore for JsonFileStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load_map()?.remove(key))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        // 壊れたファイルは作り直す
        let mut map = self.load_map().unwrap_or_else(|e| {
            warn!("preferences file unreadable, recreating: {}", e);
            BTreeMap::new()
        });
        map.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&map)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

/// メモリ上のストア
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.values.insert(key.to_string(), value.to_string());
        store
    }
}

impl PreferenceStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// 起動時に読み込んだテーマと、その保存先
#[derive(Debug)]
pub struct ThemeSetting<S: PreferenceStore> {
    theme: Theme,
    store: S,
}

impl<S: PreferenceStore> ThemeSetting<S> {
    /// 未設定・不正値・読み込み失敗は既定テーマ
    pub fn load(store: S) -> Self {
        let theme = match store.read(THEME_PREFERENCE_KEY) {
            Ok(Some(value)) => value.parse().unwrap_or_else(|_| {
                warn!("unknown theme '{}' in preferences, using default", value);
                Theme::default()
            }),
            Ok(None) => Theme::default(),
            Err(e) => {
                warn!("failed to read theme preference: {}", e);
                Theme::default()
            }
        };
        debug!("theme loaded: {}", theme);
        Self { theme, store }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// テーマを変更して保存
    pub fn set(&mut self, theme: Theme) -> Result<()> {
        self.theme = theme;
        self.store.write(THEME_PREFERENCE_KEY, theme.as_str())
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_default_theme() {
        let setting = ThemeSetting::load(MemoryStore::new());
        assert_eq!(setting.theme(), Theme::Emerald);
    }

    #[test]
    fn test_memory_store_invalid_value_falls_back() {
        let store = MemoryStore::with_value(THEME_PREFERENCE_KEY, "neon");
        let setting = ThemeSetting::load(store);
        assert_eq!(setting.theme(), Theme::Emerald);
    }

    #[test]
    fn test_set_writes_through() {
        let mut setting = ThemeSetting::load(MemoryStore::new());
        setting.set(Theme::Dark).unwrap();
        assert_eq!(setting.theme(), Theme::Dark);
        assert_eq!(
            setting.store().read(THEME_PREFERENCE_KEY).unwrap().as_deref(),
            Some("dark")
        );
    }
}
