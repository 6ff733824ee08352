//! テーマ設定の永続化テスト

use profcalc::preferences::{JsonFileStore, PreferenceStore, ThemeSetting};
use profcalc_common::{Theme, THEME_PREFERENCE_KEY};
use tempfile::tempdir;

/// ファイルが無ければ既定テーマ
#[test]
fn test_missing_file_defaults_to_emerald() {
    let dir = tempdir().expect("Failed to create temp dir");
    let store = JsonFileStore::new(dir.path().join("preferences.json"));

    let setting = ThemeSetting::load(store);
    assert_eq!(setting.theme(), Theme::Emerald);
}

/// 変更は即座に保存され、再起動後に読み込まれる
#[test]
fn test_theme_survives_restart() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("profcalc").join("preferences.json");

    let mut setting = ThemeSetting::load(JsonFileStore::new(&path));
    setting.set(Theme::Indigo).unwrap();
    assert!(path.exists());

    let reloaded = ThemeSetting::load(JsonFileStore::new(&path));
    assert_eq!(reloaded.theme(), Theme::Indigo);
}

/// 固定キーで保存される
#[test]
fn test_stored_under_fixed_key() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("preferences.json");

    let mut setting = ThemeSetting::load(JsonFileStore::new(&path));
    setting.set(Theme::Dark).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(json[THEME_PREFERENCE_KEY], "dark");
}

/// 他のキーは保持される
#[test]
fn test_other_keys_preserved() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("preferences.json");
    std::fs::write(&path, r#"{"autre": "valeur"}"#).unwrap();

    let mut store = JsonFileStore::new(&path);
    store.write(THEME_PREFERENCE_KEY, "rose").unwrap();

    assert_eq!(store.read("autre").unwrap().as_deref(), Some("valeur"));
    assert_eq!(store.read(THEME_PREFERENCE_KEY).unwrap().as_deref(), Some("rose"));
}

/// 不正な値は既定テーマ
#[test]
fn test_invalid_value_falls_back() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("preferences.json");
    std::fs::write(&path, format!(r#"{{"{}": "neon"}}"#, THEME_PREFERENCE_KEY)).unwrap();

    let setting = ThemeSetting::load(JsonFileStore::new(&path));
    assert_eq!(setting.theme(), Theme::Emerald);
}

/// 壊れたファイルは既定テーマ、書き込みで作り直す
#[test]
fn test_corrupted_file_recovers() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("preferences.json");
    std::fs::write(&path, "{ invalid json }").unwrap();

    let mut setting = ThemeSetting::load(JsonFileStore::new(&path));
    assert_eq!(setting.theme(), Theme::Emerald);

    setting.set(Theme::Slate).unwrap();
    let reloaded = ThemeSetting::load(JsonFileStore::new(&path));
    assert_eq!(reloaded.theme(), Theme::Slate);
}

/// 保存先のパスを返す
#[test]
fn test_store_reports_path() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("preferences.json");
    let store = JsonFileStore::new(&path);
    assert_eq!(store.path(), path.as_path());
}
