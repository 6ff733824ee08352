//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use profcalc::config::Config;
use profcalc::error::ProfCalcError;
use profcalc::shell::parse_grade_value;
use profcalc_common::GradingSession;
use tempfile::tempdir;

/// 不正なJSON設定ファイル
#[test]
fn test_load_corrupted_config() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ invalid json }").unwrap();

    let result = Config::load_from(&path);
    assert!(matches!(result, Err(ProfCalcError::JsonParse(_))));
}

/// スケール外の配点
#[test]
fn test_grade_not_allowed_is_transparent() {
    let mut session = GradingSession::default();
    let err: ProfCalcError = session.append(0.3).unwrap_err().into();

    assert!(matches!(err, ProfCalcError::Common(_)));
    assert_eq!(err.to_string(), "Grade value not allowed: 0.3");
}

/// 数値でない入力
#[test]
fn test_invalid_number_input() {
    let err = parse_grade_value("douze").unwrap_err();
    assert!(matches!(err, ProfCalcError::InvalidInput(_)));
    assert!(err.to_string().contains("douze"));
}

/// ProfCalcErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        ProfCalcError::Config("erreur de test".to_string()),
        ProfCalcError::ApiCall("HTTP 500".to_string()),
        ProfCalcError::ApiParse("réponse vide".to_string()),
        ProfCalcError::CliExecution("claude introuvable".to_string()),
        ProfCalcError::Preference("fichier illisible".to_string()),
        ProfCalcError::InvalidInput("abc".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "message vide: {:?}", err);
    }
}

/// MissingApiKeyエラーのメッセージ確認
#[test]
fn test_missing_api_key_message() {
    let display = ProfCalcError::MissingApiKey.to_string();

    assert!(display.contains("profcalc config --set-api-key"));
    assert!(display.contains("GEMINI_API_KEY"));
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: ProfCalcError = io_err.into();

    assert!(matches!(err, ProfCalcError::Io(_)));
    assert!(err.to_string().contains("file not found"));
}
