//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Grade value not allowed: {0}")]
    GradeNotAllowed(f64),

    #[error("Invalid increment: {0} (must be > 0 with at most 3 decimals)")]
    InvalidIncrement(f64),

    #[error("Grade scale must contain at least one increment")]
    EmptyScale,

    #[error("Unknown theme: {0}")]
    UnknownTheme(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
