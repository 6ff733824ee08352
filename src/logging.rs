//! ログ初期化
//!
//! tracing のログは標準エラーへ出力し、画面表示（標準出力）と混ざらないようにする

use crate::error::{ProfCalcError, Result};
use tracing_subscriber::EnvFilter;

const DEFAULT_DIRECTIVE: &str = "warn";
const VERBOSE_DIRECTIVE: &str = "debug";

/// フィルタ指定: --verbose > RUST_LOG > 既定(warn)
pub fn filter_directive(verbose: bool, env: Option<&str>) -> String {
    if verbose {
        return VERBOSE_DIRECTIVE.to_string();
    }
    match env {
        Some(value) if !value.trim().is_empty() => value.to_string(),
        _ => DEFAULT_DIRECTIVE.to_string(),
    }
}

pub fn init(verbose: bool) -> Result<()> {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let directive = filter_directive(verbose, env.as_deref());
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| ProfCalcError::Config(format!("logging: {}", e)))
}
