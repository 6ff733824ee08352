//! AI CLI連携モジュール
//!
//! claude / codex / gemini のCLIを子プロセスとして1回実行し、
//! 標準出力を要約テキストとして扱う

use super::Summarizer;
use crate::ai_provider::AiProvider;
use crate::error::{ProfCalcError, Result};
use profcalc_common::{build_summary_prompt, parse_summary_response};
use std::future::Future;
use tokio::process::Command;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct CliSummarizer {
    provider: AiProvider,
    program: String,
}

impl CliSummarizer {
    pub fn new(provider: AiProvider) -> Result<Self> {
        let program = provider.command_name().ok_or_else(|| {
            ProfCalcError::Config(format!("{:?} n'est pas une CLI locale", provider))
        })?;
        Ok(Self {
            provider,
            program: program.to_string(),
        })
    }

    /// 実行ファイルを差し替える（ラッパースクリプト等）
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn provider(&self) -> AiProvider {
        self.provider
    }
}

impl Summarizer for CliSummarizer {
    fn summarize(&self, points: &[f64]) -> impl Future<Output = Result<String>> + Send {
        let prompt = build_summary_prompt(points);
        async move {
            let response = run_ai_cli(&self.program, &self.provider.cli_args(&prompt)).await?;
            Ok(parse_summary_response(&response)?)
        }
    }
}

async fn run_ai_cli(program: &str, args: &[String]) -> Result<String> {
    debug!("running {} ({} args)", program, args.len());

    // Windowsではcmd /c経由（改行を含む引数は渡せないため空白に置換）
    #[cfg(windows)]
    let output = Command::new("cmd")
        .arg("/c")
        .arg(program)
        .args(args.iter().map(|a| a.replace('\n', " ").replace('"', "\\\"")))
        .output()
        .await
        .map_err(|e| ProfCalcError::CliExecution(format!("{}: {}", program, e)))?;

    #[cfg(not(windows))]
    let output = Command::new(program)
        .args(args)
        .output()
        .await
        .map_err(|e| ProfCalcError::CliExecution(format!("{}: {}", program, e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ProfCalcError::CliExecution(format!(
            "{} failed (code {:?}): {}",
            program,
            output.status.code(),
            stderr.trim()
        )));
    }

    let response = String::from_utf8_lossy(&output.stdout).to_string();
    debug!("{} responded with {} chars", program, response.len());
    Ok(response)
}
