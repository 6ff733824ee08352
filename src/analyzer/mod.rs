mod ai_cli;
mod gemini;

pub use ai_cli::CliSummarizer;
pub use gemini::{extract_text, GeminiClient, GeminiResponse, GEMINI_API_BASE};

use crate::ai_provider::AiProvider;
use crate::config::Config;
use crate::error::Result;
use profcalc_common::{AnalysisOutcome, AnalysisRejection, AnalysisTicket, GradingSession, RequestToken};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// 配点リストから教育的コメントを生成する外部サービス
pub trait Summarizer: Send + Sync {
    fn summarize(&self, points: &[f64]) -> impl Future<Output = Result<String>> + Send;
}

/// 設定で選ばれた要約サービス
#[derive(Clone)]
pub enum AnySummarizer {
    Gemini(GeminiClient),
    Cli(CliSummarizer),
}

impl AnySummarizer {
    pub fn for_provider(provider: AiProvider, config: &Config) -> Result<Self> {
        let summarizer = match provider {
            AiProvider::GeminiApi => AnySummarizer::Gemini(GeminiClient::from_config(config)?),
            _ => AnySummarizer::Cli(CliSummarizer::new(provider)?),
        };
        debug!("summarizer: {}", summarizer.describe());
        Ok(summarizer)
    }

    /// ログ・表示用の名前
    pub fn describe(&self) -> String {
        match self {
            AnySummarizer::Gemini(client) => format!("Gemini API ({})", client.model()),
            AnySummarizer::Cli(cli) => format!("{:?} CLI", cli.provider()),
        }
    }
}

impl Summarizer for AnySummarizer {
    fn summarize(&self, points: &[f64]) -> impl Future<Output = Result<String>> + Send {
        let points = points.to_vec();
        async move {
            match self {
                AnySummarizer::Gemini(client) => client.summarize(&points).await,
                AnySummarizer::Cli(cli) => cli.summarize(&points).await,
            }
        }
    }
}

/// 非同期に完了した解析
#[derive(Debug)]
pub struct Completion {
    pub token: RequestToken,
    pub result: Result<String>,
}

/// 解析を1回実行して結果をセッションに反映する
///
/// 送信中はセッションを借用し続けるため、ワンショット実行向け
pub async fn run_analysis<S: Summarizer>(
    session: &mut GradingSession,
    summarizer: &S,
) -> std::result::Result<AnalysisOutcome, AnalysisRejection> {
    let ticket = session.begin_analysis()?;
    debug!("analysis dispatched: {} points", ticket.points.len());

    let result = summarizer.summarize(&ticket.points).await;
    if let Err(e) = &result {
        warn!("summarizer failed: {}", e);
    }
    Ok(session.finish_analysis(ticket.token, result))
}

/// 解析をバックグラウンドで実行し、完了をチャネルで返す
pub fn spawn_analysis<S>(
    summarizer: Arc<S>,
    ticket: AnalysisTicket,
    completions: UnboundedSender<Completion>,
) -> JoinHandle<()>
where
    S: Summarizer + 'static,
{
    tokio::spawn(async move {
        let result = summarizer.summarize(&ticket.points).await;
        if completions
            .send(Completion {
                token: ticket.token,
                result,
            })
            .is_err()
        {
            debug!("analysis finished after the session closed");
        }
    })
}
