//! 採点セッション（状態オブジェクト）
//!
//! UIから独立したコマンドハンドラ:
//! - append / remove_at / reset
//! - begin_analysis / finish_analysis
//!
//! 解析リクエストは世代番号付きのトークンで管理する。配点リストが
//! 変更されると世代が進み、古い世代のレスポンスは破棄される。

use crate::accumulator::Accumulator;
use crate::error::Result;
use crate::grade::{GradeEntry, GradeScale, Total};
use crate::ledger::{HistoryItem, HistoryLedger};
use thiserror::Error;

/// 解析に必要な最小配点数
pub const MIN_ANALYSIS_ENTRIES: usize = 3;

/// 解析失敗時にユーザーへ表示する汎用メッセージ
pub const ANALYSIS_FAILURE_MESSAGE: &str =
    "L'analyse n'a pas pu être générée. Réessayez plus tard.";

/// 解析リクエストの識別子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestToken {
    id: u64,
    generation: u64,
}

impl RequestToken {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// 送信許可された解析リクエスト
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisTicket {
    pub token: RequestToken,
    pub points: Vec<f64>,
}

/// 解析リクエストの拒否理由
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisRejection {
    #[error("Ajoutez au moins {required} segments de notes pour une analyse pertinente.")]
    NotEnoughEntries { required: usize, actual: usize },

    #[error("Une analyse est déjà en cours, veuillez patienter.")]
    Busy,
}

/// 解析完了の反映結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisOutcome {
    /// 解析結果を反映した
    Applied,
    /// 失敗（結果は未設定）
    Failed,
    /// 送信後に配点が変わったため破棄した
    Stale,
    /// 送信中のリクエストと一致しない
    Unrecognized,
}

/// 確定時の戻り値
#[derive(Debug, Clone, PartialEq)]
pub struct ResetReceipt {
    pub item: HistoryItem,
    /// クリップボードへ書き出す合計
    pub clipboard_text: String,
}

#[derive(Debug, Clone, Default)]
pub struct GradingSession {
    accumulator: Accumulator,
    ledger: HistoryLedger,
    analysis: Option<String>,
    generation: u64,
    in_flight: Option<RequestToken>,
    next_request_id: u64,
}

impl GradingSession {
    pub fn new(scale: GradeScale) -> Self {
        Self {
            accumulator: Accumulator::new(scale),
            ..Default::default()
        }
    }

    pub fn append(&mut self, value: f64) -> Result<GradeEntry> {
        let entry = self.accumulator.append(value)?;
        self.generation += 1;
        Ok(entry)
    }

    pub fn remove_at(&mut self, index: usize) -> Option<GradeEntry> {
        let removed = self.accumulator.remove_at(index);
        if removed.is_some() {
            self.generation += 1;
        }
        removed
    }

    /// 確定: 履歴に記録して配点と解析結果をクリア
    ///
    /// 配点が空なら履歴は作らない（解析結果のクリアのみ）
    pub fn reset(&mut self) -> Option<ResetReceipt> {
        self.analysis = None;
        let item = self.accumulator.reset(&mut self.ledger)?;
        self.generation += 1;
        let clipboard_text = item.total().to_string();
        Some(ResetReceipt {
            item,
            clipboard_text,
        })
    }

    /// 解析リクエストの受付
    pub fn begin_analysis(&mut self) -> std::result::Result<AnalysisTicket, AnalysisRejection> {
        let actual = self.accumulator.len();
        if actual < MIN_ANALYSIS_ENTRIES {
            return Err(AnalysisRejection::NotEnoughEntries {
                required: MIN_ANALYSIS_ENTRIES,
                actual,
            });
        }
        if self.in_flight.is_some() {
            return Err(AnalysisRejection::Busy);
        }

        self.next_request_id += 1;
        let token = RequestToken {
            id: self.next_request_id,
            generation: self.generation,
        };
        self.in_flight = Some(token);

        Ok(AnalysisTicket {
            token,
            points: self.accumulator.values(),
        })
    }

    /// 解析完了の反映
    ///
    /// 送信中フラグは成功・失敗・破棄のいずれでも解除される
    pub fn finish_analysis<E>(
        &mut self,
        token: RequestToken,
        result: std::result::Result<String, E>,
    ) -> AnalysisOutcome {
        if self.in_flight != Some(token) {
            return AnalysisOutcome::Unrecognized;
        }
        self.in_flight = None;

        if token.generation != self.generation {
            return AnalysisOutcome::Stale;
        }

        match result {
            Ok(text) if !text.trim().is_empty() => {
                self.analysis = Some(text.trim().to_string());
                AnalysisOutcome::Applied
            }
            _ => {
                self.analysis = None;
                AnalysisOutcome::Failed
            }
        }
    }

    pub fn total(&self) -> Total {
        self.accumulator.total()
    }

    pub fn accumulator(&self) -> &Accumulator {
        &self.accumulator
    }

    pub fn ledger(&self) -> &HistoryLedger {
        &self.ledger
    }

    pub fn analysis(&self) -> Option<&str> {
        self.analysis.as_deref()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}
