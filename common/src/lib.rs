//! ProfCalc Common Library
//!
//! 採点計算のコアロジック（UI・ネットワークに依存しない）
//!
//! - 配点の加算・削除・合計（Accumulator）
//! - 確定履歴（HistoryLedger, 最大50件）
//! - AI解析リクエストの受付判定と古いレスポンスの破棄（GradingSession）

pub mod accumulator;
pub mod error;
pub mod grade;
pub mod ledger;
pub mod parser;
pub mod prompts;
pub mod session;
pub mod theme;

pub use accumulator::Accumulator;
pub use error::{Error, Result};
pub use grade::{GradeEntry, GradeScale, Total, DEFAULT_INCREMENTS};
pub use ledger::{HistoryItem, HistoryLedger, HISTORY_CAPACITY};
pub use parser::parse_summary_response;
pub use prompts::build_summary_prompt;
pub use session::{
    AnalysisOutcome, AnalysisRejection, AnalysisTicket, GradingSession, RequestToken,
    ResetReceipt, ANALYSIS_FAILURE_MESSAGE, MIN_ANALYSIS_ENTRIES,
};
pub use theme::{Theme, THEME_PREFERENCE_KEY};
