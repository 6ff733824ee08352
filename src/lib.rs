//! ProfCalc - 教員向け採点計算ツール
//!
//! 部分点を積み上げて合計を出し、確定した合計を履歴とクリップボードに残す。
//! 配点リストからAIによる教育的コメントを生成できる。
//!
//! 採点の状態管理は `profcalc_common` にあり、このクレートは端末UI・
//! 設定・AI呼び出しを担う。

pub mod ai_provider;
pub mod analyzer;
pub mod cli;
pub mod clipboard;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod preferences;
pub mod shell;
