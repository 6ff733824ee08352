//! 配点の積み上げ（現在入力中の部分点リスト）

use crate::error::Result;
use crate::grade::{GradeEntry, GradeScale, Total};
use crate::ledger::{HistoryItem, HistoryLedger};

/// 式表示の区切り
pub const EXPRESSION_SEPARATOR: &str = " + ";

/// 入力順を保持する配点リストと合計
#[derive(Debug, Clone, Default)]
pub struct Accumulator {
    scale: GradeScale,
    entries: Vec<GradeEntry>,
}

impl Accumulator {
    pub fn new(scale: GradeScale) -> Self {
        Self {
            scale,
            entries: Vec::new(),
        }
    }

    pub fn scale(&self) -> &GradeScale {
        &self.scale
    }

    /// 末尾に追加（スケール外の値はエラー、状態は変わらない）
    pub fn append(&mut self, value: f64) -> Result<GradeEntry> {
        let entry = self.scale.entry(value)?;
        self.entries.push(entry);
        Ok(entry)
    }

    /// 指定位置を削除。範囲外は何もしない
    pub fn remove_at(&mut self, index: usize) -> Option<GradeEntry> {
        if index < self.entries.len() {
            Some(self.entries.remove(index))
        } else {
            None
        }
    }

    /// 合計（2桁、四捨五入）
    pub fn total(&self) -> Total {
        let millis: u64 = self.entries.iter().map(|e| u64::from(e.millis())).sum();
        Total::from_millis(millis)
    }

    /// 確定: 空でなければ履歴に記録してからクリア
    pub fn reset(&mut self, ledger: &mut HistoryLedger) -> Option<HistoryItem> {
        if self.entries.is_empty() {
            return None;
        }
        let total = self.total();
        let item = ledger.record(&self.entries, total).clone();
        self.entries.clear();
        Some(item)
    }

    pub fn entries(&self) -> &[GradeEntry] {
        &self.entries
    }

    pub fn values(&self) -> Vec<f64> {
        self.entries.iter().map(GradeEntry::value).collect()
    }

    /// "0.5 + 1 + 0.75" 形式の式
    pub fn expression(&self) -> String {
        join_expression(&self.entries)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn join_expression(entries: &[GradeEntry]) -> String {
    entries
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(EXPRESSION_SEPARATOR)
}
