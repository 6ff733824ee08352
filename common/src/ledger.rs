//! 確定履歴
//!
//! 新しい順に保持し、上限（50件）を超えた古いものから捨てる。
//! 記録済みの項目は変更・削除できない。

use crate::accumulator::join_expression;
use crate::grade::{GradeEntry, Total};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use uuid::Uuid;

/// 履歴の保持上限
pub const HISTORY_CAPACITY: usize = 50;

/// 確定時のスナップショット
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItem {
    id: String,
    expression: String,
    result: Total,
    timestamp: DateTime<Utc>,
}

impl HistoryItem {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn result(&self) -> f64 {
        self.result.value()
    }

    pub fn total(&self) -> Total {
        self.result
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

#[derive(Debug, Clone)]
pub struct HistoryLedger {
    items: VecDeque<HistoryItem>,
    capacity: usize,
}

impl HistoryLedger {
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    /// 上限は最低1件
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// 先頭に記録し、上限を超えた末尾を捨てる
    pub fn record(&mut self, entries: &[GradeEntry], total: Total) -> &HistoryItem {
        let item = HistoryItem {
            id: Uuid::new_v4().simple().to_string(),
            expression: join_expression(entries),
            result: total,
            timestamp: Utc::now(),
        };
        self.items.push_front(item);
        self.items.truncate(self.capacity);
        &self.items[0]
    }

    /// 新しい順に最大n件（遅延・再走査可能）
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &HistoryItem> + Clone + '_ {
        self.items.iter().take(n)
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryItem> + Clone + '_ {
        self.items.iter()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for HistoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(millis: u32) -> GradeEntry {
        GradeEntry::from_millis(millis)
    }

    #[test]
    fn test_record_builds_item() {
        let mut ledger = HistoryLedger::new();
        let entries = [entry(500), entry(1000), entry(750)];
        let item = ledger.record(&entries, Total::from_millis(2250)).clone();

        assert_eq!(item.expression(), "0.5 + 1 + 0.75");
        assert_eq!(item.result(), 2.25);
        assert_eq!(item.id().len(), 32);
        assert!(item.timestamp() <= Utc::now());
    }

    #[test]
    fn test_ids_are_unique() {
        let mut ledger = HistoryLedger::new();
        let a = ledger.record(&[entry(250)], Total::from_millis(250)).id().to_string();
        let b = ledger.record(&[entry(250)], Total::from_millis(250)).id().to_string();
        assert_ne!(a, b);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut ledger = HistoryLedger::new();
        for i in 1..=51u32 {
            ledger.record(&[entry(i * 250)], Total::from_millis(u64::from(i) * 250));
        }

        assert_eq!(ledger.len(), HISTORY_CAPACITY);
        // 最新が先頭
        assert_eq!(ledger.iter().next().unwrap().total(), Total::from_millis(51 * 250));
        // 最初の記録は消えている
        assert!(ledger.iter().all(|item| item.total() != Total::from_millis(250)));
        // 新しい順
        let results: Vec<u64> = ledger.iter().map(|i| i.total().hundredths()).collect();
        let mut sorted = results.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(results, sorted);
        assert_eq!(ledger.iter().last().unwrap().total(), Total::from_millis(2 * 250));
    }

    #[test]
    fn test_zero_capacity_keeps_latest() {
        let mut ledger = HistoryLedger::with_capacity(0);
        assert_eq!(ledger.capacity(), 1);

        ledger.record(&[entry(1000)], Total::from_millis(1000));
        let latest = ledger.record(&[entry(2000)], Total::from_millis(2000));
        assert_eq!(latest.result(), 2.0);
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_recent_is_restartable_and_bounded() {
        let mut ledger = HistoryLedger::new();
        for i in 1..=5u32 {
            ledger.record(&[entry(i * 1000)], Total::from_millis(u64::from(i) * 1000));
        }

        let view = ledger.recent(3);
        let first: Vec<f64> = view.clone().map(|i| i.result()).collect();
        let second: Vec<f64> = view.map(|i| i.result()).collect();
        assert_eq!(first, vec![5.0, 4.0, 3.0]);
        assert_eq!(first, second);

        assert_eq!(ledger.recent(10).count(), 5);
        assert_eq!(ledger.recent(0).count(), 0);
        assert_eq!(ledger.len(), 5);
    }

    #[test]
    fn test_item_serializes_camel_case() {
        let mut ledger = HistoryLedger::new();
        let item = ledger.record(&[entry(1000), entry(2000)], Total::from_millis(3000));
        let json = serde_json::to_value(item).unwrap();
        assert_eq!(json["expression"], "1 + 2");
        assert_eq!(json["result"], 3.0);
        assert!(json["timestamp"].is_string());
    }
}
