//! 配点値の定義
//!
//! 配点は1/1000点単位の整数で保持する。浮動小数の加算誤差を避け、
//! 合計の2桁丸め（四捨五入）を厳密に行うため。

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 1点あたりの内部単位数
pub const MILLIS_PER_POINT: u32 = 1000;

/// 標準の配点ボタン
pub const DEFAULT_INCREMENTS: &[f64] = &[
    0.25, 0.5, 0.75, 1.0,
    1.25, 1.5, 1.75, 2.0,
    2.25, 2.5, 2.75, 3.0,
    3.25, 3.5, 4.0, 5.0,
];

/// 1つの配点（加算される部分点）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GradeEntry {
    millis: u32,
}

impl GradeEntry {
    pub fn from_millis(millis: u32) -> Self {
        Self { millis }
    }

    pub fn millis(&self) -> u32 {
        self.millis
    }

    pub fn value(&self) -> f64 {
        f64::from(self.millis) / f64::from(MILLIS_PER_POINT)
    }
}

impl fmt::Display for GradeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_decimal(u64::from(self.millis), 3))
    }
}

/// 2桁に丸めた合計点
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Total {
    hundredths: u64,
}

impl Total {
    /// 1/1000単位の合計から作成（四捨五入で2桁に丸める）
    pub fn from_millis(millis: u64) -> Self {
        Self {
            hundredths: round_half_up_hundredths(millis),
        }
    }

    pub fn hundredths(&self) -> u64 {
        self.hundredths
    }

    pub fn value(&self) -> f64 {
        self.hundredths as f64 / 100.0
    }
}

impl fmt::Display for Total {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_decimal(self.hundredths, 2))
    }
}

impl Serialize for Total {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.value())
    }
}

impl<'de> Deserialize<'de> for Total {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        if value == 0.0 {
            return Ok(Total::default());
        }
        to_millis(value)
            .map(|m| Total::from_millis(u64::from(m)))
            .ok_or_else(|| serde::de::Error::custom(format!("invalid total: {}", value)))
    }
}

/// 許可された配点の閉集合
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeScale {
    allowed: Vec<GradeEntry>,
}

impl GradeScale {
    /// 配点リストからスケールを作成（昇順・重複除去）
    pub fn new(increments: &[f64]) -> Result<Self> {
        let mut allowed = increments
            .iter()
            .map(|&v| to_millis(v).map(GradeEntry::from_millis).ok_or(Error::InvalidIncrement(v)))
            .collect::<Result<Vec<_>>>()?;

        if allowed.is_empty() {
            return Err(Error::EmptyScale);
        }

        allowed.sort();
        allowed.dedup();
        Ok(Self { allowed })
    }

    /// 値を配点に変換（スケール外ならエラー）
    pub fn entry(&self, value: f64) -> Result<GradeEntry> {
        to_millis(value)
            .map(GradeEntry::from_millis)
            .filter(|e| self.contains(e))
            .ok_or(Error::GradeNotAllowed(value))
    }

    pub fn contains(&self, entry: &GradeEntry) -> bool {
        self.allowed.binary_search(entry).is_ok()
    }

    pub fn entries(&self) -> &[GradeEntry] {
        &self.allowed
    }
}

impl Default for GradeScale {
    fn default() -> Self {
        let allowed = DEFAULT_INCREMENTS
            .iter()
            .filter_map(|&v| to_millis(v))
            .map(GradeEntry::from_millis)
            .collect();
        Self { allowed }
    }
}

/// 点数を1/1000単位に変換
///
/// 0以下・非有限・小数第4位以下を持つ値は `None`
pub fn to_millis(value: f64) -> Option<u32> {
    if !value.is_finite() || value <= 0.0 {
        return None;
    }
    let scaled = value * f64::from(MILLIS_PER_POINT);
    let rounded = scaled.round();
    if (scaled - rounded).abs() > 1e-6 || rounded > f64::from(u32::MAX) {
        return None;
    }
    Some(rounded as u32)
}

/// 1/1000単位 → 1/100単位（四捨五入）
pub fn round_half_up_hundredths(millis: u64) -> u64 {
    (millis + 5) / 10
}

/// 固定小数を末尾0なしで表記（例: 1000,3 → "1", 750,3 → "0.75"）
pub fn format_decimal(value: u64, decimals: u32) -> String {
    let divisor = 10u64.pow(decimals);
    let int_part = value / divisor;
    let frac_part = value % divisor;
    if frac_part == 0 {
        return int_part.to_string();
    }

    let mut frac = format!("{:0width$}", frac_part, width = decimals as usize);
    while frac.ends_with('0') {
        frac.pop();
    }
    format!("{}.{}", int_part, frac)
}
