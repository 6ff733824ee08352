//! 表示テーマ

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 設定ストアのキー（固定）
pub const THEME_PREFERENCE_KEY: &str = "profcalc-theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Emerald,
    Indigo,
    Rose,
    Slate,
    Dark,
}

impl Theme {
    pub const ALL: [Theme; 5] = [
        Theme::Emerald,
        Theme::Indigo,
        Theme::Rose,
        Theme::Slate,
        Theme::Dark,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Emerald => "emerald",
            Theme::Indigo => "indigo",
            Theme::Rose => "rose",
            Theme::Slate => "slate",
            Theme::Dark => "dark",
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, Theme::Dark)
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        Theme::ALL
            .into_iter()
            .find(|t| t.as_str() == name)
            .ok_or_else(|| Error::UnknownTheme(s.to_string()))
    }
}
