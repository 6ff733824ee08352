//! テーマ別の端末表示

use crossterm::style::{Color, ContentStyle, Stylize};
use profcalc_common::{Theme, Total};

/// テーマのアクセント色
pub fn accent_color(theme: Theme) -> Color {
    match theme {
        Theme::Emerald => Color::Green,
        Theme::Indigo => Color::Blue,
        Theme::Rose => Color::Red,
        Theme::Slate => Color::Grey,
        Theme::Dark => Color::Cyan,
    }
}

/// 合計の表示スタイル（ダークテーマは黒背景）
pub fn total_style(theme: Theme) -> ContentStyle {
    let style = ContentStyle::new().with(accent_color(theme)).bold();
    if theme.is_dark() {
        style.on(Color::Black)
    } else {
        style
    }
}

pub fn styled_total(total: Total, theme: Theme) -> String {
    total_style(theme).apply(total.to_string()).to_string()
}

pub fn styled_theme_name(theme: Theme) -> String {
    theme.as_str().with(accent_color(theme)).to_string()
}
