//! AIレスポンスパーサー
//!
//! 要約テキストからコードフェンスや前後の空白を取り除く

use crate::error::{Error, Result};

/// 要約レスポンスを整形
///
/// 抽出優先順位:
/// 1. 全体を囲む ``` ... ``` ブロックの中身
/// 2. レスポンス全体
///
/// 空の場合はエラー
///
/// # Examples
/// ```
/// use profcalc_common::parse_summary_response;
///
/// let text = parse_summary_response("```\nBon travail.\n```").unwrap();
/// assert_eq!(text, "Bon travail.");
/// ```
pub fn parse_summary_response(response: &str) -> Result<String> {
    let trimmed = response.trim();
    let body = strip_code_fence(trimmed).unwrap_or(trimmed).trim();

    if body.is_empty() {
        return Err(Error::Parse("réponse vide".into()));
    }
    Ok(body.to_string())
}

fn strip_code_fence(text: &str) -> Option<&str> {
    let rest = text.strip_prefix("```")?;
    let rest = rest.strip_suffix("```")?;
    // 言語指定（```markdown など）の行を飛ばす
    match rest.find('\n') {
        Some(newline) if !rest[..newline].contains(' ') => Some(&rest[newline + 1..]),
        _ => Some(rest),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_text() {
        let text = parse_summary_response("  Bonne copie.\nContinuez.  \n").unwrap();
        assert_eq!(text, "Bonne copie.\nContinuez.");
    }

    #[test]
    fn test_parse_fenced_with_language() {
        let response = "```markdown\n**Points forts** : régularité.\n```";
        let text = parse_summary_response(response).unwrap();
        assert_eq!(text, "**Points forts** : régularité.");
    }

    #[test]
    fn test_parse_inner_fence_kept() {
        let response = "Avant\n```\ncode\n```\nAprès";
        let text = parse_summary_response(response).unwrap();
        assert_eq!(text, response);
    }

    #[test]
    fn test_parse_empty_is_error() {
        assert!(matches!(parse_summary_response("   "), Err(Error::Parse(_))));
        assert!(matches!(parse_summary_response("```\n```"), Err(Error::Parse(_))));
    }
}
