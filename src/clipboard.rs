//! クリップボード書き出し
//!
//! 確定した合計をシステムのクリップボードに書き出す

use anyhow::{Context, Result};
use arboard::Clipboard;

/// 書き出し上限（合計の文字列には十分）
const MAX_CLIPBOARD_SIZE: usize = 1024;

/// クリップボード操作（テストではモックに差し替える）
pub trait ClipboardProvider {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// arboard によるシステムクリップボード
pub struct SystemClipboard {
    clipboard: Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self> {
        let clipboard = Clipboard::new().context("Failed to initialize clipboard")?;
        Ok(Self { clipboard })
    }
}

impl ClipboardProvider for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.clipboard
            .set_text(text)
            .context("Failed to set clipboard contents")?;
        Ok(())
    }
}

fn validate_clipboard_text(text: &str) -> Result<()> {
    if text.is_empty() {
        anyhow::bail!("Cannot copy empty text to clipboard");
    }
    if text.len() > MAX_CLIPBOARD_SIZE {
        anyhow::bail!(
            "Text too large for clipboard ({} bytes, max {})",
            text.len(),
            MAX_CLIPBOARD_SIZE
        );
    }
    Ok(())
}

pub fn copy_with_provider(text: &str, provider: &mut dyn ClipboardProvider) -> Result<()> {
    validate_clipboard_text(text)?;
    provider.set_text(text)
}

/// システムクリップボードに書き出す
///
/// ヘッドレス環境などクリップボードが使えない場合はエラー
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    validate_clipboard_text(text)?;
    let mut clipboard = SystemClipboard::new()?;
    clipboard.set_text(text)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// 書き込まれた値を保持するモック
    #[derive(Default)]
    pub struct MockClipboard {
        pub text: Option<String>,
        pub should_fail: bool,
    }

    impl ClipboardProvider for MockClipboard {
        fn set_text(&mut self, text: &str) -> Result<()> {
            if self.should_fail {
                anyhow::bail!("Mock clipboard error");
            }
            self.text = Some(text.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_copy_with_mock() {
        let mut mock = MockClipboard::default();
        copy_with_provider("2.25", &mut mock).unwrap();
        assert_eq!(mock.text.as_deref(), Some("2.25"));
    }

    #[test]
    fn test_copy_empty_text_fails() {
        let mut mock = MockClipboard::default();
        let err = copy_with_provider("", &mut mock).unwrap_err();
        assert!(err.to_string().contains("empty"));
        assert!(mock.text.is_none());
    }

    #[test]
    fn test_copy_too_large_fails() {
        let mut mock = MockClipboard::default();
        let big = "9".repeat(MAX_CLIPBOARD_SIZE + 1);
        assert!(copy_with_provider(&big, &mut mock).is_err());
    }

    #[test]
    fn test_provider_failure_propagates() {
        let mut mock = MockClipboard {
            should_fail: true,
            ..Default::default()
        };
        assert!(copy_with_provider("3", &mut mock).is_err());
    }
}
