use clap::ValueEnum;

/// 解析に使うAI
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum AiProvider {
    /// Gemini API（HTTP）
    #[default]
    GeminiApi,
    /// claude CLI
    Claude,
    /// codex CLI
    Codex,
    /// gemini CLI
    Gemini,
}

impl AiProvider {
    /// ローカルCLIのコマンド名（HTTP APIなら None）
    pub fn command_name(&self) -> Option<&'static str> {
        match self {
            AiProvider::GeminiApi => None,
            AiProvider::Claude => Some("claude"),
            AiProvider::Codex => Some("codex"),
            AiProvider::Gemini => Some("gemini"),
        }
    }

    /// 非対話モードで1回だけ応答させる引数
    pub fn cli_args(&self, prompt: &str) -> Vec<String> {
        match self {
            AiProvider::Claude => vec![
                "-p".into(),
                prompt.into(),
                "--output-format".into(),
                "text".into(),
            ],
            AiProvider::Codex => vec!["exec".into(), prompt.into()],
            AiProvider::Gemini => vec!["-p".into(), prompt.into()],
            AiProvider::GeminiApi => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_names() {
        assert_eq!(AiProvider::GeminiApi.command_name(), None);
        assert_eq!(AiProvider::Claude.command_name(), Some("claude"));
        assert_eq!(AiProvider::Codex.command_name(), Some("codex"));
    }

    #[test]
    fn test_cli_args_keep_prompt_as_single_arg() {
        let args = AiProvider::Claude.cli_args("bonjour le monde");
        assert_eq!(args, vec!["-p", "bonjour le monde", "--output-format", "text"]);
        assert_eq!(AiProvider::Codex.cli_args("x"), vec!["exec", "x"]);
    }

    #[test]
    fn test_value_enum_names() {
        let names: Vec<String> = AiProvider::value_variants()
            .iter()
            .filter_map(|p| p.to_possible_value())
            .map(|v| v.get_name().to_string())
            .collect();
        assert_eq!(names, vec!["gemini-api", "claude", "codex", "gemini"]);
    }
}
