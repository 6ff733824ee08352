//! 対話式採点セッション
//!
//! 1行1コマンドで配点を入力する。AI解析はバックグラウンドで実行し、
//! 入力待ちと解析完了を同じイベントループで処理する。

use crate::analyzer::{spawn_analysis, Completion, Summarizer};
use crate::clipboard::{copy_with_provider, ClipboardProvider};
use crate::display::{styled_theme_name, styled_total};
use crate::error::{ProfCalcError, Result};
use crate::preferences::{PreferenceStore, ThemeSetting};
use chrono::Local;
use profcalc_common::{
    AnalysisOutcome, AnalysisTicket, GradingSession, RequestToken, Theme,
    ANALYSIS_FAILURE_MESSAGE,
};
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// `hist` の既定件数
pub const DEFAULT_HISTORY_COUNT: usize = 3;

const HELP: &[&str] = &[
    "Commandes :",
    "  +0.5 / 0.5   ajouter des points",
    "  rm N         retirer le segment n°N",
    "  ls           lister les segments",
    "  ok           valider (historique + copie du total)",
    "  ai           analyse IA (au moins 3 segments)",
    "  hist [N]     historique récent",
    "  theme [nom]  afficher ou changer le thème",
    "  help         cette aide",
    "  q            quitter",
];

#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Add(f64),
    /// 1始まりの番号
    Remove(usize),
    Validate,
    Analyze,
    History(usize),
    List,
    Theme(Option<String>),
    Help,
    Quit,
    Empty,
}

/// 配点の入力値を解釈（"+0.5", "0,5" も可）
pub fn parse_grade_value(raw: &str) -> Result<f64> {
    let cleaned = raw.trim().trim_start_matches('+').replace(',', ".");
    cleaned
        .parse::<f64>()
        .map_err(|_| ProfCalcError::InvalidInput(format!("« {} » n'est pas un nombre", raw.trim())))
}

pub fn parse_command(line: &str) -> Result<ShellCommand> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(ShellCommand::Empty);
    };
    let arg = words.next();

    let command = match head.to_lowercase().as_str() {
        "q" | "quit" | "exit" => ShellCommand::Quit,
        "ok" | "v" | "valider" => ShellCommand::Validate,
        "ai" | "analyse" => ShellCommand::Analyze,
        "ls" | "liste" => ShellCommand::List,
        "help" | "aide" | "?" => ShellCommand::Help,
        "theme" | "thème" => ShellCommand::Theme(arg.map(str::to_string)),
        "hist" | "historique" => {
            let count = match arg {
                Some(n) => n.parse().map_err(|_| {
                    ProfCalcError::InvalidInput(format!("nombre attendu après hist : {}", n))
                })?,
                None => DEFAULT_HISTORY_COUNT,
            };
            ShellCommand::History(count)
        }
        "rm" | "suppr" => {
            let n = arg
                .ok_or_else(|| ProfCalcError::InvalidInput("rm attend un numéro de segment".into()))?;
            let n = n.trim_start_matches('#').parse().map_err(|_| {
                ProfCalcError::InvalidInput(format!("numéro de segment invalide : {}", n))
            })?;
            ShellCommand::Remove(n)
        }
        _ => match parse_grade_value(head) {
            Ok(value) => ShellCommand::Add(value),
            Err(_) => {
                return Err(ProfCalcError::InvalidInput(format!(
                    "commande inconnue : {} (tapez help)",
                    head
                )))
            }
        },
    };
    Ok(command)
}

/// コマンド1件の処理結果
#[derive(Debug, Default)]
pub struct Reply {
    pub lines: Vec<String>,
    /// 送信すべき解析リクエスト
    pub dispatch: Option<AnalysisTicket>,
    pub quit: bool,
}

impl Reply {
    fn lines(lines: Vec<String>) -> Self {
        Self {
            lines,
            ..Default::default()
        }
    }

    fn message(line: impl Into<String>) -> Self {
        Self::lines(vec![line.into()])
    }
}

pub struct Shell<P: PreferenceStore> {
    session: GradingSession,
    theme: ThemeSetting<P>,
    clipboard: Option<Box<dyn ClipboardProvider>>,
}

impl<P: PreferenceStore> Shell<P> {
    pub fn new(
        session: GradingSession,
        theme: ThemeSetting<P>,
        clipboard: Option<Box<dyn ClipboardProvider>>,
    ) -> Self {
        Self {
            session,
            theme,
            clipboard,
        }
    }

    pub fn session(&self) -> &GradingSession {
        &self.session
    }

    pub fn theme(&self) -> Theme {
        self.theme.theme()
    }

    pub fn banner(&self) -> Vec<String> {
        let values = self
            .session
            .accumulator()
            .scale()
            .entries()
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        vec![
            "ProfCalc Barème".to_string(),
            format!("Points disponibles : {}", values),
            format!(
                "Historique : {} derniers calculs conservés",
                self.session.ledger().capacity()
            ),
            "Tapez help pour l'aide.".to_string(),
        ]
    }

    pub fn handle_line(&mut self, line: &str) -> Reply {
        match parse_command(line) {
            Ok(command) => self.handle(command),
            Err(e) => Reply::message(e.to_string()),
        }
    }

    pub fn handle(&mut self, command: ShellCommand) -> Reply {
        match command {
            ShellCommand::Add(value) => match self.session.append(value) {
                Ok(_) => Reply::message(self.status_line()),
                Err(e) => {
                    debug!("rejected grade value: {}", e);
                    Reply::message(format!("Valeur non autorisée : {}", value))
                }
            },
            ShellCommand::Remove(number) => {
                // 範囲外の番号は無視
                if let Some(index) = number.checked_sub(1) {
                    self.session.remove_at(index);
                }
                Reply::message(self.status_line())
            }
            ShellCommand::Validate => self.validate(),
            ShellCommand::Analyze => match self.session.begin_analysis() {
                Ok(ticket) => Reply {
                    lines: vec!["Analyse IA en cours...".to_string()],
                    dispatch: Some(ticket),
                    quit: false,
                },
                Err(rejection) => Reply::message(rejection.to_string()),
            },
            ShellCommand::History(count) => Reply::lines(self.history_lines(count)),
            ShellCommand::List => Reply::lines(self.entry_lines()),
            ShellCommand::Theme(name) => self.change_theme(name.as_deref()),
            ShellCommand::Help => Reply::lines(HELP.iter().map(|l| l.to_string()).collect()),
            ShellCommand::Quit => Reply {
                quit: true,
                ..Default::default()
            },
            ShellCommand::Empty => Reply::default(),
        }
    }

    /// バックグラウンド解析の完了を反映
    pub fn complete(&mut self, token: RequestToken, result: Result<String>) -> Vec<String> {
        if let Err(e) = &result {
            warn!("summarizer failed: {}", e);
        }

        match self.session.finish_analysis(token, result) {
            AnalysisOutcome::Applied => {
                let mut lines = vec!["Analyse IA :".to_string()];
                if let Some(text) = self.session.analysis() {
                    lines.extend(text.lines().map(|l| format!("  {}", l)));
                }
                lines
            }
            AnalysisOutcome::Failed => vec![ANALYSIS_FAILURE_MESSAGE.to_string()],
            AnalysisOutcome::Stale => {
                debug!("discarded stale analysis (generation {})", token.generation());
                Vec::new()
            }
            AnalysisOutcome::Unrecognized => Vec::new(),
        }
    }

    fn validate(&mut self) -> Reply {
        let Some(receipt) = self.session.reset() else {
            return Reply::message("Rien à valider.");
        };

        let total = styled_total(receipt.item.total(), self.theme());
        let copied = match self.clipboard.as_mut() {
            Some(clipboard) => match copy_with_provider(&receipt.clipboard_text, &mut **clipboard) {
                Ok(()) => true,
                Err(e) => {
                    warn!("clipboard copy failed: {:#}", e);
                    false
                }
            },
            None => false,
        };

        let suffix = if copied { " (copié)" } else { "" };
        Reply::message(format!(
            "✔ Validé : {} = {}{}",
            receipt.item.expression(),
            total,
            suffix
        ))
    }

    fn change_theme(&mut self, name: Option<&str>) -> Reply {
        let Some(name) = name else {
            let all = Theme::ALL.iter().map(|t| t.as_str()).collect::<Vec<_>>().join(", ");
            return Reply::message(format!(
                "Thème : {} (disponibles : {})",
                styled_theme_name(self.theme()),
                all
            ));
        };

        let theme = match name.parse::<Theme>() {
            Ok(theme) => theme,
            Err(e) => return Reply::message(e.to_string()),
        };
        match self.theme.set(theme) {
            Ok(()) => Reply::message(format!("✔ Thème : {}", styled_theme_name(theme))),
            Err(e) => {
                warn!("failed to persist theme: {}", e);
                Reply::message(format!("Thème appliqué mais non enregistré : {}", e))
            }
        }
    }

    fn status_line(&self) -> String {
        let accumulator = self.session.accumulator();
        let total = styled_total(self.session.total(), self.theme());
        if accumulator.is_empty() {
            format!("Saisissez les points... = {}", total)
        } else {
            format!("{} = {}", accumulator.expression(), total)
        }
    }

    fn entry_lines(&self) -> Vec<String> {
        let entries = self.session.accumulator().entries();
        if entries.is_empty() {
            return vec!["Aucun point".to_string()];
        }
        entries
            .iter()
            .enumerate()
            .map(|(i, e)| format!("#{:<3} +{}", i + 1, e))
            .collect()
    }

    fn history_lines(&self, count: usize) -> Vec<String> {
        let recent = self.session.ledger().recent(count);
        let lines: Vec<String> = recent
            .map(|item| {
                format!(
                    "{}  {} = {}",
                    item.timestamp().with_timezone(&Local).format("%H:%M:%S"),
                    item.expression(),
                    item.total()
                )
            })
            .collect();
        if lines.is_empty() {
            vec!["Aucun historique.".to_string()]
        } else {
            lines
        }
    }
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}

fn print_prompt() {
    write_prompt(&mut std::io::stdout());
}

/// プロンプトを書き出す（失敗してもループは続ける）
fn write_prompt<W: Write>(out: &mut W) {
    if let Err(e) = out.write_all(b"> ").and_then(|()| out.flush()) {
        debug!("failed to write prompt: {}", e);
    }
}

/// 対話ループ
///
/// 標準入力の行と解析完了を select! で待つ。EOF か q で終了
pub async fn run_session<P, S>(mut shell: Shell<P>, summarizer: Arc<S>) -> Result<()>
where
    P: PreferenceStore,
    S: Summarizer + 'static,
{
    let (tx, mut rx) = mpsc::unbounded_channel::<Completion>();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    print_lines(&shell.banner());
    print_prompt();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    println!();
                    break;
                };
                let reply = shell.handle_line(&line);
                print_lines(&reply.lines);
                if let Some(ticket) = reply.dispatch {
                    spawn_analysis(summarizer.clone(), ticket, tx.clone());
                }
                if reply.quit {
                    break;
                }
                print_prompt();
            }
            Some(done) = rx.recv() => {
                let output = shell.complete(done.token, done.result);
                if !output.is_empty() {
                    println!();
                    print_lines(&output);
                    print_prompt();
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_grade_value() {
        assert_eq!(parse_grade_value("+0.5").unwrap(), 0.5);
        assert_eq!(parse_grade_value("0,75").unwrap(), 0.75);
        assert_eq!(parse_grade_value(" 2 ").unwrap(), 2.0);
        assert!(parse_grade_value("abc").is_err());
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_command("").unwrap(), ShellCommand::Empty);
        assert_eq!(parse_command("+1.25").unwrap(), ShellCommand::Add(1.25));
        assert_eq!(parse_command("rm 2").unwrap(), ShellCommand::Remove(2));
        assert_eq!(parse_command("rm #3").unwrap(), ShellCommand::Remove(3));
        assert_eq!(parse_command("OK").unwrap(), ShellCommand::Validate);
        assert_eq!(parse_command("ai").unwrap(), ShellCommand::Analyze);
        assert_eq!(parse_command("hist").unwrap(), ShellCommand::History(3));
        assert_eq!(parse_command("hist 10").unwrap(), ShellCommand::History(10));
        assert_eq!(
            parse_command("theme dark").unwrap(),
            ShellCommand::Theme(Some("dark".into()))
        );
        assert_eq!(parse_command("q").unwrap(), ShellCommand::Quit);
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    #[test]
    fn test_write_prompt() {
        let mut out = Vec::new();
        write_prompt(&mut out);
        assert_eq!(out, b"> ");

        // 書き込み失敗は握りつぶさずログのみ
        write_prompt(&mut ClosedPipe);
    }

    #[test]
    fn test_parse_command_errors() {
        assert!(parse_command("rm").is_err());
        assert!(parse_command("rm x").is_err());
        assert!(parse_command("hist beaucoup").is_err());
        assert!(parse_command("bonjour").is_err());
    }
}
