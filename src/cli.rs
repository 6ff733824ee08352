use crate::ai_provider::AiProvider;
use clap::{Parser, Subcommand};
use profcalc_common::Theme;

#[derive(Parser)]
#[command(name = "profcalc")]
#[command(about = "Calculatrice de barème : somme des points, historique, analyse IA", long_about = None)]
pub struct Cli {
    /// 省略時は対話セッション
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// AIプロバイダ (gemini-api/claude/codex/gemini)
    #[arg(long, value_enum, default_value = "gemini-api", global = true)]
    pub ai_provider: AiProvider,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 対話式の採点セッション
    Session,

    /// 配点を合計して表示
    Sum {
        /// 配点（例: 0.5 +1 0,75）
        #[arg(required = true, allow_hyphen_values = true)]
        values: Vec<String>,

        /// 合計をクリップボードにコピー
        #[arg(long)]
        copy: bool,
    },

    /// 配点リストのAI解析（3つ以上）
    Analyze {
        /// 配点
        #[arg(required = true, allow_hyphen_values = true)]
        values: Vec<String>,
    },

    /// テーマを表示/変更（省略時は選択メニュー）
    Theme {
        /// emerald / indigo / rose / slate / dark
        name: Option<Theme>,
    },

    /// 設定を表示/編集
    Config {
        /// APIキーを設定
        #[arg(long)]
        set_api_key: Option<String>,

        /// モデルを設定
        #[arg(long)]
        set_model: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
