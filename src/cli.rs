use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "qrscan")]
#[command(about = "PDFのQRコードを読み取り、コード別に振り分けるツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// 読み取り共通のオプション
#[derive(Args, Debug, Clone)]
pub struct ScanArgs {
    /// QRコードのあるページ（1始まり、省略時は設定値）
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub page: Option<u32>,

    /// ファイル属性のコードを使わず、必ず画像から読み取る
    #[arg(long)]
    pub no_cache: bool,

    /// 読み取ったコードをファイル属性に書き込まない
    #[arg(long)]
    pub no_write_cache: bool,

    /// 並列数（省略時は設定値）
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
    pub jobs: Option<u64>,

    /// CSVレポートの出力先（省略時は自動命名）
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// 結果をJSONでも保存
    #[arg(long)]
    pub json: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// フォルダ内のPDFを読み取り、CSVレポートを出力
    Scan {
        /// PDFフォルダのパス（サブフォルダも対象）
        #[arg(required = true)]
        folder: PathBuf,

        #[command(flatten)]
        args: ScanArgs,
    },

    /// 読み取り後、PDFを 出力フォルダ/<コード>/<コード>_<n>.pdf に移動
    Rename {
        /// PDFフォルダのパス（サブフォルダも対象）
        #[arg(required = true)]
        folder: PathBuf,

        /// 出力フォルダ
        #[arg(required = true)]
        output: PathBuf,

        #[command(flatten)]
        args: ScanArgs,
    },

    /// 1つのPDFのQRコードを読み取って表示
    Read {
        /// 対象PDF
        #[arg(required = true)]
        pdf: PathBuf,

        /// QRコードのあるページ（1始まり、省略時は設定値）
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
        page: Option<u32>,

        /// ファイル属性のコードを使わず、必ず画像から読み取る
        #[arg(long)]
        no_cache: bool,

        /// 読み取ったコードをファイル属性に書き込まない
        #[arg(long)]
        no_write_cache: bool,
    },

    /// PDFにコードを手動で設定（ファイル属性）
    Tag {
        /// 対象PDF
        #[arg(required = true)]
        pdf: PathBuf,

        /// 設定するコード（省略時は対話入力）
        #[arg(short, long)]
        code: Option<String>,

        /// 現在の属性値を表示
        #[arg(long, conflicts_with = "code")]
        show: bool,
    },

    /// 設定を表示/初期化
    Config {
        /// 設定を表示
        #[arg(long)]
        show: bool,

        /// デフォルト設定ファイルを作成
        #[arg(long)]
        init: bool,
    },
}
