use anyhow::Context;
use chrono::Local;
use clap::Parser;
use dialoguer::Input;
use qrscan_rust::attribute::{AttributeCache, XattrStore};
use qrscan_rust::cli::{Cli, Commands, ScanArgs};
use qrscan_rust::config::Config;
use qrscan_rust::decoder::QrDecoder;
use qrscan_rust::progress::{CancelFlag, TerminalProgress};
use qrscan_rust::render::PageRenderer;
use qrscan_rust::resolver::{CachePolicy, PageCodeResolver};
use qrscan_rust::scanner::{self, ScanOptions, ScanOutcome};
use qrscan_rust::{is_valid, renamer, report, QrScanError, ScanResult};
use std::path::Path;
use tracing_subscriber::EnvFilter;

type Resolver = PageCodeResolver<Box<dyn PageRenderer>, QrDecoder, XattrStore>;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Scan { folder, args } => {
            println!("📄 qrscan - QRコード読み取り\n");

            let outcome = run_scan(&folder, &args, &config, cli.verbose)?;

            let report_path = args
                .report
                .clone()
                .unwrap_or_else(|| report::report_path(&folder, Local::now()));
            save_results(&outcome.results, &report_path, args.json.as_deref());

            println!("\n✅ 読み取り完了");
        }

        Commands::Rename { folder, output, args } => {
            println!("📦 qrscan - 読み取り・振り分け\n");

            // 1. 全ファイルを読み取ってから移動する
            println!("[1/2] 読み取り中...");
            let mut outcome = run_scan(&folder, &args, &config, cli.verbose)?;

            if outcome.cancelled {
                println!("中断されたため移動は行いません");
            } else {
                println!("\n[2/2] 移動中...");
                let progress = TerminalProgress::new(cli.verbose);
                let renamed = renamer::rename_results(
                    &mut outcome.results,
                    &output,
                    &progress,
                    &CancelFlag::new(),
                );
                progress.finish();

                if let Err(e) = renamed {
                    // 出力先が使えなくても読み取り結果は残す
                    let report_path = args
                        .report
                        .clone()
                        .unwrap_or_else(|| report::report_path(&folder, Local::now()));
                    save_results(&outcome.results, &report_path, args.json.as_deref());
                    return Err(e.into());
                }
            }

            let report_path = args
                .report
                .clone()
                .unwrap_or_else(|| report::report_path(&output, Local::now()));
            save_results(&outcome.results, &report_path, args.json.as_deref());

            println!("\n✅ 完了");
        }

        Commands::Read {
            pdf,
            page,
            no_cache,
            no_write_cache,
        } => {
            let resolver = build_resolver(&config)?;
            let policy = CachePolicy {
                use_cache: config.use_cache && !no_cache,
                write_cache: config.write_cache && !no_write_cache,
            };
            let page = page.unwrap_or(config.default_page);

            let code = resolver.resolve_file(&pdf, page, policy)?;
            println!("{}", code);
        }

        Commands::Tag { pdf, code, show } => {
            if !pdf.is_file() {
                return Err(QrScanError::NoAccess(pdf.display().to_string()).into());
            }
            let name = pdf
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            let cache = AttributeCache::new(XattrStore::new());

            if show {
                match cache.read(&pdf) {
                    Some(code) => println!("{}: {}", name, code),
                    None => println!("{} には有効なコードが設定されていません", name),
                }
                return Ok(());
            }

            let code = match code {
                Some(code) => code,
                None => prompt_code()?,
            };

            match cache.write(&pdf, &code) {
                Ok(()) => {
                    tracing::info!("{} にコード {} を設定", pdf.display(), code);
                    println!("✔ {} にコード {} を設定しました", name, code);
                }
                Err(e @ QrScanError::InvalidCode(_)) => return Err(e.into()),
                Err(e) => {
                    return Err(anyhow::Error::new(e).context(ATTRIBUTE_WRITE_HINT));
                }
            }
        }

        Commands::Config { show, init } => {
            let config_path = Config::config_path()?;

            if init {
                if config_path.exists() {
                    println!("設定ファイルは既に存在します: {}", config_path.display());
                } else {
                    Config::default().save_to(&config_path)?;
                    println!("✔ 設定ファイルを作成しました: {}", config_path.display());
                }
            }

            if show || !init {
                println!("設定: {}", config_path.display());
                println!("  対象ページ: {}", config.default_page);
                println!("  解像度: {:?} dpi", config.resolutions);
                println!("  属性キャッシュ使用: {}", on_off(config.use_cache));
                println!("  属性キャッシュ書込: {}", on_off(config.write_cache));
                println!("  並列数: {}", config.jobs);
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "warn,qrscan=debug,qrscan_rust=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn build_renderer() -> qrscan_rust::Result<Box<dyn PageRenderer>> {
    #[cfg(feature = "pdfium")]
    {
        Ok(Box::new(qrscan_rust::render::PdfiumRenderer::new()?))
    }
    #[cfg(not(feature = "pdfium"))]
    {
        Err(QrScanError::RendererUnavailable(
            "pdfium フィーチャを無効にしてビルドされています".into(),
        ))
    }
}

fn build_resolver(config: &Config) -> qrscan_rust::Result<Resolver> {
    let renderer = build_renderer()?;
    Ok(PageCodeResolver::new(renderer, QrDecoder::new(), AttributeCache::new(XattrStore::new()))
        .with_resolutions(&config.resolutions))
}

fn scan_options(args: &ScanArgs, config: &Config) -> ScanOptions {
    ScanOptions {
        page: args.page.unwrap_or(config.default_page),
        policy: CachePolicy {
            use_cache: config.use_cache && !args.no_cache,
            write_cache: config.write_cache && !args.no_write_cache,
        },
        jobs: args.jobs.map(|j| j as usize).unwrap_or(config.jobs).max(1),
    }
}

fn run_scan(
    folder: &Path,
    args: &ScanArgs,
    config: &Config,
    verbose: bool,
) -> anyhow::Result<ScanOutcome> {
    let options = scan_options(args, config);
    let resolver = build_resolver(config)?;

    if (options.policy.use_cache || options.policy.write_cache) && !XattrStore::is_supported() {
        println!("⚠ この環境ではファイル属性キャッシュを利用できません");
    }

    let progress = TerminalProgress::new(verbose);
    let outcome = scanner::scan_folder(&resolver, folder, &options, &progress, &CancelFlag::new());
    progress.finish();

    Ok(outcome?)
}

/// レポートを保存（失敗しても処理結果は変わらない）
fn save_results(results: &[ScanResult], report_path: &Path, json_path: Option<&Path>) {
    match report::write_report(results, report_path) {
        Ok(()) => println!("✔ CSVレポートを保存: {}", report_path.display()),
        Err(e) => println!("⚠ CSVレポートを保存できません: {}", e),
    }

    if let Some(json_path) = json_path {
        let written =
            report::write_json(results, json_path).with_context(|| json_path.display().to_string());
        match written {
            Ok(()) => println!("✔ 結果を保存: {}", json_path.display()),
            Err(e) => println!("⚠ 結果を保存できません: {:#}", e),
        }
    }
}

const ATTRIBUTE_WRITE_HINT: &str =
    "ファイル属性を書き込めません。ファイルシステムが対応していないか、書き込みが拒否されました";

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "有効"
    } else {
        "無効"
    }
}

fn prompt_code() -> anyhow::Result<String> {
    let code: String = Input::new()
        .with_prompt("コード")
        .validate_with(|input: &String| -> Result<(), &str> {
            if is_valid(input) {
                Ok(())
            } else {
                Err("使用可能な文字は A-Z, a-z, 0-9, スペース, -, _ のみです")
            }
        })
        .interact_text()?;
    Ok(code)
}
