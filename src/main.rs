use clap::Parser;
use receipt_itemizer::{batch, cli, config, error, export, extractor, review};
use cli::{Cli, Commands};
use config::Config;
use error::{ItemizerError, Result};
use export::ExportOptions;
use extractor::{HttpExtractor, ReceiptFile};
use receipt_itemizer_common::{FieldEscaping, Session};
use review::ReviewOutcome;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Process { image, output_dir, no_review, format, escape } => {
            println!("🧾 receipt-itemizer - レシート処理\n");

            let extractor = HttpExtractor::from_config(&config)?;
            let options = ExportOptions {
                output_dir: output_dir.unwrap_or_else(|| config.export_dir()),
                escaping: escaping(escape, &config),
            };

            let mut session: Session<ReceiptFile> = Session::new();
            let mut next_image = Some(image);

            while let Some(path) = next_image.take() {
                println!("[1/2] 画像を読み込み中... {}", path.display());
                let file = if no_review {
                    ReceiptFile::open(&path)?
                } else {
                    // 確認モードではパスを入力し直せる
                    match review::open_entered_image(&path)? {
                        Some(file) => file,
                        None => {
                            next_image = review::prompt_image_path()?;
                            continue;
                        }
                    }
                };
                session.select_file(file)?;

                println!("[2/2] 明細を抽出中... ({})", extractor.endpoint());
                match extractor::submit_receipt(&mut session, &extractor, true).await {
                    Ok(()) => {}
                    Err(ItemizerError::Extraction { message }) if !no_review => {
                        // 確認モードでは別の画像で再試行できる
                        println!("✗ {}", message);
                        next_image = review::prompt_image_path()?;
                        continue;
                    }
                    Err(e) => return Err(e),
                }

                let item_count = session.receipt().map(|r| r.items.len()).unwrap_or(0);
                println!("✔ {}件の明細を抽出\n", item_count);

                if no_review {
                    if let Some(receipt) = session.receipt() {
                        export::export_receipt(receipt, &format, &options)?;
                    }
                    break;
                }

                match review::run_review(&mut session, &options)? {
                    ReviewOutcome::NewReceipt(path) => next_image = Some(path),
                    ReviewOutcome::Quit => {}
                }
            }

            println!("\n✅ 完了");
        }

        Commands::Batch { folder, recursive, output_dir, escape } => {
            println!("🧾 receipt-itemizer - 一括処理\n");

            let extractor = HttpExtractor::from_config(&config)?;
            let options = ExportOptions {
                output_dir: output_dir.unwrap_or_else(|| config.export_dir()),
                escaping: escaping(escape, &config),
            };

            let summary = batch::run_batch(&folder, recursive, &extractor, &options).await?;

            println!(
                "\n✅ 一括処理完了: 成功 {}件 / 失敗 {}件",
                summary.succeeded(),
                summary.failed()
            );
        }

        Commands::Config { set_backend, set_export_dir, set_escape, show } => {
            let mut config = config;
            let mut changed = false;

            if let Some(origin) = set_backend {
                config.set_backend(origin)?;
                println!("✔ バックエンドを設定しました: {}", config.backend_origin);
                changed = true;
            }

            if let Some(dir) = set_export_dir {
                println!("✔ 出力先を設定しました: {}", dir.display());
                config.export_dir = Some(dir);
                changed = true;
            }

            if let Some(escape) = set_escape {
                config.escape_fields = escape;
                println!("✔ エスケープ: {}", if escape { "有効" } else { "無効" });
                changed = true;
            }

            if changed {
                config.save()?;
            }

            if show || !changed {
                println!("設定:");
                println!("  バックエンド: {}", config.backend_origin);
                println!("  エンドポイント: {}", config.process_path);
                println!("  出力先: {}", config.export_dir().display());
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!("  エスケープ: {}", if config.escape_fields { "有効" } else { "無効" });
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

// --escape 指定時は設定値に関わらず有効
fn escaping(flag: bool, config: &Config) -> FieldEscaping {
    if flag {
        FieldEscaping::Escaped
    } else {
        config.escaping()
    }
}
