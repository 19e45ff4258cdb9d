//! link-toast CLI
//!
//! 由计划任务定期调用：拉取 bot 最新消息，有链接则弹出 toast。

use clap::Parser;
use tracing::{debug, error};
use tracing_subscriber::{fmt, EnvFilter};

use anyhow::Result;
use link_toast::{app, Config, NativePlatform, ToastNotifier, UpdateFetcher};

#[derive(Parser)]
#[command(name = "link-toast")]
#[command(about = "Show a desktop notification for the link in the latest Telegram bot message")]
#[command(long_about = "Reads TELEGRAM_BOT_TOKEN, fetches pending updates once and raises a \
toast for the first link in the most recent message. Exits 0 when there is nothing to show.")]
#[command(version)]
struct Cli {}

fn main() {
    let _cli = Cli::parse();

    // 通过 RUST_LOG 控制日志级别，默认为 info
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("link_toast=info"));

    fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .init();

    let code = match try_main() {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            1
        }
    };
    std::process::exit(code);
}

fn try_main() -> Result<i32> {
    let config = Config::load();
    debug!(?config, "Loaded config");

    let fetcher = UpdateFetcher::with_reqwest(config.api_base.clone(), config.timeout())?;
    let notifier = ToastNotifier::new(NativePlatform::new(config.app_id.clone()));

    let result = app::run(&config.token, &fetcher, &notifier);
    if let Err(e) = &result {
        error!("{}", e);
    }
    Ok(app::exit_code(&result))
}
