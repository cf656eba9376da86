use anyhow::{Context, Result};
use log::LevelFilter;
use pline::{App, Config, TtyChannel};

#[tokio::main]
async fn main() -> Result<()> {
    // Logs share stderr with the prompt, so stay quiet unless asked
    let mut logger = env_logger::Builder::from_default_env();
    if std::env::var_os("RUST_LOG").is_none() {
        logger.filter_level(LevelFilter::Warn);
        logger.filter_module("pline", LevelFilter::Info);
        logger.filter_module("linecore", LevelFilter::Info);
    }
    logger.init();

    let config = Config::load().await.context("failed to load configuration")?;

    let tty = match TtyChannel::open(&config.tty_path) {
        Ok(tty) => tty,
        Err(e) => {
            eprintln!("pline: {:#}", e);
            log::error!("Cannot start without a terminal: {:#}", e);
            return Err(e);
        }
    };
    log::info!("Using terminal device {}", tty.path().display());

    let mut app = App::new(tty, config);

    // The edit loop blocks on single-byte reads
    let res = tokio::task::spawn_blocking(move || app.run())
        .await
        .context("prompt loop panicked")?;

    if let Err(err) = res {
        eprintln!("pline: {:#}", err);
        log::error!("Prompt loop error: {:#}", err);
        return Err(err);
    }

    log::info!("Prompt loop ended");
    Ok(())
}
