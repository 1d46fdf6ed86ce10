use pumpfun_sell::*;

use anyhow::{bail, Context, Result};
use clap::Parser;
use colored::{ColoredString, Colorize};
use config::{Args, Command, Config};
use log::{info, warn};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use client::{SellRpcClient, Transport};
use domain::{mask_secret, OutcomeKind, SellForm};
use execution::render::{render_outcome, render_progress, render_summary};
use execution::BatchEvent;
use worker::SellWorker;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let Args { config, command } = Args::parse();

    match command {
        Command::Convert { literal, file } => convert(literal, file),

        Command::Sell {
            amount,
            key,
            mint,
            slippage,
        } => {
            let (worker, config) = start_worker(&config)?;
            let key = key
                .or_else(|| std::env::var("PRIVATE_KEY").ok())
                .unwrap_or_default();
            let form = SellForm::new(
                amount.as_deref().unwrap_or(&config.defaults.amount),
                vec![key],
                &mint,
                slippage.as_deref().unwrap_or(&config.defaults.slippage),
            );
            sell_single(&worker, form).await
        }

        Command::Batch {
            amount,
            keys_file,
            mint,
            slippage,
        } => {
            let (worker, config) = start_worker(&config)?;
            let keys = read_input(keys_file.as_deref(), "private keys")?;
            let form = SellForm::new(
                amount.as_deref().unwrap_or(&config.defaults.amount),
                SellForm::keys_from_text(&keys),
                &mint,
                slippage.as_deref().unwrap_or(&config.defaults.slippage),
            );
            sell_batch(&worker, form).await
        }
    }
}

// ===============================
// SETUP
// ===============================
fn start_worker(config_path: &Path) -> Result<(SellWorker, Config)> {
    let mut config = Config::load(config_path)?;
    config.apply_env_overrides()?;
    config.validate()?;

    info!(
        "🌐 Backend {} (method {}, timeout {}s, continuation {:?})",
        config.rpc.url, config.rpc.method, config.rpc.timeout_secs, config.batch.continuation
    );

    let transport: Arc<dyn Transport> = Arc::new(SellRpcClient::from_config(&config.rpc)?);
    Ok((SellWorker::new(transport, config.batch.continuation), config))
}

fn read_input(path: Option<&Path>, what: &str) -> Result<String> {
    match path {
        Some(p) if p != Path::new("-") => {
            std::fs::read_to_string(p).with_context(|| format!("read {} from {}", what, p.display()))
        }
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .with_context(|| format!("read {} from stdin", what))?;
            Ok(buf)
        }
    }
}

fn paint(text: &str, kind: OutcomeKind) -> ColoredString {
    match kind {
        OutcomeKind::Success => text.green(),
        OutcomeKind::RemoteError => text.red(),
        OutcomeKind::MalformedResponse => text.yellow(),
        OutcomeKind::TransportFailure => text.magenta(),
    }
}

// ===============================
// SINGLE SELL
// ===============================
async fn sell_single(worker: &SellWorker, form: SellForm) -> Result<()> {
    let outcome = worker
        .submit_single(form)?
        .await
        .context("sell task failed")??;

    print!("{}", paint(&render_outcome(&outcome), outcome.kind()));

    if !outcome.is_success() {
        bail!("sell was not confirmed: {}", outcome.kind().label());
    }
    Ok(())
}

// ===============================
// BATCH SELL
// ===============================
async fn sell_batch(worker: &SellWorker, form: SellForm) -> Result<()> {
    let mut job = worker.submit_batch(form)?;

    while let Some(event) = job.events.recv().await {
        match event {
            BatchEvent::Processing {
                index,
                credential_hint,
            } => print!("{}", render_progress(index, &credential_hint)),
            BatchEvent::Completed(item) => {
                println!("{}", paint(&render_outcome(&item.outcome), item.outcome.kind()))
            }
            BatchEvent::Finished { .. } => {}
        }
    }

    let transcript = job.handle.await.context("batch task failed")??;
    println!("{}", render_summary(&transcript).bold());

    for item in transcript.items().iter().filter(|i| !i.outcome.is_success()) {
        warn!(
            "❗ Key #{} ({}) not sold: {}",
            item.index,
            mask_secret(&item.credential),
            item.outcome.kind().label()
        );
    }

    if transcript.failed() > 0 {
        bail!("{} of {} sells failed", transcript.failed(), transcript.len());
    }
    Ok(())
}

// ===============================
// BYTE ARRAY → BASE58 KEY
// ===============================
fn convert(literal: Option<String>, file: Option<PathBuf>) -> Result<()> {
    let text = match literal {
        Some(l) => l,
        None => read_input(file.as_deref(), "byte array")?,
    };

    let bytes = wallet::parse_byte_literal(&text)?;
    if bytes.len() != wallet::KEYPAIR_LEN {
        warn!(
            "⚠️ Got {} bytes; a full keypair is {} bytes",
            bytes.len(),
            wallet::KEYPAIR_LEN
        );
    }

    println!("{}", wallet::encode_bytes(&bytes));
    Ok(())
}
