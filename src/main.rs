use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use storyvox_core::{AudioError, InlineAudio};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "storyvox",
    about = "Assemble streamed text-to-speech chunks into a playable audio file"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Chunk file: one record per line, `<mime>\t<base64>` or bare `<base64>`
    input: PathBuf,

    /// Directory for the file destination, overriding `storage.dir`
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// Records buffered between the reader and the encoder
    #[arg(long, default_value_t = 16)]
    channel_capacity: usize,
}

/// Stream the chunk file into `tx` line by line, the way a TTS response arrives.
async fn feed_chunks(path: PathBuf, tx: mpsc::Sender<Result<InlineAudio, AudioError>>) {
    let file = match tokio::fs::File::open(&path).await {
        Ok(f) => f,
        Err(e) => {
            let _ = tx
                .send(Err(AudioError::SourceFailed(format!(
                    "failed to open {}: {e}",
                    path.display()
                ))))
                .await;
            return;
        }
    };

    let mut lines = BufReader::new(file).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if let Some(record) = storyvox_audio::parse_chunk_line(&line) {
                    if tx.send(Ok(record)).await.is_err() {
                        break; // encoder gave up
                    }
                }
            }
            Ok(None) => break,
            Err(e) => {
                let _ = tx.send(Err(AudioError::SourceFailed(e.to_string()))).await;
                break;
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match cli.config {
        Some(ref path) => storyvox_core::AppConfig::load_from_file(path)
            .with_context(|| format!("failed to load config from {:?}", path))?,
        None => storyvox_core::AppConfig::default(),
    };

    let env_filter = EnvFilter::try_new(&config.general.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::Registry::default()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false),
        );

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    tracing::info!("storyvox starting");

    let mut storage_config = config.storage.extra.clone();
    if let (Some(dir), Some(table)) = (&cli.out_dir, storage_config.as_table_mut()) {
        table.insert(
            "dir".to_string(),
            toml::Value::String(dir.to_string_lossy().to_string()),
        );
    }

    let registry = storyvox_destination::DestinationRegistry::new();
    let destination = registry
        .open(&config.storage.plugin, storage_config)
        .await
        .with_context(|| format!("failed to open storage '{}'", config.storage.plugin))?;

    let (tx, mut rx) = mpsc::channel(cli.channel_capacity.max(1));
    let reader = tokio::spawn(feed_chunks(cli.input.clone(), tx));

    let encoder = storyvox_audio::AudioEncoder::with_default_mime(&config.audio.default_mime_type);
    let captured = encoder.capture(&mut rx).await;
    // Unblock the reader if capture stopped early.
    drop(rx);
    reader.await.context("chunk reader task panicked")?;

    let audio = captured
        .with_context(|| format!("failed to generate audio from {:?}", cli.input))?;

    tracing::info!(
        mime = %audio.mime_type,
        bytes = audio.bytes.len(),
        "uploading audio to '{}'",
        destination.name()
    );
    let url = destination
        .store(&audio)
        .await
        .context("failed to store audio")?;

    println!("{url}");

    destination
        .shutdown()
        .await
        .context("failed to shut down storage")?;
    tracing::info!("done");
    Ok(())
}
