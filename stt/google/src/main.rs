use clap::Parser;
use log::error;
use std::process::ExitCode;
use stt_google::{transcribe_audio, GoogleConfig, SpeechClient};

/// Download an audio file, transcode it to FLAC and transcribe it with Google Speech-to-Text.
#[derive(Debug, Parser)]
#[command(name = "stt-transcribe", version)]
struct Cli {
    /// URL of the media file to transcribe.
    url: String,

    /// Identifier used to name the temporary files.
    #[arg(long, default_value = "media")]
    id: String,

    /// BCP-47 language code of the speech.
    #[arg(short, long, default_value = "en-US")]
    language: String,

    /// Sample rate declared to the recognizer (overrides STT_SAMPLE_RATE_HERTZ).
    #[arg(long)]
    sample_rate: Option<u32>,

    /// Channel count declared to the recognizer (overrides STT_AUDIO_CHANNEL_COUNT).
    #[arg(long)]
    channels: Option<u32>,

    /// Log level (overrides STT_PROVIDER_LOG_LEVEL).
    #[arg(long)]
    log_level: Option<String>,
}

/// `--log-level` first, then `STT_PROVIDER_LOG_LEVEL`.
fn log_level<'a>(cli: &'a Cli, cfg: &'a GoogleConfig) -> Option<&'a str> {
    cli.log_level.as_deref().or(cfg.common.log_level.as_deref())
}

fn run(cli: Cli, mut cfg: GoogleConfig) -> Result<Vec<String>, stt_core::SttError> {
    if let Some(rate) = cli.sample_rate {
        cfg.audio.sample_rate_hertz = rate;
    }
    if let Some(channels) = cli.channels {
        cfg.audio.channel_count = channels;
    }
    let client = SpeechClient::from_config(cfg)?;
    transcribe_audio(&client, &cli.url, &cli.id, &cli.language)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let cfg = GoogleConfig::from_env();
    stt_core::init_logging(log_level(&cli, &cfg));

    match run(cli, cfg) {
        Ok(transcript) => {
            for line in transcript {
                println!("{line}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("transcription failed: {e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
