//! A small CLI that exercises the netsync codec directly, in the same spirit as `client_app` and
//! `audio_server` exercise the source repository's audio/lighting pipeline: initialize logging,
//! load whatever the operator handed us, do the one thing, report errors and exit non-zero.
//!
//! This binary is not part of the codec's contract — it is a convenience for a human driving the
//! library from a shell, and the only place in this crate that touches `std::env` or stdout.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rtp_midi_netsync::{decode, encode, Event, MAX_PAYLOAD};

#[derive(Parser)]
#[command(name = "netsync-demo", about = "Encode/decode netsync MTC/MMC payloads")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode an event and print the resulting payload as hex.
    Encode {
        #[command(subcommand)]
        event: EventArg,
    },
    /// Decode a hex-encoded payload and print the event it represents.
    Decode {
        /// Payload bytes as hex, e.g. "A3F137".
        hex: String,
    },
}

#[derive(Subcommand)]
enum EventArg {
    MtcQuarter(MtcQuarterArgs),
    MtcFull(TimecodeArgs),
    MmcStop,
    MmcPlay,
    MmcLocate(TimecodeArgs),
}

#[derive(Args)]
struct MtcQuarterArgs {
    msg_type: u8,
    value: u8,
}

#[derive(Args)]
struct TimecodeArgs {
    hour: u8,
    minute: u8,
    second: u8,
    frame: u8,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        log::error!("netsync-demo failed: {e:?}");
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Encode { event } => run_encode(event),
        Command::Decode { hex } => run_decode(&hex),
    }
}

fn run_encode(event: EventArg) -> Result<()> {
    let event = match event {
        EventArg::MtcQuarter(a) => Event::mtc_quarter(a.msg_type, a.value),
        EventArg::MtcFull(a) => Event::mtc_full(a.hour, a.minute, a.second, a.frame),
        EventArg::MmcStop => Event::mmc_stop(),
        EventArg::MmcPlay => Event::mmc_play(),
        EventArg::MmcLocate(a) => Event::mmc_locate(a.hour, a.minute, a.second, a.frame),
    };
    log::info!("encoding {event:?}");

    let mut buf = [0u8; MAX_PAYLOAD];
    let n = encode(&event, &mut buf).context("encode failed")?;
    println!("{}", hex::encode(&buf[..n]));
    Ok(())
}

fn run_decode(hex_str: &str) -> Result<()> {
    let bytes = hex::decode(hex_str).context("payload is not valid hex")?;
    log::info!("decoding {} byte payload", bytes.len());

    let event = decode(&bytes).map_err(|e| anyhow::anyhow!("decode failed: {e}"))?;
    println!("{event:?}");
    Ok(())
}

/// Minimal hex encode/decode, kept local so this demo binary doesn't pull in an extra dependency
/// for a one-line job the codec itself has no use for.
mod hex {
    use anyhow::Context;

    pub fn encode(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{b:02X}")).collect()
    }

    pub fn decode(s: &str) -> Result<Vec<u8>, anyhow::Error> {
        let s = s.trim();
        if s.len() % 2 != 0 {
            anyhow::bail!("hex string must have an even number of digits");
        }
        (0..s.len())
            .step_by(2)
            .map(|i| {
                u8::from_str_radix(&s[i..i + 2], 16)
                    .with_context(|| format!("invalid hex digits at offset {i}"))
            })
            .collect()
    }
}
