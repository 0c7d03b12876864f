// gs232-emu -- GS-232 antenna rotator emulator on a serial port.
//
// Usage:
//   gs232-emu --port /dev/ttyUSB0
//   gs232-emu --port /dev/pts/5 --protocol b --mode 450
//   gs232-emu --port COM3 --baud 1200 --no-sim
//
// To pair with local tracking software, create a pty pair first:
//   socat -d -d pty,raw,echo=0 pty,raw,echo=0

mod sim;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use tokio_util::sync::CancellationToken;

use gs232::server::{RotatorServer, ServerConfig};
use gs232::transport::SerialTransport;
use gs232::{AngleMode, ProtocolContext, ProtocolVariant};

use crate::sim::SimulatedRotator;

/// GS-232 antenna rotator emulator.
#[derive(Parser, Debug)]
#[command(name = "gs232-emu", version, about)]
struct Cli {
    /// Serial port path (e.g. /dev/ttyUSB0, /dev/pts/5, COM3).
    #[arg(long)]
    port: String,

    /// Baud rate.
    #[arg(long, default_value_t = 9600)]
    baud: u32,

    /// Protocol variant to emulate.
    #[arg(long, value_enum, default_value_t = VariantArg::A)]
    protocol: VariantArg,

    /// Initial azimuth mode (450 requires --protocol b).
    #[arg(long, value_enum, default_value_t = ModeArg::Deg360)]
    mode: ModeArg,

    /// Run without the simulated rotator; position queries always report 0.
    #[arg(long)]
    no_sim: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum VariantArg {
    A,
    B,
}

impl From<VariantArg> for ProtocolVariant {
    fn from(v: VariantArg) -> Self {
        match v {
            VariantArg::A => ProtocolVariant::A,
            VariantArg::B => ProtocolVariant::B,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    #[value(name = "360")]
    Deg360,
    #[value(name = "450")]
    Deg450,
}

fn build_context(cli: &Cli) -> Result<ProtocolContext> {
    let variant = ProtocolVariant::from(cli.protocol);
    let mut ctx = if cli.no_sim {
        ProtocolContext::new(variant)
    } else {
        ProtocolContext::with_hardware(variant, Box::new(SimulatedRotator::default()))
    };

    if let ModeArg::Deg450 = cli.mode {
        if !variant.is_b() {
            bail!("450 degree mode is only available with --protocol b");
        }
        ctx.angle_mode = AngleMode::Mode450;
    }
    Ok(ctx)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let ctx = build_context(&cli)?;

    let transport = SerialTransport::open(&cli.port, cli.baud)
        .await
        .with_context(|| format!("opening {}", cli.port))?;

    println!(
        "Emulating {} rotator on {} at {} baud ({}). Ctrl-C to stop.",
        ctx.variant, cli.port, cli.baud, ctx.angle_mode
    );

    let mut handle = RotatorServer::new(Box::new(transport), ctx, ServerConfig::default())
        .spawn(CancellationToken::new());

    let ctx = tokio::select! {
        r = tokio::signal::ctrl_c() => {
            r.context("waiting for Ctrl-C")?;
            handle.shutdown().await?
        }
        r = &mut handle.task => {
            r.context("server task panicked")??
        }
    };

    println!(
        "Stopped. Last position: azimuth {} elevation {}, {} memorized values.",
        ctx.azimuth,
        ctx.elevation,
        ctx.memory_count()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("gs232-emu").chain(args.iter().copied()))
    }

    #[test]
    fn defaults() {
        let cli = cli(&["--port", "/dev/null"]);
        assert_eq!(cli.baud, 9600);
        let ctx = build_context(&cli).unwrap();
        assert_eq!(ctx.variant, ProtocolVariant::A);
        assert_eq!(ctx.angle_mode, AngleMode::Mode360);
    }

    #[test]
    fn mode_450_needs_variant_b() {
        assert!(build_context(&cli(&["--port", "x", "--mode", "450"])).is_err());
        let args = ["--port", "x", "--protocol", "b", "--mode", "450"];
        let ctx = build_context(&cli(&args)).unwrap();
        assert_eq!(ctx.angle_mode, AngleMode::Mode450);
    }
}
