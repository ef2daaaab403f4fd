// src/main.rs

//! `procmon-say` — push command-line text into Process Monitor's event
//! stream. Run while Process Monitor is capturing; each argument becomes
//! one debug event visible in its trace.
//!
//! 1. Parse arguments & set up stderr logging
//! 2. Open the debug device (fails fast when procmon is not running)
//! 3. Send each message as one device write
//! 4. Exit non-zero if any write was rejected

use anyhow::{Context, Result, bail};
use chrono::Local;
use fern::Dispatch;
use log::LevelFilter;

use procmon_logger::{DebugLogger, procmon_log};

/// Route this tool's own diagnostics to stderr so stdout stays clean.
fn setup_logging(verbose: bool) -> Result<(), fern::InitError> {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    Dispatch::new()
        .format(|out, msg, record| {
            out.finish(format_args!(
                "[{}][{:5}][{}] {}",
                Local::now().to_rfc3339(),
                record.level(),
                record.target(),
                msg
            ))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()?;
    Ok(())
}

fn main() -> Result<()> {
    let mut messages: Vec<String> = std::env::args().skip(1).collect();
    let verbose = messages.iter().any(|a| a == "-v" || a == "--verbose");
    messages.retain(|a| a != "-v" && a != "--verbose");

    setup_logging(verbose).context("logging setup failed")?;

    if messages.is_empty() {
        bail!("usage: procmon-say [-v] <message>...");
    }

    let logger = DebugLogger::try_open()
        .context("is Process Monitor running with its driver loaded?")?;
    log::debug!("device opened, sending {} message(s)", messages.len());

    let rejected = messages
        .iter()
        .filter(|msg| !procmon_log!(logger, "{}", msg))
        .count();
    if rejected > 0 {
        bail!("{rejected} of {} message(s) rejected by the driver", messages.len());
    }

    log::info!("delivered {} message(s)", messages.len());
    Ok(())
}
