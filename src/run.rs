//! Application execution logic.
//!
//! This module reads lines from an input stream, feeds each line through a
//! debouncer as one call, and writes the lines that fire.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::signal;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::LinesStream;

use quiesce::config::ValidatedConfig;
use quiesce::debounce::{CallOutcome, DebounceError, DebounceOptions, Debouncer};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Failed to build the debouncer.
    #[error("Failed to create debouncer: {0}")]
    Debouncer(#[from] DebounceError),

    /// Failed to read a line from the input.
    #[error("Failed to read input: {0}")]
    Input(#[source] std::io::Error),

    /// Failed to write a line that fired on the leading edge.
    #[error("Failed to write output: {0}")]
    Output(#[source] std::io::Error),
}

/// Counters collected while debouncing one input stream.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LineStats {
    /// Lines read from the input
    pub received: usize,
    /// Lines written to the output
    pub fired: usize,
}

/// Executes the line debouncer on stdin and stdout.
///
/// Runs until stdin is closed and the last window has closed, or until a
/// shutdown signal (Ctrl+C) arrives. A pending trailing line is dropped on
/// shutdown.
///
/// # Errors
///
/// Returns an error if stdin cannot be read or a leading-edge line cannot
/// be written.
///
/// Excluded from coverage - requires real stdio and signal handling.
#[cfg(not(tarpaulin_include))]
pub async fn execute(config: ValidatedConfig) -> Result<(), RunError> {
    let input = BufReader::new(tokio::io::stdin());
    let output = Arc::new(Mutex::new(std::io::stdout()));

    tokio::select! {
        result = debounce_lines(input, output, config.options) => {
            let stats = result?;
            tracing::info!(received = stats.received, fired = stats.fired, "Input closed");
            Ok(())
        }
        _ = signal::ctrl_c() => {
            tracing::info!("Received shutdown signal, stopping...");
            Ok(())
        }
    }
}

/// Debounces every line of `input` and writes the lines that fire to `output`.
///
/// Returns once the input is exhausted, no window is pending and the last
/// trailing line has been written.
///
/// # Errors
///
/// Returns an error if the debouncer cannot be built, a line cannot be read,
/// or a line firing on the leading edge cannot be written. Write failures on
/// the trailing edge are logged and the line is not counted.
pub async fn debounce_lines<R, W>(
    input: R,
    output: Arc<Mutex<W>>,
    options: DebounceOptions,
) -> Result<LineStats, RunError>
where
    R: AsyncBufRead + Unpin,
    W: Write + Send + 'static,
{
    let fired = Arc::new(AtomicUsize::new(0));
    let debouncer = {
        let fired = Arc::clone(&fired);
        Debouncer::new(options, move |line: String| {
            write_line(&output, &line)?;
            fired.fetch_add(1, Ordering::Relaxed);
            Ok::<(), std::io::Error>(())
        })?
    };

    let mut lines = LinesStream::new(input.lines());
    let mut received = 0;

    while let Some(line) = lines.next().await {
        let line = line.map_err(RunError::Input)?;
        received += 1;

        if debouncer.call(line).map_err(RunError::Output)? == CallOutcome::Leading {
            tracing::debug!(line = received, "Line fired on leading edge");
        }
    }

    tracing::debug!(received, "Input exhausted, waiting for pending window");
    debouncer.settled().await;

    Ok(LineStats {
        received,
        fired: fired.load(Ordering::Relaxed),
    })
}

fn write_line<W: Write>(output: &Mutex<W>, line: &str) -> std::io::Result<()> {
    let mut output = output.lock().unwrap_or_else(PoisonError::into_inner);
    writeln!(output, "{line}")?;
    output.flush()
}
