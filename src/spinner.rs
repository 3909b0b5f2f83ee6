//! Indeterminate progress feedback for a single in-flight operation.
//!
//! The indicator writes to stderr only, keeping stdout clean for
//! machine-consumable output, and always reaches a terminal state
//! (`done` or `failed`) before the wrapped result is returned.

use std::future::Future;
use std::io::{IsTerminal, Write};
use std::time::Duration;

const FRAMES: [char; 4] = ['|', '/', '-', '\\'];
const TICK: Duration = Duration::from_millis(100);

/// Run `operation` to completion while showing `label` with an animated
/// indicator. Frames render only when stderr is a terminal; the label and
/// the terminal marker print unconditionally.
pub async fn run<T, E, F>(label: &str, operation: F) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
{
    let animate = std::io::stderr().is_terminal();
    eprint!("{label}...");
    flush_stderr();

    tokio::pin!(operation);
    let mut interval = tokio::time::interval(TICK);
    let mut frame = 0usize;

    let result = loop {
        tokio::select! {
            result = &mut operation => break result,
            _ = interval.tick() => {
                if animate {
                    eprint!("\r{label}... {}", FRAMES[frame % FRAMES.len()]);
                    flush_stderr();
                    frame += 1;
                }
            }
        }
    };

    let marker = if result.is_ok() { "done" } else { "failed" };
    if animate {
        eprintln!("\r{label}... {marker}");
    } else {
        eprintln!(" {marker}");
    }

    result
}

fn flush_stderr() {
    let _ = std::io::stderr().flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_success_value_passes_through() {
        let result: Result<u32, ()> = run("Working", async { Ok(42) }).await;
        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_failure_propagates_after_indicator_settles() {
        let result: Result<(), &str> = run("Working", async { Err("boom") }).await;
        assert_eq!(result.unwrap_err(), "boom");
    }

    #[tokio::test]
    async fn test_slow_operation_still_returns_its_value() {
        let result: Result<&str, ()> = run("Working", async {
            tokio::time::sleep(Duration::from_millis(250)).await;
            Ok("finished")
        })
        .await;
        assert_eq!(result.unwrap(), "finished");
    }
}
