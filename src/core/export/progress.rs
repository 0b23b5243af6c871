//! Progress reporting and cooperative cancellation

use tokio::sync::watch;

/// Receives progress updates and answers cancellation polls
///
/// The coordinator calls [`report_progress`](Self::report_progress) after
/// every attempted job and polls
/// [`is_cancel_requested`](Self::is_cancel_requested) once per combination,
/// before any parameter of that combination is applied.
pub trait ProgressReporter: Send {
    fn report_progress(&mut self, completed: usize, total: usize);

    fn is_cancel_requested(&self) -> bool;
}

/// Reporter driven by a shutdown signal channel
///
/// Prints a progress line every `print_every` jobs (and on the last one) and
/// logs each update at debug level. Cancellation follows the watched flag,
/// which `main` flips on SIGINT or SIGTERM.
pub struct SignalProgress {
    shutdown_signal: watch::Receiver<bool>,
    print_every: usize,
    quiet: bool,
}

impl SignalProgress {
    pub fn new(shutdown_signal: watch::Receiver<bool>) -> Self {
        Self {
            shutdown_signal,
            print_every: 1,
            quiet: false,
        }
    }

    /// Only print every `n`-th update
    pub fn with_print_every(mut self, n: usize) -> Self {
        self.print_every = n.max(1);
        self
    }

    /// Log only, print nothing to stdout
    pub fn quiet(mut self) -> Self {
        self.quiet = true;
        self
    }
}

impl ProgressReporter for SignalProgress {
    fn report_progress(&mut self, completed: usize, total: usize) {
        tracing::debug!(completed, total, "Export progress");

        if self.quiet {
            return;
        }
        if completed % self.print_every == 0 || completed == total {
            let percent = if total == 0 {
                100.0
            } else {
                completed as f64 / total as f64 * 100.0
            };
            println!("  [{completed}/{total}] {percent:.1}%");
        }
    }

    fn is_cancel_requested(&self) -> bool {
        *self.shutdown_signal.borrow()
    }
}
