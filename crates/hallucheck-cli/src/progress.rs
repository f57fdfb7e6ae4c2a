//! Progress bar for evaluation runs, and a log writer that stays out of its way

use colored::Colorize;
use hallucheck_core::ExperimentMode;
use hallucheck_runtime::ProgressNotifier;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::io::{self, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

/// The bar currently on screen, shared between the reporter and the log writer
#[derive(Clone, Default)]
pub struct ActiveBar(Arc<Mutex<Option<ProgressBar>>>);

impl ActiveBar {
    pub fn new() -> Self {
        Self::default()
    }

    fn replace(&self, bar: Option<ProgressBar>) -> Option<ProgressBar> {
        match self.0.lock() {
            Ok(mut guard) => std::mem::replace(&mut *guard, bar),
            Err(_) => None,
        }
    }

    fn current(&self) -> Option<ProgressBar> {
        self.0.lock().ok().and_then(|guard| guard.clone())
    }
}

/// `MakeWriter` for the tracing subscriber: log lines go to stderr with the
/// active bar cleared while they are written, then the bar is redrawn below.
#[derive(Clone)]
pub struct LogWriter {
    bar: ActiveBar,
}

impl LogWriter {
    pub fn new(bar: ActiveBar) -> Self {
        Self { bar }
    }
}

impl<'a> MakeWriter<'a> for LogWriter {
    type Writer = SuspendingStderr;

    fn make_writer(&'a self) -> Self::Writer {
        SuspendingStderr {
            bar: self.bar.current(),
        }
    }
}

/// Stderr handle for one log event
pub struct SuspendingStderr {
    bar: Option<ProgressBar>,
}

impl Write for SuspendingStderr {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let write_all = || io::stderr().lock().write_all(buf);
        match &self.bar {
            Some(bar) => bar.suspend(write_all)?,
            None => write_all()?,
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }
}

/// Draws one bar on stderr that advances as items finish
pub struct ProgressReporter {
    bar: ActiveBar,
    flagged: AtomicUsize,
}

impl ProgressReporter {
    pub fn new(bar: ActiveBar) -> Self {
        Self {
            bar,
            flagged: AtomicUsize::new(0),
        }
    }

    fn style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new(ActiveBar::new())
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_start(&self, total: usize, mode: ExperimentMode) {
        let bar = ProgressBar::with_draw_target(Some(total as u64), ProgressDrawTarget::stderr());
        bar.set_style(Self::style());
        bar.set_prefix(format!("Evaluating ({mode})"));
        bar.set_message("Starting...");

        self.bar.replace(Some(bar));
    }

    fn on_item_complete(&self, _completed: usize, _total: usize, is_hallucination: bool) {
        let flagged = if is_hallucination {
            self.flagged.fetch_add(1, Ordering::SeqCst) + 1
        } else {
            self.flagged.load(Ordering::SeqCst)
        };

        if let Some(bar) = self.bar.current() {
            bar.set_message(format!("{} flagged", flagged.to_string().red()));
            bar.inc(1);
        }
    }

    fn on_finish(&self) {
        if let Some(bar) = self.bar.replace(None) {
            bar.finish_with_message(format!("{}", "done".green()));
        }
    }
}
