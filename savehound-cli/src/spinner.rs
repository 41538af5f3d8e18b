//! Spinner for blocking network calls.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// A single steadily ticking spinner. Hidden when `quiet`.
pub(crate) struct Spinner {
    pb: ProgressBar,
}

impl Spinner {
    pub(crate) fn start(msg: impl Into<String>, quiet: bool) -> Self {
        let pb = ProgressBar::new_spinner();
        if quiet {
            pb.set_draw_target(ProgressDrawTarget::hidden());
        }
        if let Ok(style) = ProgressStyle::with_template("  {spinner:.cyan} {msg}") {
            pb.set_style(style.tick_chars("/-\\|"));
        }
        pb.set_message(msg.into());
        pb.enable_steady_tick(Duration::from_millis(100));
        Self { pb }
    }

    /// Stop ticking and clear the line.
    pub(crate) fn finish(self) {
        self.pb.disable_steady_tick();
        self.pb.finish_and_clear();
    }
}
