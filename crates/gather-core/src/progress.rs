//! Progress reporting for TTY and non-TTY environments.
//!
//! TTY mode: one spinner line per stage, message updated in place.
//! Non-TTY mode: each status update becomes an info log line.

use std::io::IsTerminal;
use std::sync::Arc;
use std::time::Duration;

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.green} {prefix:<10.cyan.bold} {wide_msg}")
        .expect("invalid template")
}

/// A stage status line. Hidden in non-TTY mode, where updates are logged.
pub struct StageLine {
    bar: ProgressBar,
    is_tty: bool,
}

impl StageLine {
    /// Replace the status text
    pub fn update(&self, msg: impl Into<String>) {
        let msg = msg.into();
        if !self.is_tty {
            log::info!("{msg}");
        }
        self.bar.set_message(msg);
    }

    /// Stop the spinner, leaving `msg` as the final line
    pub fn finish(&self, msg: impl Into<String>) {
        let msg = msg.into();
        if !self.is_tty {
            log::info!("{msg}");
        }
        self.bar.finish_with_message(msg);
    }

    /// Stop the spinner and remove the line
    pub fn clear(&self) {
        self.bar.finish_and_clear();
    }
}

/// Central progress context managing status lines.
pub struct ProgressContext {
    multi: MultiProgress,
    is_tty: bool,
}

impl ProgressContext {
    /// Create new context, detecting TTY automatically.
    pub fn new() -> Self {
        Self::with_tty(std::io::stderr().is_terminal())
    }

    pub fn with_tty(is_tty: bool) -> Self {
        Self {
            multi: MultiProgress::new(),
            is_tty,
        }
    }

    /// Create a stage status line with a spinner.
    pub fn stage_line(&self, name: &str) -> StageLine {
        if !self.is_tty {
            return StageLine {
                bar: ProgressBar::hidden(),
                is_tty: false,
            };
        }
        let bar = self.multi.add(ProgressBar::new_spinner());
        bar.set_style(spinner_style());
        bar.set_prefix(name.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));
        StageLine { bar, is_tty: true }
    }

    /// Print a line above managed progress lines.
    pub fn println(&self, msg: impl AsRef<str>) {
        if self.is_tty {
            let _ = self.multi.println(msg);
        } else {
            eprintln!("{}", msg.as_ref());
        }
    }

    /// Whether running in TTY mode.
    pub fn is_tty(&self) -> bool {
        self.is_tty
    }

    /// Get reference to `MultiProgress` for log bridge.
    pub fn multi(&self) -> &MultiProgress {
        &self.multi
    }
}

impl Default for ProgressContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Thread-safe wrapper for `ProgressContext`.
pub type SharedProgress = Arc<ProgressContext>;

/// Format number with thousand separators.
pub fn fmt_num(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
