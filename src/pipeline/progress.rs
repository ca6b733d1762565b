use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Progress over every scenario execution of a run.
#[derive(Clone)]
pub struct RunProgress {
    bar: ProgressBar,
}

impl RunProgress {
    pub fn new(total: u64) -> Self {
        let bar = ProgressBar::new(total);
        let style = ProgressStyle::default_bar()
            .template("  {spinner:.cyan} {bar:30.cyan/dark_gray} {pos}/{len} scenarios | {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░");
        bar.set_style(style);
        bar.enable_steady_tick(Duration::from_millis(120));
        Self { bar }
    }

    pub fn hidden() -> Self {
        Self { bar: ProgressBar::hidden() }
    }

    pub fn start(&self, key: &str) {
        self.bar.set_message(key.to_string());
    }

    pub fn finish_one(&self, key: &str, failed: bool) {
        if failed {
            self.bar.println(format!("  {} {}", style("✗").red(), key));
        }
        self.bar.inc(1);
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
