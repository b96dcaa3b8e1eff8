//! Progress display for a scrape run
//!
//! A spinner while the listing page loads, then a bar over detail pages.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Progress reporter; every method is a no-op when disabled
pub struct Progress {
    enabled: bool,
    bar: Option<ProgressBar>,
}

impl Progress {
    /// Create a new progress reporter
    pub fn new(enabled: bool) -> Self {
        Self { enabled, bar: None }
    }

    /// Create a disabled progress reporter
    pub fn disabled() -> Self {
        Self::new(false)
    }

    /// Spinner shown while the listing page is fetched and parsed
    pub fn listing(&mut self, url: &str) {
        if !self.enabled {
            return;
        }

        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.cyan} {msg}")
        {
            spinner.set_style(style);
        }
        spinner.set_message(format!("Fetching {}", url));
        spinner.enable_steady_tick(Duration::from_millis(80));
        self.bar = Some(spinner);
    }

    /// Bar over the accepted listings whose detail pages will be fetched
    pub fn details(&mut self, total: usize) {
        self.clear();
        if !self.enabled {
            return;
        }

        let bar = ProgressBar::new(total as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.cyan} {msg} [{bar:30.cyan/blue}] {pos}/{len} ({eta})")
        {
            bar.set_style(style.progress_chars("█▓▒░"));
        }
        bar.set_message("Reading detail pages");
        bar.enable_steady_tick(Duration::from_millis(100));
        self.bar = Some(bar);
    }

    /// Mark one listing as handled
    pub fn advance(&self, id: &str) {
        if let Some(ref bar) = self.bar {
            bar.set_message(id.to_string());
            bar.inc(1);
        }
    }

    /// Remove whatever is on screen
    pub fn clear(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}

impl Drop for Progress {
    fn drop(&mut self) {
        self.clear();
    }
}
