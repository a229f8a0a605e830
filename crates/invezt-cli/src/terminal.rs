//! Terminal view: observes session transitions and prints them

use chrono::Datelike;
use indicatif::{ProgressBar, ProgressStyle};
use invezt_report::render::{LOADING_MESSAGE, footer};
use invezt_report::{AnalysisSession, ReportRenderer, View};
use std::time::Duration;
use tracing::error;

const TICK_STRINGS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Prints whatever view the session moves to
pub struct TerminalView {
    renderer: ReportRenderer,
    json: bool,
    spinner: Option<ProgressBar>,
}

impl TerminalView {
    pub fn new(renderer: ReportRenderer, json: bool) -> Self {
        Self {
            renderer,
            json,
            spinner: None,
        }
    }

    /// Session observer; call on every transition
    pub fn observe(&mut self, session: &AnalysisSession) {
        let state = session.state();

        match state.view() {
            View::Loading => self.start_spinner(),
            View::Intro => {
                self.stop_spinner();
                if !self.json {
                    println!("{}", self.renderer.render_state(state));
                    self.print_footer();
                }
            }
            View::Error(_) => {
                self.stop_spinner();
                eprintln!("{}\n", self.renderer.render_state(state));
            }
            View::Report(analysis) => {
                self.stop_spinner();
                if self.json {
                    match serde_json::to_string_pretty(analysis) {
                        Ok(json) => println!("{json}"),
                        Err(e) => error!("Failed to serialize analysis: {e}"),
                    }
                } else {
                    println!("{}", self.renderer.render_state(state));
                    self.print_footer();
                }
            }
        }
    }

    fn print_footer(&self) {
        let year = chrono::Local::now().year();
        println!("{}\n", footer(self.renderer.theme(), year));
    }

    fn start_spinner(&mut self) {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(TICK_STRINGS),
        );
        spinner.enable_steady_tick(Duration::from_millis(90));
        spinner.set_message(LOADING_MESSAGE);
        self.spinner = Some(spinner);
    }

    fn stop_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }
}
