//! Spinners for long-running reasoning calls.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;
use tokio::sync::watch;

use crate::services::PendingAction;

const SPINNER_TEMPLATE: &str = "[{elapsed_precise}] {spinner:.green} {msg}";
const SPINNER_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

/// Spinner on stderr with the given message.
///
/// Hidden in JSON mode so machine output stays clean.
pub fn create_spinner(message: impl Into<String>, hidden: bool) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if hidden {
        spinner.set_draw_target(ProgressDrawTarget::hidden());
    } else {
        if let Ok(style) = ProgressStyle::default_spinner().template(SPINNER_TEMPLATE) {
            spinner.set_style(style.tick_chars(SPINNER_CHARS));
        }
        spinner.enable_steady_tick(Duration::from_millis(80));
    }
    spinner.set_message(message.into());
    spinner
}

/// Terminal states for spinners.
pub trait ProgressBarExt {
    /// Finish with a success message (green checkmark)
    fn finish_success(&self, message: impl Into<String>);

    /// Finish with an error message (red X)
    fn finish_error(&self, message: impl Into<String>);
}

impl ProgressBarExt for ProgressBar {
    fn finish_success(&self, message: impl Into<String>) {
        self.finish_with_message(format!("✓ {}", message.into()));
    }

    fn finish_error(&self, message: impl Into<String>) {
        self.finish_with_message(format!("✗ {}", message.into()));
    }
}

fn pending_message(action: PendingAction) -> &'static str {
    match action {
        PendingAction::Analyzing => "Evaluating idea against the rubric and scoring it...",
        PendingAction::Saving => "Saving analysis...",
        PendingAction::Chatting => "Thinking...",
        PendingAction::Researching => "Researching competitors...",
    }
}

/// Mirror a session's pending action onto the spinner until the session
/// goes away.
pub async fn follow_pending(mut pending: watch::Receiver<Option<PendingAction>>, spinner: ProgressBar) {
    loop {
        let action = *pending.borrow_and_update();
        if let Some(action) = action {
            spinner.set_message(pending_message(action));
        }
        if pending.changed().await.is_err() {
            break;
        }
    }
}
