//! CLI output: error mapping and the terminal notification sink.

use crate::error::ApiError;
use crate::notify::{Notification, NotificationSink, Outcome, TracingSink};
use owo_colors::OwoColorize;

/// Map domain/service errors to a string for CLI output.
pub fn map_error(e: &ApiError) -> String {
    e.to_string()
}

/// Prints each notification as one line on stderr and mirrors it to the log.
pub struct ConsoleSink {
    color: bool,
}

impl ConsoleSink {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn render(&self, notification: &Notification) -> String {
        let title = match (notification.outcome, self.color) {
            (_, false) => notification.title.clone(),
            (Outcome::Success, true) => notification.title.green().bold().to_string(),
            (Outcome::Failure, true) => notification.title.red().bold().to_string(),
        };
        format!("{}: {}", title, notification.message)
    }
}

impl NotificationSink for ConsoleSink {
    fn notify(&self, notification: Notification) {
        eprintln!("{}", self.render(&notification));
        TracingSink.notify(notification);
    }
}
