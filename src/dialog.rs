//! Blocking user dialogs: alerts and yes/no confirmations.
//!
//! The entry form and the transaction items never talk to the browser
//! directly. They ask a [Dialogs] implementation to show an alert or to
//! confirm an action, which lets tests script the user's answers.

/// A capability for showing messages to the user and asking them questions.
pub trait Dialogs {
    /// Show `message` to the user.
    fn alert(&mut self, message: &str);

    /// Ask the user to confirm `message`, returning `true` if they accepted.
    fn confirm(&mut self, message: &str) -> bool;
}

/// The dialogs for a single HTTP request.
///
/// The browser asks for confirmation itself (via `hx-confirm`) before the
/// request is sent, so `confirm` answers with what the browser reported.
/// Alerts are collected so the handler can render them into the response.
#[derive(Debug, Default)]
pub struct RequestDialogs {
    confirmed: bool,
    alerts: Vec<String>,
}

impl RequestDialogs {
    /// Create the dialogs for a request where the user did or did not confirm.
    pub fn new(confirmed: bool) -> Self {
        Self {
            confirmed,
            alerts: Vec::new(),
        }
    }

    /// The most recent alert, if any.
    pub fn last_alert(&self) -> Option<&str> {
        self.alerts.last().map(String::as_str)
    }
}

impl Dialogs for RequestDialogs {
    fn alert(&mut self, message: &str) {
        tracing::debug!("alerting user: {message}");
        self.alerts.push(message.to_owned());
    }

    fn confirm(&mut self, message: &str) -> bool {
        tracing::debug!("confirmation \"{message}\" answered {}", self.confirmed);
        self.confirmed
    }
}

#[cfg(test)]
mod tests {
    use super::{Dialogs, RequestDialogs};

    #[test]
    fn confirm_answers_with_browser_response() {
        assert!(RequestDialogs::new(true).confirm("Delete?"));
        assert!(!RequestDialogs::new(false).confirm("Delete?"));
    }

    #[test]
    fn last_alert_is_most_recent() {
        let mut dialogs = RequestDialogs::default();

        dialogs.alert("first");
        dialogs.alert("second");

        assert_eq!(dialogs.last_alert(), Some("second"));
    }
}
