use std::collections::VecDeque;

use crate::dialog::Dialogs;

/// Dialogs that answer confirmations from a script and record everything shown.
///
/// Confirmations beyond the end of the script are declined.
#[derive(Debug, Default)]
pub(crate) struct ScriptedDialogs {
    answers: VecDeque<bool>,
    pub(crate) alerts: Vec<String>,
    pub(crate) confirmations: Vec<String>,
}

impl ScriptedDialogs {
    pub(crate) fn answering(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            ..Default::default()
        }
    }
}

impl Dialogs for ScriptedDialogs {
    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_owned());
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.confirmations.push(message.to_owned());
        self.answers.pop_front().unwrap_or(false)
    }
}
