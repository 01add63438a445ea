#![allow(missing_docs)]

pub(crate) mod dialogs;
pub(crate) mod form;
pub(crate) mod html;
pub(crate) mod state;

pub(crate) use dialogs::ScriptedDialogs;
pub(crate) use form::{assert_hx_endpoint, must_get_form};
pub(crate) use html::{assert_valid_html, parse_html_document, parse_html_fragment};
pub(crate) use state::test_tracker_state;
