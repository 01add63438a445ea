//! The entry form for recording a new transaction.

use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    currency::Currency,
    dialog::Dialogs,
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_SELECT_STYLE, FORM_TEXT_INPUT_STYLE,
        SwapMode,
    },
    transaction::core::{Category, NewTransaction, TransactionType},
};

/// The options of the type drop-down, in display order.
const TRANSACTION_TYPES: [TransactionType; 2] =
    [TransactionType::Expense, TransactionType::Income];

/// The entry form fields that can receive focus after a submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    /// The description text box.
    Description,
    /// The amount input.
    Amount,
}

/// Why the entry form rejected a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    /// The description, amount or category was left empty.
    #[error("Please fill in all fields")]
    MissingFields,
    /// The amount was not a number greater than zero.
    #[error("Amount must be greater than 0")]
    NonPositiveAmount,
}

impl FormError {
    /// The field the user should fix first.
    pub fn focus(self) -> FormField {
        match self {
            FormError::MissingFields => FormField::Description,
            FormError::NonPositiveAmount => FormField::Amount,
        }
    }
}

/// The entry form's fields exactly as the user typed them.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TransactionDraft {
    /// What the transaction was for, possibly blank.
    #[serde(default)]
    pub description: String,
    /// The amount as typed, not yet parsed.
    #[serde(default)]
    pub amount: String,
    /// The category name, empty if none has been selected.
    #[serde(default)]
    pub category: String,
    /// Income or expense, decides which categories are offered.
    #[serde(rename = "type", default)]
    pub transaction_type: TransactionType,
}

impl TransactionDraft {
    /// Check the draft, returning the transaction it describes.
    ///
    /// A category that does not belong to the draft's type counts as not
    /// selected, and an amount that is not a number counts as not positive.
    ///
    /// # Errors
    /// Returns [FormError::MissingFields] before [FormError::NonPositiveAmount]
    /// when both apply.
    pub fn validate(&self) -> Result<NewTransaction, FormError> {
        let description = self.description.trim();
        let amount = self.amount.trim();

        if description.is_empty() || amount.is_empty() {
            return Err(FormError::MissingFields);
        }

        let Some(category) = self.selected_category() else {
            return Err(FormError::MissingFields);
        };

        let amount = amount
            .parse::<f64>()
            .ok()
            .filter(|amount| amount.is_finite() && *amount > 0.0)
            .ok_or(FormError::NonPositiveAmount)?;

        Ok(NewTransaction {
            description: description.to_owned(),
            amount,
            category,
            transaction_type: self.transaction_type,
        })
    }

    fn selected_category(&self) -> Option<Category> {
        self.category
            .parse::<Category>()
            .ok()
            .filter(|category| category.is_allowed_for(self.transaction_type))
    }
}

/// The state of the entry form between renders.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryForm {
    draft: TransactionDraft,
    focus: Option<FormField>,
}

impl Default for EntryForm {
    fn default() -> Self {
        Self::new()
    }
}

impl EntryForm {
    /// An empty form for an expense, with the description focused.
    pub fn new() -> Self {
        Self {
            draft: TransactionDraft::default(),
            focus: Some(FormField::Description),
        }
    }

    /// A form holding what the user typed.
    pub fn from_draft(draft: TransactionDraft) -> Self {
        Self { draft, focus: None }
    }

    /// What the user has typed so far.
    pub fn draft(&self) -> &TransactionDraft {
        &self.draft
    }

    /// The field to focus when the form is next rendered.
    pub fn focus(&self) -> Option<FormField> {
        self.focus
    }

    /// Switch the draft to `transaction_type`, clearing a category the new type does not allow.
    pub fn change_type(&mut self, transaction_type: TransactionType) {
        self.draft.transaction_type = transaction_type;

        if self.draft.selected_category().is_none() {
            self.draft.category.clear();
        }
    }

    /// Validate the draft and, if it is valid, reset the form and return the new transaction.
    ///
    /// A rejected draft is kept so the user can fix it, the reason is shown
    /// with `dialogs` and the offending field is focused.
    pub fn submit(&mut self, dialogs: &mut dyn Dialogs) -> Option<NewTransaction> {
        match self.draft.validate() {
            Ok(new_transaction) => {
                *self = Self::new();
                Some(new_transaction)
            }
            Err(error) => {
                tracing::debug!("rejected transaction draft: {error}");
                dialogs.alert(&error.to_string());
                self.focus = Some(error.focus());
                None
            }
        }
    }
}

/// The currency symbol in the amount label.
pub fn amount_symbol_view(currency: Currency, swap: SwapMode) -> Markup {
    html! {
        span id="amount-currency-symbol" hx-swap-oob=[swap.hx_swap_oob()] { (currency.symbol()) }
    }
}

/// Renders the entry form, with `alert` shown in a modal dialog if present.
pub fn entry_form_view(
    form: &EntryForm,
    currency: Currency,
    alert: Option<&str>,
    swap: SwapMode,
) -> Markup {
    let draft = form.draft();

    html! {
        div
            id="transaction-form"
            class="card form-card"
            hx-swap-oob=[swap.hx_swap_oob()]
        {
            h2 class="card-title" { "Add Transaction" }

            @if let Some(message) = alert {
                dialog open class="validation-dialog" role="alertdialog"
                {
                    p class="dialog-message" { (message) }

                    form method="dialog"
                    {
                        button type="submit" class=(BUTTON_PRIMARY_STYLE) { "OK" }
                    }
                }
            }

            form
                class="transaction-form"
                hx-post=(endpoints::TRANSACTIONS_API)
                hx-target="#transaction-form"
                hx-swap="outerHTML"
                hx-target-error="#alert-container"
            {
                div class="form-group"
                {
                    label for="type" class=(FORM_LABEL_STYLE) { "Type" }

                    select
                        name="type"
                        id="type"
                        class=(FORM_SELECT_STYLE)
                        hx-get=(endpoints::TRANSACTION_FORM)
                        hx-trigger="change"
                        hx-include="closest form"
                        hx-target="#transaction-form"
                        hx-swap="outerHTML"
                    {
                        @for transaction_type in TRANSACTION_TYPES {
                            option
                                value=(transaction_type.as_str())
                                selected[transaction_type == draft.transaction_type]
                            {
                                (transaction_type.label())
                            }
                        }
                    }
                }

                div class="form-group"
                {
                    label for="description" class=(FORM_LABEL_STYLE) { "Description" }

                    input
                        name="description"
                        id="description"
                        type="text"
                        placeholder="Enter description"
                        value=(draft.description)
                        autofocus[form.focus() == Some(FormField::Description)]
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div class="form-group"
                {
                    label for="amount" class=(FORM_LABEL_STYLE)
                    {
                        "Amount (" (amount_symbol_view(currency, SwapMode::Target)) ")"
                    }

                    input
                        name="amount"
                        id="amount"
                        type="number"
                        step="0.01"
                        placeholder="0.00"
                        value=(draft.amount)
                        autofocus[form.focus() == Some(FormField::Amount)]
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div class="form-group"
                {
                    label for="category" class=(FORM_LABEL_STYLE) { "Category" }

                    select
                        name="category"
                        id="category"
                        class=(FORM_SELECT_STYLE)
                    {
                        option value="" { "Select category..." }

                        @for category in Category::for_type(draft.transaction_type) {
                            option
                                value=(category.name())
                                selected[draft.category == category.name()]
                            {
                                (category.icon()) " " (category.name())
                            }
                        }
                    }
                }

                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Add Transaction" }
            }
        }
    }
}
