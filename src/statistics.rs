//! Aggregate totals over every transaction and the panel that displays them.

use maud::{Markup, html};

use crate::{
    currency::{Currency, format_currency},
    html::SwapMode,
    transaction::{Transaction, TransactionType},
};

/// The totals shown in the statistics panel.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Statistics {
    /// The sum of all income amounts.
    pub total_income: f64,
    /// The sum of all expense amounts.
    pub total_expense: f64,
    /// `total_income - total_expense`.
    pub balance: f64,
}

impl Statistics {
    /// Sum `transactions` by type.
    ///
    /// The totals always cover the whole collection, regardless of which
    /// transactions the list is currently showing.
    pub fn from_transactions<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> Self {
        let (total_income, total_expense) =
            transactions
                .into_iter()
                .fold((0.0, 0.0), |(income, expense), transaction| {
                    match transaction.transaction_type {
                        TransactionType::Income => (income + transaction.amount, expense),
                        TransactionType::Expense => (income, expense + transaction.amount),
                    }
                });

        Self {
            total_income,
            total_expense,
            balance: total_income - total_expense,
        }
    }

    /// Whether the balance should be shown as positive, zero included.
    pub fn is_balance_positive(&self) -> bool {
        self.balance >= 0.0
    }
}

const INCOME_CARD: &str = "stat-card income";
const EXPENSE_CARD: &str = "stat-card expense";

/// Renders the three statistic cards.
pub fn statistics_panel_view(
    statistics: &Statistics,
    currency: Currency,
    swap: SwapMode,
) -> Markup {
    let (balance_icon, balance_class) = if statistics.is_balance_positive() {
        ("📈", "stat-card balance positive")
    } else {
        ("📉", "stat-card balance negative")
    };

    html! {
        section
            id="statistics"
            class="statistics"
            hx-swap-oob=[swap.hx_swap_oob()]
        {
            (stat_card("💰", "Total Income", statistics.total_income, currency, INCOME_CARD))
            (stat_card("💸", "Total Expenses", statistics.total_expense, currency, EXPENSE_CARD))
            (stat_card(balance_icon, "Balance", statistics.balance, currency, balance_class))
        }
    }
}

fn stat_card(icon: &str, label: &str, amount: f64, currency: Currency, class: &str) -> Markup {
    html! {
        div class=(class)
        {
            div class="stat-icon" { (icon) }
            div class="stat-content"
            {
                h3 class="stat-label" { (label) }
                p class="stat-value" { (format_currency(amount, currency)) }
            }
        }
    }
}
