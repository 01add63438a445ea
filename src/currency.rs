//! Display currencies and locale-aware money formatting.
//!
//! Selecting a currency only changes how amounts are displayed, amounts are
//! never converted between currencies.

use std::{fmt, str::FromStr};

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use fixed_decimal::FixedDecimal;
use icu::{
    decimal::{FixedDecimalFormatter, options::FixedDecimalFormatterOptions},
    locid::locale,
};
use maud::{Markup, html};
use serde::{Deserialize, Serialize};
use writeable::Writeable;

use crate::{
    app_state::TrackerState,
    endpoints,
    home_page::transaction_list_section,
    html::{FORM_SELECT_STYLE, SwapMode},
    statistics::statistics_panel_view,
    transaction::amount_symbol_view,
};

/// A currency the user can display amounts in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Currency {
    /// Indian Rupee.
    #[default]
    #[serde(rename = "INR")]
    Inr,
    /// US Dollar.
    #[serde(rename = "USD")]
    Usd,
    /// Euro.
    #[serde(rename = "EUR")]
    Eur,
    /// British Pound.
    #[serde(rename = "GBP")]
    Gbp,
    /// Japanese Yen.
    #[serde(rename = "JPY")]
    Jpy,
}

/// The locale whose number conventions are used to format an amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locale {
    /// Groups the last three digits, then every two digits, e.g. "1,00,000".
    EnIn,
    /// Groups every three digits, e.g. "100,000".
    EnUs,
}

impl Currency {
    /// Every selectable currency, in display order.
    pub const ALL: [Currency; 5] = [
        Currency::Inr,
        Currency::Usd,
        Currency::Eur,
        Currency::Gbp,
        Currency::Jpy,
    ];

    /// The ISO 4217 code, e.g. "INR".
    pub fn code(self) -> &'static str {
        match self {
            Currency::Inr => "INR",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Jpy => "JPY",
        }
    }

    /// The symbol written in front of amounts.
    pub fn symbol(self) -> &'static str {
        match self {
            Currency::Inr => "₹",
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Gbp => "£",
            Currency::Jpy => "¥",
        }
    }

    /// The English name of the currency.
    pub fn name(self) -> &'static str {
        match self {
            Currency::Inr => "Indian Rupee",
            Currency::Usd => "US Dollar",
            Currency::Eur => "Euro",
            Currency::Gbp => "British Pound",
            Currency::Jpy => "Japanese Yen",
        }
    }

    /// Rupees use Indian digit grouping, everything else uses US conventions.
    pub fn locale(self) -> Locale {
        match self {
            Currency::Inr => Locale::EnIn,
            _ => Locale::EnUs,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// The error returned when a string is not a supported currency code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported currency code \"{0}\"")]
pub struct UnknownCurrency(pub String);

impl FromStr for Currency {
    type Err = UnknownCurrency;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        Currency::ALL
            .into_iter()
            .find(|currency| currency.code() == code)
            .ok_or_else(|| UnknownCurrency(code.to_owned()))
    }
}

/// Format `amount` as money in `currency`, e.g. "₹1,00,000.00" or "-$1,200.00".
///
/// Amounts are always shown with two decimal places, grouped the way the
/// currency's locale groups digits.
pub fn format_currency(amount: f64, currency: Currency) -> String {
    let rounded = (amount.abs() * 100.0).round() / 100.0;
    let digits = format!("{rounded:.2}");
    let sign = if amount < 0.0 && rounded != 0.0 { "-" } else { "" };

    format!("{sign}{}{}", currency.symbol(), group_digits(&digits, currency.locale()))
}

/// Insert the locale's group separators into `digits`, a plain decimal string.
fn group_digits(digits: &str, locale: Locale) -> String {
    let icu_locale = match locale {
        Locale::EnIn => locale!("en-IN"),
        Locale::EnUs => locale!("en-US"),
    };

    let formatter = match FixedDecimalFormatter::try_new(
        &icu_locale.into(),
        FixedDecimalFormatterOptions::default(),
    ) {
        Ok(formatter) => formatter,
        Err(error) => {
            tracing::error!("could not create the number formatter for {locale:?}: {error}");
            return digits.to_owned();
        }
    };

    match FixedDecimal::from_str(digits) {
        Ok(decimal) => formatter.format(&decimal).write_to_string().into_owned(),
        Err(error) => {
            tracing::error!("could not format \"{digits}\" as a decimal: {error}");
            digits.to_owned()
        }
    }
}

/// The form data for selecting a display currency.
#[derive(Debug, Deserialize)]
pub struct CurrencyForm {
    /// The currency to display amounts in.
    pub currency: Currency,
}

/// A route handler for selecting the display currency.
///
/// Responds with the statistics panel and swaps the transaction list and the
/// entry form's currency symbol out-of-band so every amount uses the new currency.
pub async fn select_currency_endpoint(
    State(state): State<TrackerState>,
    Form(form): Form<CurrencyForm>,
) -> Response {
    let mut tracker = match state.lock() {
        Ok(tracker) => tracker,
        Err(error) => return error.into_alert_response(),
    };

    tracker.select_currency(form.currency);
    let currency = tracker.currency();

    html! {
        (statistics_panel_view(&tracker.statistics(), currency, SwapMode::Target))
        (transaction_list_section(&tracker, SwapMode::OutOfBand))
        (amount_symbol_view(currency, SwapMode::OutOfBand))
    }
    .into_response()
}

/// Renders the drop-down for choosing the display currency.
pub fn currency_selector_view(selected: Currency) -> Markup {
    html! {
        div class="currency-selector"
        {
            label for="currency" class="form-label" { "Currency" }

            select
                name="currency"
                id="currency"
                class=(FORM_SELECT_STYLE)
                hx-post=(endpoints::CURRENCY_API)
                hx-trigger="change"
                hx-target="#statistics"
                hx-swap="outerHTML"
                hx-target-error="#alert-container"
            {
                @for currency in Currency::ALL {
                    option value=(currency.code()) selected[currency == selected]
                    {
                        (currency.symbol()) " " (currency.code()) " - " (currency.name())
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{extract::State, response::IntoResponse};
    use axum_extra::extract::Form;
    use scraper::{Html, Selector};

    use crate::{
        MemoryKeyValueStore,
        preferences::load_currency,
        test_utils::{parse_html_fragment, test_tracker_state},
    };

    use super::{
        Currency, CurrencyForm, currency_selector_view, format_currency, select_currency_endpoint,
    };

    #[test]
    fn formats_rupees_with_indian_grouping() {
        assert_eq!(format_currency(50000.0, Currency::Inr), "₹50,000.00");
        assert_eq!(format_currency(100000.0, Currency::Inr), "₹1,00,000.00");
        assert_eq!(format_currency(12345678.9, Currency::Inr), "₹1,23,45,678.90");
        assert_eq!(format_currency(999.0, Currency::Inr), "₹999.00");
    }

    #[test]
    fn formats_other_currencies_with_thousands_grouping() {
        assert_eq!(format_currency(100000.0, Currency::Usd), "$100,000.00");
        assert_eq!(format_currency(1234567.5, Currency::Eur), "€1,234,567.50");
        assert_eq!(format_currency(58000.0, Currency::Gbp), "£58,000.00");
        assert_eq!(format_currency(5.0, Currency::Jpy), "¥5.00");
    }

    #[test]
    fn formats_negative_and_zero_amounts() {
        assert_eq!(format_currency(-1200.0, Currency::Usd), "-$1,200.00");
        assert_eq!(format_currency(-2700.0, Currency::Inr), "-₹2,700.00");
        assert_eq!(format_currency(0.0, Currency::Usd), "$0.00");
        assert_eq!(format_currency(-0.001, Currency::Usd), "$0.00");
    }

    #[test]
    fn formats_huge_amounts_exactly() {
        assert_eq!(
            format_currency(1e20, Currency::Usd),
            "$100,000,000,000,000,000,000.00"
        );
        assert_eq!(
            format_currency(1e20, Currency::Inr),
            "₹10,00,00,00,00,00,00,00,00,000.00"
        );
    }

    #[test]
    fn rounds_to_cents() {
        assert_eq!(format_currency(0.125, Currency::Usd), "$0.13");
        assert_eq!(format_currency(19.999, Currency::Usd), "$20.00");
    }

    #[test]
    fn parses_currency_codes() {
        for currency in Currency::ALL {
            assert_eq!(currency.code().parse::<Currency>(), Ok(currency));
        }

        assert!("AUD".parse::<Currency>().is_err());
        assert!("inr".parse::<Currency>().is_err());
    }

    #[test]
    fn selector_marks_selected_currency() {
        let html = Html::parse_fragment(&currency_selector_view(Currency::Eur).into_string());

        let options = Selector::parse("option").unwrap();
        let selected: Vec<_> = html
            .select(&options)
            .filter(|option| option.value().attr("selected").is_some())
            .filter_map(|option| option.value().attr("value"))
            .collect();

        assert_eq!(html.select(&options).count(), 5);
        assert_eq!(selected, vec!["EUR"]);
    }

    #[tokio::test]
    async fn selecting_currency_updates_tracker_and_store() {
        let store = MemoryKeyValueStore::default();
        let state = test_tracker_state(store.clone());

        let response = select_currency_endpoint(
            State(state.clone()),
            Form(CurrencyForm {
                currency: Currency::Gbp,
            }),
        )
        .await
        .into_response();

        assert_eq!(state.lock().unwrap().currency(), Currency::Gbp);
        assert_eq!(load_currency(&store), Currency::Gbp);

        let html = parse_html_fragment(response).await;
        let symbol = Selector::parse("#amount-currency-symbol").unwrap();
        let symbol = html.select(&symbol).next().expect("no currency symbol swap");
        assert_eq!(symbol.value().attr("hx-swap-oob"), Some("true"));
        assert_eq!(symbol.text().collect::<String>(), "£");
    }
}
