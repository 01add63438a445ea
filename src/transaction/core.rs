//! Defines the core data models for transactions.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use time::Date;

/// Identifies a transaction within the tracker.
///
/// IDs are derived from the creation time in milliseconds since the Unix epoch.
pub type TransactionId = i64;

/// Whether money was earned or spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money was earned.
    Income,
    /// Money was spent.
    #[default]
    Expense,
}

impl TransactionType {
    /// The value used in forms and CSS classes, e.g. "income".
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }

    /// The label shown to the user, e.g. "Income".
    pub fn label(self) -> &'static str {
        match self {
            TransactionType::Income => "Income",
            TransactionType::Expense => "Expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The icon shown for categories the app does not recognise.
pub const FALLBACK_CATEGORY_ICON: &str = "📌";

/// What a transaction was for.
///
/// Transactions loaded with a category name the app does not know are
/// filed under [Category::Other] and shown with [FALLBACK_CATEGORY_ICON].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Regular pay from an employer.
    Salary,
    /// Pay for contract work.
    Freelance,
    /// Income from running a business.
    Business,
    /// Returns on investments.
    Investment,
    /// Groceries and eating out.
    Food,
    /// Getting around.
    Transport,
    /// Power, water, internet and the like.
    Utilities,
    /// Going out and hobbies.
    Entertainment,
    /// Everything bought in a shop that is not food.
    Shopping,
    /// Doctors and medicine.
    Healthcare,
    /// Courses and books.
    Education,
    /// Anything else, including categories the app does not recognise.
    #[serde(other)]
    Other,
}

const INCOME_CATEGORIES: [Category; 5] = [
    Category::Salary,
    Category::Freelance,
    Category::Business,
    Category::Investment,
    Category::Other,
];

const EXPENSE_CATEGORIES: [Category; 8] = [
    Category::Food,
    Category::Transport,
    Category::Utilities,
    Category::Entertainment,
    Category::Shopping,
    Category::Healthcare,
    Category::Education,
    Category::Other,
];

const ALL_CATEGORIES: [Category; 12] = [
    Category::Salary,
    Category::Freelance,
    Category::Business,
    Category::Investment,
    Category::Food,
    Category::Transport,
    Category::Utilities,
    Category::Entertainment,
    Category::Shopping,
    Category::Healthcare,
    Category::Education,
    Category::Other,
];

impl Category {
    /// The categories a transaction of `transaction_type` may use, in display order.
    pub fn for_type(transaction_type: TransactionType) -> &'static [Category] {
        match transaction_type {
            TransactionType::Income => &INCOME_CATEGORIES,
            TransactionType::Expense => &EXPENSE_CATEGORIES,
        }
    }

    /// Whether `transaction_type` transactions may use this category.
    pub fn is_allowed_for(self, transaction_type: TransactionType) -> bool {
        Category::for_type(transaction_type).contains(&self)
    }

    /// The name shown to the user, e.g. "Healthcare".
    pub fn name(self) -> &'static str {
        match self {
            Category::Salary => "Salary",
            Category::Freelance => "Freelance",
            Category::Business => "Business",
            Category::Investment => "Investment",
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Utilities => "Utilities",
            Category::Entertainment => "Entertainment",
            Category::Shopping => "Shopping",
            Category::Healthcare => "Healthcare",
            Category::Education => "Education",
            Category::Other => "Other",
        }
    }

    /// The glyph shown next to transactions in this category.
    pub fn icon(self) -> &'static str {
        match self {
            Category::Salary => "💼",
            Category::Freelance => "💻",
            Category::Business => "🏢",
            Category::Investment => "📈",
            Category::Food => "🍔",
            Category::Transport => "🚗",
            Category::Utilities => "💡",
            Category::Entertainment => "🎬",
            Category::Shopping => "🛍️",
            Category::Healthcare => "🏥",
            Category::Education => "📚",
            Category::Other => FALLBACK_CATEGORY_ICON,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The error returned when a string does not name a category.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category \"{0}\"")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        ALL_CATEGORIES
            .into_iter()
            .find(|category| category.name() == name)
            .ok_or_else(|| UnknownCategory(name.to_owned()))
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// Transactions are never edited, only created and deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The amount of money spent or earned, always greater than zero.
    pub amount: f64,
    /// What the transaction was for.
    pub category: Category,
    /// Whether money was earned or spent.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// When the transaction was recorded.
    pub date: Date,
}

impl Transaction {
    /// Whether the transaction is money earned.
    pub fn is_income(&self) -> bool {
        self.transaction_type == TransactionType::Income
    }
}

/// A validated transaction from the entry form that has not yet been given
/// an ID or date.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    /// The trimmed, non-empty description.
    pub description: String,
    /// The amount, always greater than zero.
    pub amount: f64,
    /// A category allowed for `transaction_type`.
    pub category: Category,
    /// Whether money was earned or spent.
    pub transaction_type: TransactionType,
}

impl NewTransaction {
    /// Finish the transaction with its ID and date.
    pub fn into_transaction(self, id: TransactionId, date: Date) -> Transaction {
        Transaction {
            id,
            description: self.description,
            amount: self.amount,
            category: self.category,
            transaction_type: self.transaction_type,
            date,
        }
    }
}
