use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::error::ValidationError;

/// Largest amount a single entry may carry. Keeps ledger totals well inside
/// `Decimal` range.
pub(crate) const MAX_AMOUNT: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub(crate) enum TxnType {
    Income,
    Expense,
}

impl TxnType {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
        }
    }

    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" | "in" => Some(Self::Income),
            "expense" | "exp" | "out" => Some(Self::Expense),
            _ => None,
        }
    }

    pub(crate) fn all() -> &'static [TxnType] {
        &[Self::Income, Self::Expense]
    }
}

impl std::fmt::Display for TxnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One ledger entry as stored in the `transactions` blob.
///
/// Blobs written before ids existed deserialize with a nil id; the ledger
/// store assigns a fresh one on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Transaction {
    #[serde(default = "Uuid::nil")]
    pub(crate) id: Uuid,
    pub(crate) date: NaiveDate,
    pub(crate) description: String,
    pub(crate) category: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub(crate) amount: Decimal,
    #[serde(rename = "type")]
    pub(crate) kind: TxnType,
}

impl Transaction {
    /// Validate raw form input and build a new record with a fresh id.
    pub(crate) fn from_draft(kind: TxnType, draft: &TransactionDraft) -> Result<Self, ValidationError> {
        let date_str = draft.date.trim();
        if date_str.is_empty() {
            return Err(ValidationError::MissingDate);
        }
        let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
            .map_err(|_| ValidationError::InvalidDate(date_str.to_string()))?;

        let description = draft.description.trim();
        if description.is_empty() {
            return Err(ValidationError::MissingDescription);
        }

        let category = draft.category.trim();
        if category.is_empty() {
            return Err(ValidationError::MissingCategory);
        }

        let amount_str = draft.amount.trim();
        let amount = Decimal::from_str(amount_str)
            .map_err(|_| ValidationError::InvalidAmount(amount_str.to_string()))?;
        if amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount);
        }
        if amount > MAX_AMOUNT {
            return Err(ValidationError::AmountTooLarge);
        }

        Ok(Self {
            id: Uuid::new_v4(),
            date,
            description: description.to_string(),
            category: category.to_string(),
            amount,
            kind,
        })
    }

    pub(crate) fn is_income(&self) -> bool {
        self.kind == TxnType::Income
    }

    pub(crate) fn is_expense(&self) -> bool {
        self.kind == TxnType::Expense
    }
}

/// Unvalidated entry fields exactly as typed into a form or passed on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct TransactionDraft {
    pub(crate) date: String,
    pub(crate) description: String,
    pub(crate) category: String,
    pub(crate) amount: String,
}

impl TransactionDraft {
    pub(crate) fn new(
        date: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
        amount: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            description: description.into(),
            category: category.into(),
            amount: amount.into(),
        }
    }

    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }
}
