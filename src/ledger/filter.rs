use chrono::{Datelike, Months, NaiveDate};

use crate::error::{LedgerError, Result};
use crate::models::Transaction;

/// Which slice of the ledger is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum DateFilter {
    #[default]
    All,
    /// From the first day of the previous month through today.
    LastMonth,
    /// From January 1st of the previous year through today.
    LastYear,
    /// Both bounds inclusive. A missing bound is an input error, not an open range.
    Custom {
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    },
}

impl DateFilter {
    pub(crate) fn parse(
        mode: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Option<Self> {
        match mode.trim().to_lowercase().as_str() {
            "all" => Some(Self::All),
            "last-month" | "month" => Some(Self::LastMonth),
            "last-year" | "year" => Some(Self::LastYear),
            "custom" => Some(Self::Custom { start, end }),
            _ => None,
        }
    }

    pub(crate) fn name(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::LastMonth => "last-month",
            Self::LastYear => "last-year",
            Self::Custom { .. } => "custom",
        }
    }

    /// Inclusive date bounds relative to `today`, or `None` for no bounds.
    pub(crate) fn bounds(&self, today: NaiveDate) -> Result<Option<(NaiveDate, NaiveDate)>> {
        match *self {
            Self::All => Ok(None),
            Self::LastMonth => Ok(Some((first_of_previous_month(today), today))),
            Self::LastYear => Ok(Some((first_of_previous_year(today), today))),
            Self::Custom {
                start: Some(start),
                end: Some(end),
            } => Ok(Some((start, end))),
            Self::Custom { .. } => Err(LedgerError::MissingFilterRange),
        }
    }
}

impl std::fmt::Display for DateFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "All"),
            Self::LastMonth => write!(f, "Last month"),
            Self::LastYear => write!(f, "Last year"),
            Self::Custom {
                start: Some(start),
                end: Some(end),
            } => write!(f, "{start} to {end}"),
            Self::Custom { .. } => write!(f, "Custom"),
        }
    }
}

/// Records whose date falls inside `filter`, in ledger order.
pub(crate) fn select<'a>(
    records: &'a [Transaction],
    filter: &DateFilter,
    today: NaiveDate,
) -> Result<Vec<&'a Transaction>> {
    let selected = match filter.bounds(today)? {
        None => records.iter().collect(),
        Some((start, end)) => records
            .iter()
            .filter(|t| t.date >= start && t.date <= end)
            .collect(),
    };
    Ok(selected)
}

fn first_of_previous_month(today: NaiveDate) -> NaiveDate {
    today
        .with_day(1)
        .and_then(|d| d.checked_sub_months(Months::new(1)))
        .unwrap_or(NaiveDate::MIN)
}

fn first_of_previous_year(today: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(today.year() - 1, 1, 1).unwrap_or(NaiveDate::MIN)
}
