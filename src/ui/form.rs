use chrono::NaiveDate;

use crate::error::{LedgerError, Result};
use crate::ledger::DateFilter;
use crate::models::{TransactionDraft, TxnType};

pub(crate) const ENTRY_FIELDS: [&str; 4] = ["Date", "Description", "Category", "Amount"];
pub(crate) const RANGE_FIELDS: [&str; 2] = ["Start date", "End date"];

/// The income or expense entry form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct EntryForm {
    pub(crate) kind: TxnType,
    pub(crate) draft: TransactionDraft,
    pub(crate) focus: usize,
}

impl EntryForm {
    pub(crate) fn new(kind: TxnType) -> Self {
        Self {
            kind,
            draft: TransactionDraft::default(),
            focus: 0,
        }
    }

    pub(crate) fn title(&self) -> String {
        format!(" Add {} ", self.kind)
    }

    pub(crate) fn value(&self, field: usize) -> &str {
        match field {
            0 => &self.draft.date,
            1 => &self.draft.description,
            2 => &self.draft.category,
            _ => &self.draft.amount,
        }
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            0 => &mut self.draft.date,
            1 => &mut self.draft.description,
            2 => &mut self.draft.category,
            _ => &mut self.draft.amount,
        }
    }

    pub(crate) fn push(&mut self, c: char) {
        self.focused_mut().push(c);
    }

    pub(crate) fn pop(&mut self) {
        self.focused_mut().pop();
    }

    pub(crate) fn next_field(&mut self) {
        self.focus = (self.focus + 1) % ENTRY_FIELDS.len();
    }

    pub(crate) fn prev_field(&mut self) {
        self.focus = (self.focus + ENTRY_FIELDS.len() - 1) % ENTRY_FIELDS.len();
    }

    /// Reset after a successful submit.
    pub(crate) fn clear(&mut self) {
        self.draft.clear();
        self.focus = 0;
    }
}

/// Two date inputs for the custom filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct RangeForm {
    pub(crate) start: String,
    pub(crate) end: String,
    pub(crate) focus: usize,
}

impl RangeForm {
    pub(crate) fn value(&self, field: usize) -> &str {
        if field == 0 {
            &self.start
        } else {
            &self.end
        }
    }

    fn focused_mut(&mut self) -> &mut String {
        if self.focus == 0 {
            &mut self.start
        } else {
            &mut self.end
        }
    }

    pub(crate) fn push(&mut self, c: char) {
        self.focused_mut().push(c);
    }

    pub(crate) fn pop(&mut self) {
        self.focused_mut().pop();
    }

    pub(crate) fn next_field(&mut self) {
        self.focus = (self.focus + 1) % RANGE_FIELDS.len();
    }

    /// The custom filter for both inputs. An empty or unparsable input counts as missing.
    pub(crate) fn to_filter(&self) -> Result<DateFilter> {
        match (parse_date(&self.start), parse_date(&self.end)) {
            (Some(start), Some(end)) => Ok(DateFilter::Custom {
                start: Some(start),
                end: Some(end),
            }),
            _ => Err(LedgerError::MissingFilterRange),
        }
    }
}

pub(crate) fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_entry_form_typing_goes_to_focused_field() {
        let mut form = EntryForm::new(TxnType::Expense);
        for c in "2024-01-05".chars() {
            form.push(c);
        }
        form.next_field();
        for c in "Tea".chars() {
            form.push(c);
        }
        form.pop();
        assert_eq!(form.draft.date, "2024-01-05");
        assert_eq!(form.draft.description, "Te");
        assert_eq!(form.value(1), "Te");
        assert!(form.draft.category.is_empty());
    }

    #[test]
    fn test_entry_form_focus_wraps() {
        let mut form = EntryForm::new(TxnType::Income);
        form.prev_field();
        assert_eq!(form.focus, 3);
        form.next_field();
        assert_eq!(form.focus, 0);
    }

    #[test]
    fn test_entry_form_clear() {
        let mut form = EntryForm::new(TxnType::Income);
        form.push('x');
        form.next_field();
        form.clear();
        assert_eq!(form, EntryForm::new(TxnType::Income));
        assert_eq!(form.title(), " Add Income ");
    }

    #[test]
    fn test_range_form_to_filter() {
        let form = RangeForm {
            start: "2024-01-01".into(),
            end: " 2024-01-31 ".into(),
            focus: 0,
        };
        assert_eq!(
            form.to_filter().unwrap(),
            DateFilter::Custom {
                start: parse_date("2024-01-01"),
                end: parse_date("2024-01-31"),
            }
        );
    }

    #[test]
    fn test_range_form_missing_bound() {
        let form = RangeForm {
            start: "2024-01-01".into(),
            ..RangeForm::default()
        };
        assert!(matches!(form.to_filter(), Err(LedgerError::MissingFilterRange)));

        let form = RangeForm {
            start: "yesterday".into(),
            end: "2024-01-31".into(),
            focus: 1,
        };
        assert!(matches!(form.to_filter(), Err(LedgerError::MissingFilterRange)));
    }

    #[test]
    fn test_range_form_typing() {
        let mut form = RangeForm::default();
        form.push('1');
        form.next_field();
        form.push('2');
        form.pop();
        form.push('3');
        assert_eq!(form.value(0), "1");
        assert_eq!(form.value(1), "3");
        form.next_field();
        assert_eq!(form.focus, 0);
    }
}
