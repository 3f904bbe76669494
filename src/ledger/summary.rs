use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{Transaction, TxnType};

const THREE: Decimal = Decimal::from_parts(3, 0, 0, false, 0);

/// Chart slice order; matches [`Summary::chart_values`].
pub(crate) const SLICE_LABELS: [&str; 3] = ["Income", "Expenses", "Balance"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct Summary {
    pub(crate) total_income: Decimal,
    pub(crate) total_expense: Decimal,
    pub(crate) balance: Decimal,
}

impl Summary {
    pub(crate) fn chart_values(&self) -> [Decimal; 3] {
        [self.total_income, self.total_expense, self.balance]
    }

    /// Each chart value as a share of the sum of all three, e.g. `"62.5%"`.
    pub(crate) fn chart_labels(&self) -> [String; 3] {
        let values = self.chart_values();
        match checked_sum(&values) {
            Some(total) => values.map(|v| percent_label(v, total)),
            None => {
                // thirds keep the ratios and always sum in range
                let thirds = values.map(|v| v / THREE);
                let total = checked_sum(&thirds).unwrap_or(Decimal::MAX);
                thirds.map(|v| percent_label(v, total))
            }
        }
    }
}

fn checked_sum(values: &[Decimal]) -> Option<Decimal> {
    values
        .iter()
        .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(*v))
}

/// Income and expense totals over `records`. Totals clamp at `Decimal::MAX`
/// instead of overflowing.
pub(crate) fn summarize<'a, I>(records: I) -> Summary
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let (total_income, total_expense) =
        records
            .into_iter()
            .fold((Decimal::ZERO, Decimal::ZERO), |(inc, exp), t| match t.kind {
                TxnType::Income => (inc.saturating_add(t.amount), exp),
                TxnType::Expense => (inc, exp.saturating_add(t.amount)),
            });

    Summary {
        total_income,
        total_expense,
        balance: total_income.saturating_sub(total_expense),
    }
}

/// `value` as a percentage of `total` with one decimal; `"0%"` when total is
/// zero and `"n/a"` when the share is too large to represent.
pub(crate) fn percent_label(value: Decimal, total: Decimal) -> String {
    if total.is_zero() {
        return "0%".to_string();
    }
    let Some(pct) = value
        .checked_div(total)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
    else {
        return "n/a".to_string();
    };
    let pct = pct.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    format!("{pct:.1}%")
}

/// Two-decimal amount with a currency prefix, e.g. `₹800.00` or `-₹50.00`.
pub(crate) fn format_currency(amount: Decimal, symbol: &str) -> String {
    let abs = amount
        .abs()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if amount < Decimal::ZERO {
        format!("-{symbol}{abs:.2}")
    } else {
        format!("{symbol}{abs:.2}")
    }
}
