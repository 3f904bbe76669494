mod transaction;

pub(crate) use transaction::{Transaction, TransactionDraft, TxnType, MAX_AMOUNT};
