mod filter;
mod summary;

pub(crate) use filter::{select, DateFilter};
pub(crate) use summary::{format_currency, summarize, Summary, SLICE_LABELS};

use chrono::NaiveDate;
use uuid::Uuid;

use crate::db::Database;
use crate::error::{LedgerError, Result};
use crate::models::{Transaction, TransactionDraft, TxnType};

/// Storage key holding the whole ledger as one JSON array.
pub(crate) const STORAGE_KEY: &str = "transactions";

/// Owns the ordered list of transactions.
///
/// Every mutation reads the full ledger, changes it in memory, and writes the
/// full ledger back under [`STORAGE_KEY`].
pub(crate) struct LedgerStore {
    db: Database,
}

impl LedgerStore {
    pub(crate) fn new(db: Database) -> Self {
        Self { db }
    }

    /// Write an empty ledger if none is stored yet.
    pub(crate) fn initialize(&self) -> Result<()> {
        if self.db.get_item(STORAGE_KEY)?.is_none() {
            self.persist(&[])?;
            log::info!("initialized empty ledger");
        }
        Ok(())
    }

    pub(crate) fn add(&self, kind: TxnType, draft: &TransactionDraft) -> Result<Transaction> {
        let txn = Transaction::from_draft(kind, draft)?;
        let mut ledger = self.list()?;
        ledger.push(txn.clone());
        self.persist(&ledger)?;
        log::info!(
            "added {} {} on {} ({})",
            txn.kind,
            txn.amount,
            txn.date,
            txn.id
        );
        Ok(txn)
    }

    /// The full ledger in insertion order.
    ///
    /// An absent or unreadable blob is replaced with an empty ledger.
    pub(crate) fn list(&self) -> Result<Vec<Transaction>> {
        let blob = self.db.get_item(STORAGE_KEY)?;
        match decode(blob.as_deref()) {
            Ok((ledger, upgraded)) => {
                if upgraded {
                    log::info!("assigned ids to {} legacy records", ledger.len());
                    self.persist(&ledger)?;
                }
                Ok(ledger)
            }
            Err(LedgerError::StorageEmptyOrCorrupt(reason)) => {
                log::warn!("{}", LedgerError::StorageEmptyOrCorrupt(reason));
                self.persist(&[])?;
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    /// Remove the record with this id. Returns whether anything was removed.
    pub(crate) fn delete(&self, id: Uuid) -> Result<bool> {
        let mut ledger = self.list()?;
        let before = ledger.len();
        ledger.retain(|t| t.id != id);
        if ledger.len() == before {
            log::debug!("delete: no record with id {id}");
            return Ok(false);
        }
        self.persist(&ledger)?;
        log::info!("deleted record {id}");
        Ok(true)
    }

    /// Remove every record dated `date` with exactly this description.
    /// Returns how many were removed.
    pub(crate) fn delete_matching(&self, date: NaiveDate, description: &str) -> Result<usize> {
        let mut ledger = self.list()?;
        let before = ledger.len();
        ledger.retain(|t| !(t.date == date && t.description == description));
        let removed = before - ledger.len();
        if removed == 0 {
            log::debug!("delete_matching: nothing matches {date} '{description}'");
            return Ok(0);
        }
        self.persist(&ledger)?;
        log::info!("deleted {removed} record(s) matching {date} '{description}'");
        Ok(removed)
    }

    fn persist(&self, ledger: &[Transaction]) -> Result<()> {
        let json = serde_json::to_string(ledger)?;
        self.db.set_item(STORAGE_KEY, &json)?;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn db(&self) -> &Database {
        &self.db
    }
}

/// Parse a stored blob. The flag is set when legacy records were given ids.
fn decode(blob: Option<&str>) -> Result<(Vec<Transaction>, bool)> {
    let blob = blob
        .filter(|b| !b.trim().is_empty())
        .ok_or_else(|| LedgerError::StorageEmptyOrCorrupt("no ledger stored".into()))?;
    let mut ledger: Vec<Transaction> = serde_json::from_str(blob)
        .map_err(|e| LedgerError::StorageEmptyOrCorrupt(e.to_string()))?;

    let mut upgraded = false;
    for txn in ledger.iter_mut().filter(|t| t.id.is_nil()) {
        txn.id = Uuid::new_v4();
        upgraded = true;
    }
    Ok((ledger, upgraded))
}
