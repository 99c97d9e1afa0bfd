use std::collections::HashSet;

use crate::errors::LedgerError;

use super::transaction::{Transaction, TransactionDraft, TransactionId};

/// The append/delete collection of transactions; single source of truth for
/// money movement.
///
/// The store is a plain owned value with no interior locking. Callers that
/// share it across threads wrap it in a `Mutex` and take [`snapshot`]s under
/// the lock; aggregation then runs on the copy outside it.
///
/// [`snapshot`]: LedgerStore::snapshot
#[derive(Debug, Clone, Default)]
pub struct LedgerStore {
    transactions: Vec<Transaction>,
    last_id: u64,
}

impl LedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns the next sequence id, appends, and returns the new id.
    pub fn add(&mut self, draft: TransactionDraft) -> TransactionId {
        self.last_id += 1;
        let id = TransactionId(self.last_id);
        tracing::debug!(%id, category = %draft.category, "ledger add");
        self.transactions.push(Transaction::from_draft(id, draft));
        id
    }

    /// Appends a transaction that already carries an id (the import path).
    /// Duplicate ids are a data-integrity error and leave the store unchanged.
    pub fn insert(&mut self, transaction: Transaction) -> Result<TransactionId, LedgerError> {
        let id = transaction.id;
        if self.get(id).is_some() {
            return Err(LedgerError::DuplicateTransaction(id));
        }
        self.last_id = self.last_id.max(id.0);
        self.transactions.push(transaction);
        Ok(id)
    }

    /// Removes by id. Unknown ids are a no-op returning false, so duplicate
    /// delete requests are harmless.
    pub fn remove(&mut self, id: TransactionId) -> bool {
        match self.transactions.iter().position(|tx| tx.id == id) {
            Some(index) => {
                self.transactions.remove(index);
                tracing::debug!(%id, "ledger remove");
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|tx| tx.id == id)
    }

    /// All transactions in insertion order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Point-in-time copy for computing outside a lock.
    pub fn snapshot(&self) -> Vec<Transaction> {
        self.transactions.clone()
    }

    /// Replaces the whole collection, re-seating the id sequence past the
    /// highest incoming id. Duplicate ids within the incoming set are
    /// rejected and leave the store untouched.
    pub fn replace_all(&mut self, transactions: Vec<Transaction>) -> Result<(), LedgerError> {
        let mut seen = HashSet::new();
        for tx in &transactions {
            if !seen.insert(tx.id) {
                return Err(LedgerError::DuplicateTransaction(tx.id));
            }
        }
        self.last_id = transactions.iter().map(|tx| tx.id.0).max().unwrap_or(0);
        self.transactions = transactions;
        Ok(())
    }
}
