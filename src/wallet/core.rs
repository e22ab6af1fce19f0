//! The wallet ledger: a balance plus an ordered transaction history.
//!
//! [Wallet::apply] is the single entry point for mutations. It validates the
//! request, then updates the balance and history together, so a failed
//! request can never be observed as a partial write.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error,
    wallet::{Cents, Recipient, validate::validate_sufficient_funds},
};

/// The identifier of a transaction, unique within a session.
pub type TransactionId = i64;

/// The kind of a wallet mutation.
///
/// The kind determines the sign of the balance change and the initial status
/// of the created transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub enum TransactionKind {
    /// Money moved into the wallet from a bank account.
    Deposit,
    /// Money moved out of the wallet to a bank account.
    Withdraw,
    /// Money sent to another user of the platform.
    Transfer,
    /// An investment into a startup's funding round.
    Funding,
}

impl TransactionKind {
    /// Whether this kind reduces the wallet balance.
    pub fn is_debit(self) -> bool {
        !matches!(self, TransactionKind::Deposit)
    }

    /// The kind as display text, e.g. "Deposit".
    pub fn label(self) -> &'static str {
        match self {
            TransactionKind::Deposit => "Deposit",
            TransactionKind::Withdraw => "Withdraw",
            TransactionKind::Transfer => "Transfer",
            TransactionKind::Funding => "Funding",
        }
    }
}

/// The lifecycle marker on a transaction.
///
/// A transaction is created in a terminal or pending status and never
/// revisited; there is no settlement, retry, or cancellation flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub enum TransactionStatus {
    /// The mutation has been applied and will never change.
    Completed,
    /// The mutation has been applied but the deal has not been finalised.
    Pending,
    /// The mutation was recorded as failed.
    Failed,
}

impl TransactionStatus {
    /// The status as display text, e.g. "Completed".
    pub fn label(self) -> &'static str {
        match self {
            TransactionStatus::Completed => "Completed",
            TransactionStatus::Pending => "Pending",
            TransactionStatus::Failed => "Failed",
        }
    }
}

/// A single entry in the wallet's transaction history.
///
/// Transactions are created exactly once by [Wallet::apply] (or seeded as
/// fixtures) and are immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// What kind of mutation created this transaction.
    pub kind: TransactionKind,
    /// The amount of money moved, always positive.
    pub amount: Cents,
    /// The display name of the sending party, where one applies.
    pub sender: Option<String>,
    /// The display name of the receiving party, where one applies.
    pub receiver: Option<String>,
    /// The lifecycle marker, set once at creation.
    pub status: TransactionStatus,
    /// The calendar date the transaction was created.
    pub date: Date,
    /// A free-text label describing the transaction.
    pub description: String,
}

/// Read-side totals recomputed from the transaction list on demand.
///
/// Only `Completed` transactions count towards these figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WalletStats {
    /// The sum of all completed deposits.
    pub total_deposits: Cents,
    /// The sum of all completed withdrawals.
    pub total_withdrawals: Cents,
    /// The sum of all completed fundings.
    pub total_invested: Cents,
}

/// A point-in-time copy of the wallet, decoupled from the store so views can
/// render without holding the lock.
#[derive(Debug, Clone, PartialEq)]
pub struct WalletSnapshot {
    /// The balance at the time of the snapshot.
    pub balance: Cents,
    /// The history at the time of the snapshot, newest first.
    pub transactions: Vec<Transaction>,
}

/// The in-memory holder of the balance and transaction history.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Wallet {
    balance: Cents,
    /// Newest first.
    transactions: Vec<Transaction>,
    next_id: TransactionId,
}

impl Wallet {
    /// Create a wallet holding `opening_balance` and no history.
    pub fn new(opening_balance: Cents) -> Self {
        Self {
            balance: opening_balance,
            transactions: Vec::new(),
            next_id: 1,
        }
    }

    /// Create a wallet from a balance and a pre-existing history, newest
    /// first. Used to seed fixture data.
    pub fn with_history(balance: Cents, transactions: Vec<Transaction>) -> Self {
        let next_id = transactions
            .iter()
            .map(|transaction| transaction.id)
            .max()
            .unwrap_or(0)
            + 1;

        Self {
            balance,
            transactions,
            next_id,
        }
    }

    /// The current balance.
    pub fn balance(&self) -> Cents {
        self.balance
    }

    /// The transaction history, newest first.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Apply a mutation to the wallet.
    ///
    /// On success the created transaction is prepended to the history, the
    /// balance is adjusted, and a copy of the record is returned. Funding
    /// transactions are created `Pending`; every other kind is created
    /// `Completed`. Validation happens before any mutation, so on error the
    /// balance and history are untouched.
    ///
    /// # Errors
    /// This function will return an:
    /// - [Error::InvalidAmount] if `amount` is not positive,
    /// - or [Error::InsufficientBalance] if a debit exceeds the balance,
    /// - or [Error::MissingRecipient] if a transfer or funding has no
    ///   counterparty.
    pub fn apply(
        &mut self,
        kind: TransactionKind,
        amount: Cents,
        counterparty: Option<Recipient>,
        date: Date,
    ) -> Result<Transaction, Error> {
        if !amount.is_positive() {
            return Err(Error::InvalidAmount(amount.minor_units().to_string()));
        }

        if kind.is_debit() {
            validate_sufficient_funds(amount, self.balance)?;
        }

        let recipient = match kind {
            TransactionKind::Transfer | TransactionKind::Funding => {
                Some(counterparty.ok_or(Error::MissingRecipient)?)
            }
            TransactionKind::Deposit | TransactionKind::Withdraw => None,
        };

        let balance = if kind.is_debit() {
            // A debit cannot underflow: the funds check above bounds it.
            self.balance.checked_sub(amount)
        } else {
            self.balance.checked_add(amount)
        }
        .ok_or_else(|| Error::InvalidAmount(amount.minor_units().to_string()))?;

        let transaction = build_transaction(self.next_id, kind, amount, recipient, date);

        self.balance = balance;
        self.transactions.insert(0, transaction.clone());
        self.next_id += 1;

        Ok(transaction)
    }

    /// Recompute the read-side totals from the history.
    pub fn stats(&self) -> WalletStats {
        let completed_total = |kind: TransactionKind| {
            self.transactions
                .iter()
                .filter(|transaction| {
                    transaction.kind == kind && transaction.status == TransactionStatus::Completed
                })
                .fold(Cents::ZERO, |sum, transaction| {
                    sum.checked_add(transaction.amount).unwrap_or(sum)
                })
        };

        WalletStats {
            total_deposits: completed_total(TransactionKind::Deposit),
            total_withdrawals: completed_total(TransactionKind::Withdraw),
            total_invested: completed_total(TransactionKind::Funding),
        }
    }

    /// Take a point-in-time copy of the balance and history.
    pub fn snapshot(&self) -> WalletSnapshot {
        WalletSnapshot {
            balance: self.balance,
            transactions: self.transactions.clone(),
        }
    }
}

fn build_transaction(
    id: TransactionId,
    kind: TransactionKind,
    amount: Cents,
    recipient: Option<Recipient>,
    date: Date,
) -> Transaction {
    let (status, sender, receiver, description) = match (kind, recipient) {
        (TransactionKind::Deposit, _) => (
            TransactionStatus::Completed,
            None,
            None,
            "Bank transfer deposit".to_owned(),
        ),
        (TransactionKind::Withdraw, _) => (
            TransactionStatus::Completed,
            None,
            None,
            "Bank account withdrawal".to_owned(),
        ),
        (TransactionKind::Transfer, Some(recipient)) => (
            TransactionStatus::Completed,
            Some("You".to_owned()),
            Some(recipient.to_string()),
            format!("Transfer to {recipient}"),
        ),
        (TransactionKind::Funding, Some(recipient)) => (
            TransactionStatus::Pending,
            Some("You".to_owned()),
            Some(recipient.to_string()),
            format!("Investment in {recipient}"),
        ),
        // `apply` guarantees a recipient for transfers and fundings.
        (TransactionKind::Transfer | TransactionKind::Funding, None) => unreachable!(),
    };

    Transaction {
        id,
        kind,
        amount,
        sender,
        receiver,
        status,
        date,
        description,
    }
}
