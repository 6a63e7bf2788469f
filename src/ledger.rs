use crate::date::{parse_date, TxDate};
use crate::diagnostics::{Diagnostics, Warning};
use crate::record::CanonicalRecord;
use serde::Serialize;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tracing::{debug, info, trace};

/// The number of lines to add to a record's position to get the line it was
/// read from: one header row, and lines are counted from 1.
const LINE_OFFSET: usize = 2;

/// Stable index of an Account within the Ledger that created it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct AccountId(usize);

/// Stable index of a Transaction within the Ledger that created it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TransactionId(usize);

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Account {
    name: String,
    incoming: Vec<TransactionId>,
    outgoing: Vec<TransactionId>,

    /// Incoming minus outgoing amounts. Only written by
    /// [`Ledger::aggregate_balances`]. Wider than a single amount so that
    /// no batch of i64 amounts can overflow it.
    balance: i128,
}

impl Account {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            incoming: Vec::new(),
            outgoing: Vec::new(),
            balance: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn balance(&self) -> i128 {
        self.balance
    }

    pub fn incoming(&self) -> &[TransactionId] {
        &self.incoming
    }

    pub fn outgoing(&self) -> &[TransactionId] {
        &self.outgoing
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Transaction {
    pub date: TxDate,
    pub from: AccountId,
    pub to: AccountId,
    pub narrative: String,

    /// Always a usable number: amounts that could not be read are stored as
    /// 0.
    pub amount: i64,
}

/// A Ledger owns every Account and Transaction reconstructed from one input
/// batch. Transactions refer to their accounts by [`AccountId`], and accounts
/// refer back to their transactions by [`TransactionId`].
#[derive(Debug, Default)]
pub struct Ledger {
    accounts: Vec<Account>,
    names: HashMap<String, AccountId>,
    transactions: Vec<Transaction>,
}

impl Ledger {
    /// Builds a ledger from canonical records in input order, then computes
    /// every account's balance.
    ///
    /// A malformed record never stops the batch. Unreadable dates are kept
    /// as invalid and unreadable amounts become 0; each defect is reported
    /// through the returned Diagnostics.
    pub fn build(records: &[CanonicalRecord]) -> (Self, Diagnostics) {
        trace!("building ledger from {} records", records.len());
        let mut ledger = Ledger::default();
        let mut diagnostics = Diagnostics::default();

        for (position, record) in records.iter().enumerate() {
            ledger.add_transaction(record, position + LINE_OFFSET, &mut diagnostics);
        }
        ledger.aggregate_balances();

        trace!(
            "ledger built with {} accounts and {} transactions",
            ledger.accounts.len(),
            ledger.transactions.len()
        );
        (ledger, diagnostics)
    }

    /// Returns the id of the account called `name`, creating it first if it
    /// has not been seen before.
    ///
    /// Names are compared exactly: "Alice", "alice" and "Alice " are three
    /// different accounts.
    pub fn get_or_create(&mut self, name: &str) -> AccountId {
        match self.names.entry(name.to_string()) {
            Entry::Occupied(entry) => *entry.get(),
            Entry::Vacant(vacancy) => {
                let id = AccountId(self.accounts.len());
                self.accounts.push(Account::new(name));
                vacancy.insert(id);
                info!("Account created with name: {}", name);
                id
            }
        }
    }

    /// Record a single transaction read from the given input line.
    fn add_transaction(
        &mut self,
        record: &CanonicalRecord,
        line: usize,
        diagnostics: &mut Diagnostics,
    ) {
        trace!("adding transaction from line {}", line);
        let from = self.get_or_create(&record.from);
        let to = self.get_or_create(&record.to);

        let date = parse_date(&record.date);
        if !date.is_valid() {
            diagnostics.report(Warning::InvalidDate { line });
        }

        let amount = match parse_amount(&record.amount) {
            Some(amount) => amount,
            None => {
                diagnostics.report(Warning::InvalidAmount {
                    from: record.from.clone(),
                    to: record.to.clone(),
                    line,
                });
                0
            }
        };

        let transaction = Transaction {
            date,
            from,
            to,
            narrative: record.narrative.clone(),
            amount,
        };
        info!(
            "Transaction created with values: {} {} {} {} {}",
            transaction.date, record.from, record.to, transaction.narrative, amount
        );

        // Only link the transaction once it is fully constructed.
        let id = TransactionId(self.transactions.len());
        self.transactions.push(transaction);
        self.accounts[from.0].outgoing.push(id);
        self.accounts[to.0].incoming.push(id);
    }

    /// Recomputes every account's balance as the sum of its incoming amounts
    /// minus the sum of its outgoing amounts, overwriting the previous value.
    pub fn aggregate_balances(&mut self) {
        trace!("calculating balances");
        let transactions = &self.transactions;
        let total = |ids: &[TransactionId]| -> i128 {
            ids.iter().map(|id| i128::from(transactions[id.0].amount)).sum()
        };

        for account in self.accounts.iter_mut() {
            account.balance = total(&account.incoming) - total(&account.outgoing);
            debug!("{}'s balance is {}", account.name, account.balance);
        }
    }

    pub fn account(&self, id: AccountId) -> &Account {
        &self.accounts[id.0]
    }

    pub fn find_account(&self, name: &str) -> Option<&Account> {
        self.names.get(name).map(|id| self.account(*id))
    }

    pub fn transaction(&self, id: TransactionId) -> &Transaction {
        &self.transactions[id.0]
    }

    /// Accounts in the order they were first referenced.
    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.iter()
    }

    /// Transactions in input order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }
}

/// Reads the leading integer of `raw`: surrounding whitespace and a sign are
/// accepted and anything after the digits (such as a fractional part) is
/// dropped. Returns None when no digits can be read or the value does not
/// fit.
fn parse_amount(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    let sign = match trimmed.as_bytes().first() {
        Some(b'-') | Some(b'+') => 1,
        _ => 0,
    };

    let digits = trimmed[sign..]
        .bytes()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if digits == 0 {
        return None;
    }
    if sign + digits < trimmed.len() {
        debug!("truncating amount {:?} to its integer part", raw);
    }

    trimmed[..sign + digits].parse().ok()
}
