use crate::ledger::{Ledger, Transaction, TransactionId};
use std::fmt;
use tracing::trace;

/// The selector that asks for every account's balance.
pub const ALL: &str = "All";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Query {
    /// The balance of every account.
    All,

    /// The outgoing and incoming history of one account, by exact name.
    Account(String),
}

impl Query {
    pub fn from_selector(selector: &str) -> Self {
        if selector == ALL {
            Query::All
        } else {
            Query::Account(selector.to_string())
        }
    }
}

/// A transaction as shown in an account history, with account ids resolved
/// to names.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionLine<'a> {
    pub transaction: &'a Transaction,
    pub from: &'a str,
    pub to: &'a str,
}

#[derive(Debug, PartialEq, Eq)]
pub enum QueryResult<'a> {
    Balances(Vec<(&'a str, i128)>),
    AccountNotFound(String),
    History {
        outgoing: Vec<TransactionLine<'a>>,
        incoming: Vec<TransactionLine<'a>>,
    },
}

impl Ledger {
    /// Answers a query without modifying the ledger. Asking for an account
    /// that does not exist is reported in the result, not as an error.
    pub fn answer(&self, query: &Query) -> QueryResult<'_> {
        match query {
            Query::All => {
                trace!("listing all balances");
                QueryResult::Balances(
                    self.accounts()
                        .map(|account| (account.name(), account.balance()))
                        .collect(),
                )
            }
            Query::Account(name) => {
                trace!("listing account {}", name);
                match self.find_account(name) {
                    None => QueryResult::AccountNotFound(name.clone()),
                    Some(account) => QueryResult::History {
                        outgoing: self.lines(account.outgoing()),
                        incoming: self.lines(account.incoming()),
                    },
                }
            }
        }
    }

    fn lines(&self, ids: &[TransactionId]) -> Vec<TransactionLine<'_>> {
        ids.iter()
            .map(|id| {
                let transaction = self.transaction(*id);
                TransactionLine {
                    transaction,
                    from: self.account(transaction.from).name(),
                    to: self.account(transaction.to).name(),
                }
            })
            .collect()
    }
}

impl fmt::Display for TransactionLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Date: {}           From: {}           To: {}           Amount: {}           Narrative: {}",
            self.transaction.date,
            self.from,
            self.to,
            self.transaction.amount,
            self.transaction.narrative
        )
    }
}

impl fmt::Display for QueryResult<'_> {
    /// Renders the result one output line per row, each terminated by a
    /// newline.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryResult::Balances(balances) => {
                for (name, balance) in balances {
                    writeln!(f, "{}: {}", name, balance)?;
                }
                Ok(())
            }
            QueryResult::AccountNotFound(_) => writeln!(f, "That account doesn't exist"),
            QueryResult::History { outgoing, incoming } => {
                writeln!(f, "===============Outgoing transactions===============")?;
                for line in outgoing {
                    writeln!(f, "{}", line)?;
                }
                writeln!(f)?;
                writeln!(f, "===============Incoming Transactions===============")?;
                for line in incoming {
                    writeln!(f, "{}", line)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::CanonicalRecord;

    fn ledger(rows: &[(&str, &str, &str, &str, &str)]) -> Ledger {
        let records: Vec<CanonicalRecord> = rows
            .iter()
            .map(|(date, from, to, narrative, amount)| CanonicalRecord {
                date: date.to_string(),
                from: from.to_string(),
                to: to.to_string(),
                narrative: narrative.to_string(),
                amount: amount.to_string(),
            })
            .collect();
        Ledger::build(&records).0
    }

    #[test]
    fn should_select_all_only_on_exact_match() {
        assert_eq!(Query::from_selector("All"), Query::All);
        assert_eq!(
            Query::from_selector("all"),
            Query::Account(String::from("all"))
        );
        assert_eq!(
            Query::from_selector("Jon A"),
            Query::Account(String::from("Jon A"))
        );
    }

    #[test]
    fn should_list_every_balance() {
        let ledger = ledger(&[("1/2/2015", "A", "B", "x", "100")]);
        let output = ledger.answer(&Query::All).to_string();

        let mut lines: Vec<&str> = output.lines().collect();
        lines.sort_unstable();
        assert_eq!(lines, vec!["A: -100", "B: 100"]);
    }

    #[test]
    fn should_report_unknown_account_only() {
        let ledger = ledger(&[("1/2/2015", "A", "B", "x", "100")]);
        let result = ledger.answer(&Query::Account(String::from("Nobody")));

        assert_eq!(result, QueryResult::AccountNotFound(String::from("Nobody")));
        assert_eq!(result.to_string(), "That account doesn't exist\n");
    }

    #[test]
    fn should_list_outgoing_before_incoming() {
        let ledger = ledger(&[
            ("1/1/2014", "Jon A", "Sarah T", "Pokemon Training", "7"),
            ("2/1/2014", "Sarah T", "Jon A", "Lunch", "3"),
            ("3/1/2014", "Jon A", "Tim L", "Coffee", "1"),
        ]);

        let output = ledger
            .answer(&Query::from_selector("Jon A"))
            .to_string();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(
            lines,
            vec![
                "===============Outgoing transactions===============",
                "Date: 1/1/2014           From: Jon A           To: Sarah T           Amount: 7           Narrative: Pokemon Training",
                "Date: 3/1/2014           From: Jon A           To: Tim L           Amount: 1           Narrative: Coffee",
                "",
                "===============Incoming Transactions===============",
                "Date: 2/1/2014           From: Sarah T           To: Jon A           Amount: 3           Narrative: Lunch",
            ]
        );
    }

    #[test]
    fn should_show_invalid_dates_in_history() {
        let ledger = ledger(&[("someday", "A", "B", "x", "5")]);

        match ledger.answer(&Query::from_selector("B")) {
            QueryResult::History { outgoing, incoming } => {
                assert!(outgoing.is_empty());
                assert_eq!(incoming.len(), 1);
                assert!(incoming[0].to_string().starts_with("Date: Invalid DateTime "));
            }
            other => panic!("expected a history, got {:?}", other),
        }
    }
}
