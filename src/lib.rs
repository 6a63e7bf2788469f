pub mod args;
pub mod config;
pub mod date;
pub mod diagnostics;
pub mod errors;
pub mod input;
pub mod ledger;
pub mod logging;
pub mod query;
pub mod record;
pub mod shell;
