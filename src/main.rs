use ledger_explorer::args::Args;
use ledger_explorer::config::Config;
use ledger_explorer::input::load_records;
use ledger_explorer::ledger::Ledger;
use ledger_explorer::logging::init_tracing;
use ledger_explorer::shell;
use std::process;
use tracing::{info, trace};

fn main() {
    let config = match Config::try_from(Args::parse()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("invalid arguments: {}", err);
            process::exit(2);
        }
    };

    if let Err(err) = init_tracing(config.log_file.as_deref()) {
        eprintln!("failed to open log file: {}", err);
        process::exit(1);
    }
    trace!("Start");

    let raw = match load_records(&config.input, config.format) {
        Ok(raw) => raw,
        Err(err) => {
            eprintln!("failed to process input file: {}", err);
            process::exit(1);
        }
    };

    let records = config.synonyms.normalize_batch(raw);
    let (ledger, diagnostics) = Ledger::build(&records);
    info!(
        "loaded {} transactions with {} warnings",
        ledger.transactions().len(),
        diagnostics.len()
    );

    if let Err(err) = shell::run(&ledger) {
        eprintln!("command loop failed: {}", err);
        process::exit(1);
    }
}
