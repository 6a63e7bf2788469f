use std::fmt;
use tracing::warn;

/// A defect found in a single input record. Each one is recovered locally
/// and the batch carries on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Warning {
    /// The date could not be read in any supported format.
    InvalidDate { line: usize },

    /// The amount was not an integer and has been replaced with 0.
    InvalidAmount {
        from: String,
        to: String,
        line: usize,
    },
}

impl Warning {
    /// The reported line of the offending record, counting the header row.
    pub fn line(&self) -> usize {
        match self {
            Warning::InvalidDate { line } | Warning::InvalidAmount { line, .. } => *line,
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::InvalidDate { line } => write!(f, "Invalid date at line: {}", line),
            Warning::InvalidAmount { from, to, line } => write!(
                f,
                "Invalid amount from {} to {} at line: {}",
                from, to, line
            ),
        }
    }
}

/// Collects every warning raised while building a ledger so callers can
/// inspect them, and forwards each one to the logger as it arrives.
#[derive(Debug, Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    pub fn report(&mut self, warning: Warning) {
        warn!("{}", warning);
        self.warnings.push(warning);
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.warnings.len()
    }
}
