use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CalcError {
    /// Input the calculators cannot give a meaningful answer for.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CalcError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        CalcError::InvalidInput(msg.into())
    }

    pub fn overflow(what: &str) -> Self {
        CalcError::InvalidInput(format!("{} overflows", what))
    }

    /// Tags the message with the 1-based sheet row it came from.
    pub fn at_row(self, row: usize) -> Self {
        match self {
            CalcError::InvalidInput(msg) => {
                CalcError::InvalidInput(format!("{} at row {}", msg, row))
            }
        }
    }
}
