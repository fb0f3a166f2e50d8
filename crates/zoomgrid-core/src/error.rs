#![forbid(unsafe_code)]

//! Error types.
//!
//! Nothing here is fatal: a grid that fails to set up stays inert and an
//! extension that fails its preconditions performs no mutation. Callers
//! decide whether to surface the error.

use core::fmt;

/// Grid construction failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// The container has no children with the configured tag.
    NoCells,
    /// Resolved dimensions cannot form a grid.
    DegenerateGrid { columns: usize, rows: usize },
    /// The configuration could not be parsed.
    InvalidConfig(String),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoCells => write!(f, "container has no cell children"),
            Self::DegenerateGrid { columns, rows } => {
                write!(f, "degenerate grid: {columns} columns x {rows} rows")
            }
            Self::InvalidConfig(msg) => write!(f, "invalid configuration: {msg}"),
        }
    }
}

impl std::error::Error for GridError {}

/// Extension registration failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtensionError {
    /// `extension` needs `requires` to be registered first.
    Requires {
        extension: &'static str,
        requires: &'static str,
    },
    /// An extension of the same name is already registered.
    AlreadyRegistered(&'static str),
    /// A pattern list was empty.
    EmptyPatterns,
    /// A cell has no inner scroll division with the requested class.
    MissingScrollDivision { cell: usize },
    /// The grid's focus trigger does not allow this extension.
    WrongTrigger,
}

impl fmt::Display for ExtensionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Requires {
                extension,
                requires,
            } => write!(f, "{extension} requires {requires}"),
            Self::AlreadyRegistered(name) => write!(f, "{name} is already registered"),
            Self::EmptyPatterns => write!(f, "pattern list is empty"),
            Self::MissingScrollDivision { cell } => {
                write!(f, "cell {cell} has no scroll division")
            }
            Self::WrongTrigger => write!(f, "not available for the current focus trigger"),
        }
    }
}

impl std::error::Error for ExtensionError {}
