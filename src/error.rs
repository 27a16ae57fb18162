// BSL 1.0 License

use std::{error::Error as StdError, fmt};

/// An error that occurred while building or using a clip region.
pub struct Error {
    kind: Kind,
}

enum Kind {
    OutOfMemory { nodes: usize },
    Poisoned,
    Display(String),
}

impl Error {
    /// Create a new error from an error-like type.
    pub fn from_display(f: impl fmt::Display) -> Self {
        Error {
            kind: Kind::Display(f.to_string()),
        }
    }

    /// Create a new out-of-memory error, raised while allocating `nodes` band nodes.
    pub fn out_of_memory(nodes: usize) -> Self {
        Error {
            kind: Kind::OutOfMemory { nodes },
        }
    }

    /// Create an error for an accumulator that already failed.
    pub(crate) fn poisoned() -> Self {
        Error {
            kind: Kind::Poisoned,
        }
    }

    /// Is this error an allocation failure?
    pub fn is_out_of_memory(&self) -> bool {
        matches!(self.kind, Kind::OutOfMemory { .. })
    }

    /// Is this error caused by reusing an accumulator that already failed?
    pub fn is_poisoned(&self) -> bool {
        matches!(self.kind, Kind::Poisoned)
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct KindFmt<'a>(&'a Kind);

        impl<'a> fmt::Debug for KindFmt<'a> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self.0 {
                    Kind::OutOfMemory { nodes } => {
                        f.debug_struct("OutOfMemory").field("nodes", nodes).finish()
                    }
                    Kind::Poisoned => f.write_str("Poisoned"),
                    Kind::Display(s) => write!(f, r#""{}""#, s),
                }
            }
        }

        f.debug_tuple("Error")
            .field(&KindFmt(&self.kind))
            .finish()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            Kind::OutOfMemory { nodes } => {
                write!(f, "Ran out of memory while allocating {} band nodes", nodes)
            }
            Kind::Poisoned => {
                f.write_str("The accumulator failed earlier and must be discarded")
            }
            Kind::Display(ref msg) => f.write_str(msg),
        }
    }
}

impl StdError for Error {}

pub type Result<T = ()> = core::result::Result<T, Error>;
