//! Names for the operations a store exposes, used in errors and interceptor hooks.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the store's lifecycle operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    Attach,
    Flush,
    Find,
    Detach,
    Merge,
    Remove,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Attach => "attach",
            Operation::Flush => "flush",
            Operation::Find => "find",
            Operation::Detach => "detach",
            Operation::Merge => "merge",
            Operation::Remove => "remove",
        };
        f.write_str(name)
    }
}
