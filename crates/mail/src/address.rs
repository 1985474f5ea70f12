use std::fmt;

use serde::{Deserialize, Serialize};

/// A named mailbox, as exchanged with the relay endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub name: String,
    pub address: String,
}

impl Address {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.address.trim().is_empty()
    }
}

/// `"Name" <address>`, or the bare address when there is no name.
impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            write!(f, "{}", self.address)
        } else {
            write!(f, "\"{}\" <{}>", self.name, self.address)
        }
    }
}
