use serde::{Deserialize, Serialize};
use std::fmt::Display;

pub trait Entity {
    fn id(&self) -> &ID;
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

/// Identifier of a document owned by the registration platform.
///
/// The platform generates the ids, so they are opaque strings here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ID(String);

impl ID {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn inner(self) -> String {
        self.0
    }
}

impl From<String> for ID {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ID {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl Display for ID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
