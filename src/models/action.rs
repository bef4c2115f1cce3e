use serde::Serialize;
use std::fmt;

/// Clock-in (`entrada`) or clock-out (`salida`).
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Entrada,
    Salida,
}

impl Action {
    /// Parse the wire token. Matching is exact: scanners send lowercase tokens
    /// and anything else (including their `not_defined` placeholder) is rejected.
    pub fn from_token(s: &str) -> Option<Self> {
        match s {
            "entrada" => Some(Self::Entrada),
            "salida" => Some(Self::Salida),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Entrada => "entrada",
            Action::Salida => "salida",
        }
    }

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        self.as_str()
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        Self::from_token(s)
    }

    pub fn is_entrada(&self) -> bool {
        matches!(self, Action::Entrada)
    }

    pub fn is_salida(&self) -> bool {
        matches!(self, Action::Salida)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
