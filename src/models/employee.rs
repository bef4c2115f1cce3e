use serde::{Deserialize, Serialize};

/// Directory entry for a person who carries a scannable identity code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub employee_id: String,
    pub name: String,
    pub role: String,
}

impl Employee {
    pub fn new(employee_id: impl Into<String>, name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            employee_id: employee_id.into(),
            name: name.into(),
            role: role.into(),
        }
    }
}
