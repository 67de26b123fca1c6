use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of roles an employee can hold.
///
/// No other value is ever stored in the roster; free-text role input is
/// rejected by the validation schema before it reaches a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Developer,
    Designer,
    Manager,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Developer, Role::Designer, Role::Manager];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Developer => "Developer",
            Role::Designer => "Designer",
            Role::Manager => "Manager",
        }
    }

    /// Next role in selector order, wrapping around.
    pub fn next(self) -> Role {
        match self {
            Role::Developer => Role::Designer,
            Role::Designer => Role::Manager,
            Role::Manager => Role::Developer,
        }
    }

    /// Previous role in selector order, wrapping around.
    pub fn previous(self) -> Role {
        match self {
            Role::Developer => Role::Manager,
            Role::Designer => Role::Developer,
            Role::Manager => Role::Designer,
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::Developer
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Developer" => Ok(Role::Developer),
            "Designer" => Ok(Role::Designer),
            "Manager" => Ok(Role::Manager),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

/// One employee record in the roster.
///
/// Records are immutable after creation; the roster only ever appends.
/// `phone` is the single optional field and is stored exactly as entered,
/// including an empty string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub role: Role,
    #[serde(rename = "joiningDate")]
    pub joining_date: String,
}
