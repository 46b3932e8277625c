use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Role {
    Employee,
    Admin,
}

impl Role {
    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Employee => "Employee",
            Role::Admin => "HR/Admin",
        }
    }

    pub fn is_admin(&self) -> bool {
        *self == Role::Admin
    }
}
