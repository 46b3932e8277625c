use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainResult;
use crate::utils::text::require_non_blank;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    /// Hex color, e.g. `#00D9D9`.
    pub color: String,
}

impl Project {
    pub fn rename(&mut self, name: &str) -> DomainResult<()> {
        self.name = require_non_blank(name, "Please enter a project name")?.to_string();
        Ok(())
    }
}
