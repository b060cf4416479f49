use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use miranda_core::{DocumentId, DomainResult, Entity, validate};

/// Staff account status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserStatus {
    Active,
    Inactive,
}

/// A hotel staff member shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub id: DocumentId,
    pub name: String,
    pub foto: String,
    pub start_date: DateTime<Utc>,
    pub description: String,
    pub email: String,
    pub contact: String,
    pub status: UserStatus,
}

impl Entity for User {
    const COLLECTION: &'static str = "users";
    const KIND: &'static str = "User";

    fn id(&self) -> DocumentId {
        self.id
    }

    fn set_id(&mut self, id: DocumentId) {
        self.id = id;
    }

    fn validate(&self) -> DomainResult<()> {
        validate::non_blank("name", &self.name)?;
        validate::non_blank("foto", &self.foto)?;
        validate::non_blank("description", &self.description)?;
        validate::email("email", &self.email)?;
        validate::non_blank("contact", &self.contact)?;
        Ok(())
    }
}
