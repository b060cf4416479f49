use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use miranda_core::{DocumentId, DomainResult, Entity, validate};

/// Sender details of a contact message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// A message left through the hotel's public contact form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactMessage {
    #[serde(default)]
    pub id: DocumentId,
    pub date: DateTime<Utc>,
    pub customer: Customer,
    pub subject: String,
    pub comment: String,
    #[serde(default)]
    pub archived: bool,
}

impl Entity for ContactMessage {
    const COLLECTION: &'static str = "contact";
    const KIND: &'static str = "Contact message";

    fn id(&self) -> DocumentId {
        self.id
    }

    fn set_id(&mut self, id: DocumentId) {
        self.id = id;
    }

    fn validate(&self) -> DomainResult<()> {
        validate::non_blank("customer.name", &self.customer.name)?;
        validate::email("customer.email", &self.customer.email)?;
        validate::non_blank("subject", &self.subject)?;
        validate::non_blank("comment", &self.comment)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn archived_defaults_to_false() {
        let m: ContactMessage = serde_json::from_value(json!({
            "date": "2024-05-10T09:30:00Z",
            "customer": { "name": "Marta", "email": "marta@mail.com", "phone": "600111222" },
            "subject": "Late check-out",
            "comment": "Is late check-out possible on Sunday?"
        }))
        .unwrap();
        assert!(!m.archived);
        assert!(m.validate().is_ok());
    }

    #[test]
    fn blank_comment_is_rejected() {
        let m = ContactMessage {
            id: DocumentId::new(),
            date: Utc::now(),
            customer: Customer {
                name: "Marta".to_string(),
                email: "marta@mail.com".to_string(),
                phone: String::new(),
            },
            subject: "Hello".to_string(),
            comment: "   ".to_string(),
            archived: false,
        };
        assert!(m.validate().is_err());
    }
}
