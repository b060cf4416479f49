use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use miranda_core::{DocumentId, DomainError, DomainResult, Entity, validate};

/// Booking lifecycle as shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingStatus {
    #[serde(rename = "Check In")]
    CheckIn,
    #[serde(rename = "Check Out")]
    CheckOut,
    #[serde(rename = "In Progress")]
    InProgress,
}

/// A guest reservation for a room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(default)]
    pub id: DocumentId,
    pub guest: String,
    pub order_date: DateTime<Utc>,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    #[serde(default)]
    pub special_request: String,
    pub room_type: String,
    pub room_number: String,
    pub status: BookingStatus,
}

impl Entity for Booking {
    const COLLECTION: &'static str = "bookings";
    const KIND: &'static str = "Booking";

    fn id(&self) -> DocumentId {
        self.id
    }

    fn set_id(&mut self, id: DocumentId) {
        self.id = id;
    }

    fn validate(&self) -> DomainResult<()> {
        validate::non_blank("guest", &self.guest)?;
        validate::non_blank("roomType", &self.room_type)?;
        validate::non_blank("roomNumber", &self.room_number)?;
        if self.check_out < self.check_in {
            return Err(DomainError::validation("checkOut must not be before checkIn"));
        }
        Ok(())
    }
}
