use serde::{Deserialize, Serialize};

use miranda_core::{DocumentId, DomainError, DomainResult, Entity, validate};

/// Room availability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoomStatus {
    Available,
    Booked,
}

/// A bookable hotel room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    #[serde(default)]
    pub id: DocumentId,
    pub photo: String,
    pub number: String,
    pub bed_type: String,
    pub amenities: Vec<String>,
    pub rate: f64,
    pub offer_price: f64,
    pub status: RoomStatus,
    pub room_floor: String,
}

impl Entity for Room {
    const COLLECTION: &'static str = "rooms";
    const KIND: &'static str = "Room";

    fn id(&self) -> DocumentId {
        self.id
    }

    fn set_id(&mut self, id: DocumentId) {
        self.id = id;
    }

    fn validate(&self) -> DomainResult<()> {
        validate::non_blank("photo", &self.photo)?;
        validate::non_blank("number", &self.number)?;
        validate::non_blank("bedType", &self.bed_type)?;
        validate::non_blank("roomFloor", &self.room_floor)?;
        validate::non_negative("rate", self.rate)?;
        validate::non_negative("offerPrice", self.offer_price)?;
        if self.amenities.iter().any(|a| a.trim().is_empty()) {
            return Err(DomainError::validation("amenities must not contain blank entries"));
        }
        Ok(())
    }
}
