//! Hotel dashboard documents: rooms, staff users, bookings and contact messages.
//!
//! Each type is a flat record implementing [`miranda_core::Entity`]; field names
//! serialize in camelCase to match the dashboard's JSON.

pub mod booking;
pub mod contact;
pub mod room;
pub mod user;

pub use booking::{Booking, BookingStatus};
pub use contact::{ContactMessage, Customer};
pub use room::{Room, RoomStatus};
pub use user::{User, UserStatus};
