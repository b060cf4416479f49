//! Handles injected into every handler: one typed repository per collection
//! plus the login dependencies. Built once in `main` (or a test) from the
//! store handle; there is no global connection.

use std::sync::Arc;

use miranda_auth::{AdminCredentials, JwtIssuer};
use miranda_hotel::{Booking, ContactMessage, Room, User};
use miranda_infra::{DocumentStore, Repository};

/// Subject claim carried by tokens minted for the dashboard operator.
pub const ADMIN_SUBJECT: &str = "admin";

pub struct AppServices {
    pub rooms: Repository<Room>,
    pub users: Repository<User>,
    pub bookings: Repository<Booking>,
    pub contact: Repository<ContactMessage>,
    pub credentials: AdminCredentials,
    pub issuer: Arc<dyn JwtIssuer>,
}

impl AppServices {
    pub fn new(store: Arc<dyn DocumentStore>, credentials: AdminCredentials, issuer: Arc<dyn JwtIssuer>) -> Self {
        Self {
            rooms: Repository::new(Arc::clone(&store)),
            users: Repository::new(Arc::clone(&store)),
            bookings: Repository::new(Arc::clone(&store)),
            contact: Repository::new(store),
            credentials,
            issuer,
        }
    }
}
