use tokio::sync::RwLock;
use tracing::{debug, info};
use crate::models::booking::{Booking, BookingDraft};
use crate::models::place::{seed_places, Place};

/// Process-wide listing and booking collections. Built once at start and
/// handed to the controllers behind an `Arc`; contents reset on restart.
pub struct MemoryStore {
    places: RwLock<Vec<Place>>,
    bookings: RwLock<Vec<Booking>>,
}

impl MemoryStore {
    pub fn new(places: Vec<Place>) -> Self {
        Self {
            places: RwLock::new(places),
            bookings: RwLock::new(Vec::new()),
        }
    }

    pub fn seeded() -> Self {
        Self::new(seed_places())
    }

    pub async fn all_places(&self) -> Vec<Place> {
        self.places.read().await.clone()
    }

    pub async fn find_place(&self, place_id: i64) -> Option<Place> {
        self.places
            .read()
            .await
            .iter()
            .find(|place| place.id == place_id)
            .cloned()
    }

    pub async fn add_booking(
        &self,
        draft: BookingDraft,
        user_id: u64,
    ) -> Booking {
        let booking = Booking {
            details: draft,
            user: user_id,
        };

        let mut bookings = self.bookings.write().await;
        bookings.push(booking.clone());
        info!("Stored booking for user: {}, total bookings: {}", user_id, bookings.len());

        booking
    }

    pub async fn bookings_for_user(
        &self,
        user_id: u64,
    ) -> Vec<Booking> {
        let bookings: Vec<Booking> = self.bookings
            .read()
            .await
            .iter()
            .filter(|booking| booking.user == user_id)
            .cloned()
            .collect();
        debug!("Found {} bookings for user: {}", bookings.len(), user_id);

        bookings
    }
}
