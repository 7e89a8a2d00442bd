use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A rentable listing as served by the listing endpoints.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Place {
    pub id: i64,
    pub title: String,
    pub location: String,
    pub price: f64,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub amenities: Vec<String>,
    pub img: String,
}

/// Body of `POST /api/places`. Any JSON is accepted per field and echoed
/// back as-is, photos arrive as `addedPhotos` and leave as `photos`.
#[derive(Clone, Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct PlaceDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Value>,
    #[serde(
        rename(deserialize = "addedPhotos", serialize = "photos"),
        skip_serializing_if = "Option::is_none"
    )]
    pub photos: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub perks: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_info: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_in: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_out: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_guests: Option<Value>,
}

pub fn seed_places() -> Vec<Place> {
    vec![
        Place {
            id: 1,
            title: "Beachfront Villa".to_string(),
            location: "Miami".to_string(),
            price: 300.0,
            bedrooms: 3,
            bathrooms: 2,
            amenities: vec!["WiFi".to_string(), "Pool".to_string(), "Parking".to_string()],
            img: "https://dynamic-media-cdn.tripadvisor.com/media/photo-o/09/45/ed/fe/the-residency-hotel.jpg?w=1200&h=-1&s=1".to_string(),
        },
        Place {
            id: 2,
            title: "Mountain Cabin".to_string(),
            location: "Colorado".to_string(),
            price: 250.0,
            bedrooms: 2,
            bathrooms: 1,
            amenities: vec!["WiFi".to_string(), "Hot Tub".to_string()],
            img: "https://pix10.agoda.net/hotelImages/788/788760/788760_15080519470033720939.jpg?ca=5&ce=1&s=414x232".to_string(),
        },
    ]
}
