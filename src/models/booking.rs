use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /api/bookings`. Nothing is validated, numbers are kept as
/// whatever JSON the client sent.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookingDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_in: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_out: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_guests: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Value>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Booking {
    #[serde(flatten)]
    pub details: BookingDraft,
    pub user: u64,
}
