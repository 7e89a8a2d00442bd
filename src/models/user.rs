use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The identity a request is attributed to.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct UserIdentity {
    pub id: u64,
    pub name: String,
    pub email: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct RegisteredUser {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<Value>,
    pub password: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct LoggedInUser {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<Value>,
}

/// Text form of a loosely typed credential: strings as-is, other JSON
/// values in their serialized form, absent values as empty.
pub fn credential_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}
