pub mod identity;
pub mod uploads;
