pub mod api_error;
pub mod cookies;
pub mod handler_404;
