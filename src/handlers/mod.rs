pub mod auth;
pub mod category;
pub mod channel;
pub mod extract;
pub mod footer;
pub mod health;
pub mod slider;
pub mod upload;
