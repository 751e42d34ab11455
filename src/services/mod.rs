//! Request-independent business logic. Handlers stay thin and call into here.

pub mod category;
pub mod credentials;
pub mod footer;
pub mod image_resource;
