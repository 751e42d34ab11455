//! Admin backend for the CTV media-listing site.
//!
//! REST API over sliders, channels, categories, footer links and user
//! credentials. Slider and channel images live in an object store (local disk
//! or a remote image host) kept in step with the database records.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod storage;
pub mod utils;

pub use error::{AppError, AppResult};
