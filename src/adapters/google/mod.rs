pub mod auth;
pub mod client;

pub use auth::{ServiceAccountAuth, ServiceAccountKey};
pub use client::{GoogleEndpoints, GoogleSheetsClient};
