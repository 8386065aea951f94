// src/services/mod.rs
// DOCUMENTATION: Services module organization
// PURPOSE: Re-export service components

pub mod auth;
pub mod booking_service;
pub mod cache;
pub mod hotel_service;
pub mod package_service;
pub mod pricing;
pub mod slug;
pub mod stats_service;
pub mod tbo_client;

pub use auth::*;
pub use booking_service::*;
pub use cache::*;
pub use hotel_service::*;
pub use package_service::*;
pub use pricing::*;
pub use stats_service::*;
pub use tbo_client::*;
