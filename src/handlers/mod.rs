// src/handlers/mod.rs
// DOCUMENTATION: Handlers module organization
// PURPOSE: Re-export handler components

pub mod admin;
pub mod auth;
pub mod bookings;
pub mod categories;
pub mod coupons;
pub mod destinations;
pub mod health;
pub mod hotels;
pub mod media;
pub mod packages;
pub mod translations;
pub mod users;

pub use admin::config as admin_config;
pub use auth::config as auth_config;
pub use bookings::config as bookings_config;
pub use categories::config as categories_config;
pub use coupons::config as coupons_config;
pub use destinations::config as destinations_config;
pub use health::config as health_config;
pub use hotels::config as hotels_config;
pub use media::config as media_config;
pub use packages::config as packages_config;
pub use translations::config as translations_config;
pub use users::config as users_config;
