// src/db/mod.rs
// DOCUMENTATION: Database module organization
// PURPOSE: Re-export database components

pub mod booking_repository;
pub mod category_repository;
pub mod coupon_repository;
pub mod destination_repository;
pub mod hotel_repository;
pub mod media_repository;
pub mod package_repository;
pub mod translation_repository;
pub mod user_repository;

pub use booking_repository::*;
pub use category_repository::*;
pub use coupon_repository::*;
pub use destination_repository::*;
pub use hotel_repository::*;
pub use media_repository::*;
pub use package_repository::*;
pub use translation_repository::*;
pub use user_repository::*;
