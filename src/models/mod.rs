// src/models/mod.rs
// DOCUMENTATION: Models module organization
// PURPOSE: Re-export model components

pub mod booking;
pub mod category;
pub mod coupon;
pub mod destination;
pub mod hotel;
pub mod media;
pub mod package;
pub mod translation;
pub mod user;

pub use booking::*;
pub use category::*;
pub use coupon::*;
pub use destination::*;
pub use hotel::*;
pub use media::*;
pub use package::*;
pub use translation::*;
pub use user::*;
