pub mod analysis;
pub mod competitor;
pub mod error;
pub mod health;
pub mod openapi;
pub mod template;
