pub mod competitor;
pub mod config;
pub mod report;

pub use competitor::*;
pub use config::{Config, ProbeConfig};
pub use report::*;
