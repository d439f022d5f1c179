pub mod config;
pub mod provenance;
pub mod time;

pub use config::*;
pub use provenance::*;
pub use time::*;
