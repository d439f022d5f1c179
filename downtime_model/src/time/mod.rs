pub mod mjd;
pub mod night;

pub use mjd::parse_time_str;
pub use night::{NightClock, DEFAULT_START_OF_NIGHT_OFFSET};
