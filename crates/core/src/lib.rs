#![forbid(unsafe_code)]

pub mod chart;
pub mod model;
pub mod session;
pub mod time;

pub use time::Clock;
