#![forbid(unsafe_code)]

pub mod catalog;
pub mod error;
pub mod games;
pub mod model;
pub mod time;

pub use error::ContentError;
pub use time::Clock;
