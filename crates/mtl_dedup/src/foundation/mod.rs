//! Foundation utilities shared by every layer of the crate

pub mod logging;
pub mod math;
pub mod text;
