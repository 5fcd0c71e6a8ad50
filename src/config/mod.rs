//! Configuration module

mod params;

pub use params::Params;
