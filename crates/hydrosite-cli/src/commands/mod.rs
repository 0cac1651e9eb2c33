pub mod config;
pub mod optimal;
pub mod profile;
pub mod util;
