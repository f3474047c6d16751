pub mod config;
pub mod log;

pub use log::HostLog;
