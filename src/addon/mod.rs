pub mod example;
pub mod manifest;
pub mod registry;

pub use registry::AddonRegistry;
