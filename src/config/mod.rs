//! Configuration and path management

pub mod paths;
pub mod registry;

pub use paths::LockboxPaths;
pub use registry::Registry;
