pub mod loader;
pub mod manager;
pub mod manifest;
pub mod registry;
