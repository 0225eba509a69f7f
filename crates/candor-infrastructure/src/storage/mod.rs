//! Storage primitives for the TOML-backed repositories.

pub mod atomic_toml;

pub use atomic_toml::AtomicTomlFile;
