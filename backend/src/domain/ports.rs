//! Domain ports defining the edges of the hexagon.
//!
//! Inbound adapters depend on these traits rather than on concrete services,
//! so handlers stay testable with substitute implementations.

mod user_directory;

pub use user_directory::UserDirectory;
