pub mod editing;
pub mod models;

// Re-export key types for easier usage
pub use editing::{affordance::*, document::*, keyboard::*, tables::*};
pub use models::*;
