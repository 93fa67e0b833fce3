pub mod adapter;
pub mod clock;
pub mod error;
pub mod types;

// Re-export the shared vocabulary (not engine-specific)
pub use adapter::*;
pub use clock::*;
pub use error::*;
pub use types::*;
