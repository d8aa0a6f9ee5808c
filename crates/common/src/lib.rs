//! Shared building blocks for the films library workspace.

pub mod types;
pub mod env;
pub mod utils {
    pub mod logging;
}
