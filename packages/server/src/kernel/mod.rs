//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod test_dependencies;
pub mod traits;

pub use deps::{LineAdapter, ServerDeps};
pub use test_dependencies::{SentReply, TestMessenger};
pub use traits::*;
