//! Exhibition lookup for chat replies.

pub mod index;
pub mod reply;
pub mod webhook;

pub use index::ExhibitionIndex;
pub use reply::{format_reply, NO_RESULTS};
