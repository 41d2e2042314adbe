//! Release history: which tags are releases and how they chain

pub mod index;
pub mod resolver;

pub use index::ReleaseTagIndex;
pub use resolver::previous_release;
