pub mod diff;
pub mod message;
pub mod prompt;
pub mod summary;
