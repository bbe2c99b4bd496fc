//! Shared types and text helpers used across all superbot crates.

pub mod message;
pub mod text;

pub use message::{Attachment, Message};
