//! Data models for chat posts and their meeting metadata

mod post;

pub use post::*;
