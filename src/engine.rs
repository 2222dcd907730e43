//! Rewrite engine module
//!
//! This module contains the rewriting logic: anchored pattern matching at a
//! cursor position and the left-to-right scan that applies an ordered rule
//! set to source text.

pub mod matcher;
pub mod rewrite;

pub use matcher::{match_at, Match, MatchCaptures};
pub use rewrite::{apply, apply_with, ApplyError, RewriteOptions, DEFAULT_MAX_GROWTH};
