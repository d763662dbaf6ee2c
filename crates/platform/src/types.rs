//! This module contains the local types for the `talus-platform` crate.

/// The native machine word: the full register width the platform uses for
/// system call numbers, arguments, and results.
///
/// Results must keep this width. A narrower or signed result type silently
/// truncates legitimate 64-bit values such as mapped addresses, so it is a
/// correctness defect rather than a style choice.
pub type Word = usize;
