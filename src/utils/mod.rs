//! Utility modules.

/// Command line front end.
pub mod cli;
