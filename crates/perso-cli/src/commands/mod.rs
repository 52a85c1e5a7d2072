//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `normalize` - Label inspection
//! - `pending` - Shared utilities (config and pending-file loading)
//! - `review` - Review commands (groups, show, sort-options)

pub mod normalize;
pub mod pending;
pub mod review;

// Re-export command functions for main.rs
pub use normalize::*;
pub use pending::*;
pub use review::*;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
