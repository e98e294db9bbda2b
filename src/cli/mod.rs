//! # CLI Module
//!
//! User-facing commands of `playlist-years`. Each command coordinates the
//! lower layers and owns the console feedback:
//!
//! ```text
//! CLI Layer (analyze)
//!     ↓
//! Normalize / Chart
//!     ↓
//! Spotify Integration (fetch, auth)
//!     ↓
//! Network Layer (HTTP Requests)
//! ```
//!
//! ## Usage
//! ```bash
//! playlist-years                                   # analyze the configured playlist
//! playlist-years analyze --url <playlist-url>      # analyze another playlist
//! playlist-years analyze --output chart.png        # write the chart elsewhere
//! playlist-years completions zsh                   # shell completions
//! ```

mod analyze;

pub use analyze::analyze;
pub use analyze::collect_records;
