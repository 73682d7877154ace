//! Newsclip Content Extraction
//!
//! Turns a captured page snapshot into readable plain text. Two pieces:
//!
//! - The classifier decides whether a page is eligible at all (URL scheme,
//!   document readiness, minimum visible text).
//! - The extractor selects the main content element (semantic selectors
//!   first, longest-text fallback second), strips noise during traversal,
//!   normalizes whitespace, and caps the result.
//!
//! Both operate on an immutable snapshot; nothing here mutates the parsed
//! document or performs I/O.

#![warn(missing_docs)]

pub mod classifier;
pub mod config;
pub mod extractor;
pub mod snapshot;
pub mod text;

pub use classifier::is_supported;
pub use config::ExtractorConfig;
pub use extractor::ContentExtractor;
pub use snapshot::{PageSnapshot, Readiness};
