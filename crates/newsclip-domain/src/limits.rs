//! Character limits applied across the pipeline

/// Hard cap on extracted page content, in characters
pub const CONTENT_MAX: usize = 5000;

/// Maximum length of the insight line shown to the user
pub const INSIGHT_MAX: usize = 150;

/// Maximum length of a user comment attached to a delivery
pub const COMMENT_MAX: usize = 300;
