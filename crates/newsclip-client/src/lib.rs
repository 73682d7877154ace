//! Newsclip Client Layer
//!
//! The extension-side half of the system: tagged message envelopes, the
//! extraction orchestrator, user settings with a daily usage quota, auth
//! session management, and an HTTP client for the server API.
//!
//! Platform specifics stay behind two narrow ports - a key-value persistence
//! store and an identity-token acquisition provider - with concrete adapters
//! injected per target. Nothing in here reaches for an ambient singleton.

#![warn(missing_docs)]

pub mod api;
pub mod auth;
pub mod error;
pub mod messages;
pub mod orchestrator;
pub mod settings;
pub mod storage;

pub use api::{ApiClient, SendSlackArgs, SummarizeData};
pub use auth::{AuthManager, AuthSession, IdentityTokenProvider, StaticTokenProvider};
pub use error::ClientError;
pub use messages::{AuthOutcome, AuthRequest, ExtractOutcome, ExtractRequest};
pub use orchestrator::ExtractionOrchestrator;
pub use settings::{SettingsStore, SlackSettings, SummarySettings, UsageStatus, UserSettings};
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore};
