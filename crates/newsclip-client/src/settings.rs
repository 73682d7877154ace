//! User settings and the daily usage quota.
//!
//! Settings are read and written as one opaque JSON record through the
//! key-value port. The store is an explicit injected container; views that
//! need settings receive a `SettingsStore`, never a global.

use crate::error::ClientError;
use crate::storage::KeyValueStore;
use chrono::{DateTime, Days, Utc};
use newsclip_domain::{Persona, SummaryMode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Storage key for the settings record
pub const SETTINGS_KEY: &str = "newsclip_user_settings";

/// Default daily summarization quota
pub const DEFAULT_DAILY_LIMIT: u32 = 5;

/// Slack-related settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlackSettings {
    /// Webhook URL used by the quick-send path
    pub webhook_url: String,

    /// Display name for posted messages
    pub username: String,

    /// Emoji shortcode for the poster avatar
    pub icon_emoji: String,
}

impl Default for SlackSettings {
    fn default() -> Self {
        Self {
            webhook_url: String::new(),
            username: "Newsclip".to_string(),
            icon_emoji: ":newspaper:".to_string(),
        }
    }
}

/// Summarization settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummarySettings {
    /// Requested output mode
    pub mode: SummaryMode,

    /// Preferred summary length (characters)
    pub max_length: usize,

    /// Selected persona, when the persona path is used
    pub persona: Option<Persona>,
}

impl Default for SummarySettings {
    fn default() -> Self {
        Self {
            mode: SummaryMode::Summary,
            max_length: 150,
            persona: None,
        }
    }
}

/// The complete user settings record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSettings {
    /// Slack configuration
    pub slack: SlackSettings,

    /// Summary configuration
    pub summary: SummarySettings,

    /// Daily summarization quota
    pub daily_limit: u32,

    /// Summarizations used since the last reset
    pub usage_count: u32,

    /// Instant of the last quota reset (RFC 3339)
    pub last_reset_date: String,

    /// Send to Slack automatically after summarizing
    pub auto_send: bool,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            slack: SlackSettings::default(),
            summary: SummarySettings::default(),
            daily_limit: DEFAULT_DAILY_LIMIT,
            usage_count: 0,
            last_reset_date: Utc::now().to_rfc3339(),
            auto_send: false,
        }
    }
}

/// Quota snapshot returned by [`SettingsStore::check_usage`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageStatus {
    /// Daily quota
    pub daily_limit: u32,

    /// Used so far today
    pub used: u32,

    /// Remaining today (never negative)
    pub remaining: u32,

    /// Next reset instant (RFC 3339, midnight UTC)
    pub resets_at: String,
}

/// Injected settings container over the key-value port.
pub struct SettingsStore {
    store: Arc<dyn KeyValueStore>,
}

impl SettingsStore {
    /// Create a settings store over the given backend
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Load the settings record, falling back to defaults when absent or
    /// undecodable
    pub async fn load(&self) -> Result<UserSettings, ClientError> {
        match self.store.get(SETTINGS_KEY).await? {
            Some(raw) => Ok(serde_json::from_str(&raw).unwrap_or_default()),
            None => Ok(UserSettings::default()),
        }
    }

    /// Persist the settings record
    pub async fn save(&self, settings: &UserSettings) -> Result<(), ClientError> {
        let raw =
            serde_json::to_string(settings).map_err(|e| ClientError::Storage(e.to_string()))?;
        self.store.set(SETTINGS_KEY, &raw).await
    }

    /// Check the quota, resetting the counter when the day has rolled over.
    pub async fn check_usage(&self) -> Result<UsageStatus, ClientError> {
        let mut settings = self.load().await?;

        if !is_today(&settings.last_reset_date) {
            settings.usage_count = 0;
            settings.last_reset_date = Utc::now().to_rfc3339();
            self.save(&settings).await?;
        }

        let remaining = settings.daily_limit.saturating_sub(settings.usage_count);

        Ok(UsageStatus {
            daily_limit: settings.daily_limit,
            used: settings.usage_count,
            remaining,
            resets_at: next_reset_time(),
        })
    }

    /// Count one summarization against the quota.
    ///
    /// Read-then-increment, not atomic: two concurrent callers over the same
    /// backing store can both observe the same count. Accepted for the
    /// single-popup usage pattern.
    pub async fn increment_usage(&self) -> Result<(), ClientError> {
        let mut settings = self.load().await?;
        settings.usage_count += 1;
        self.save(&settings).await
    }
}

fn is_today(date: &str) -> bool {
    DateTime::parse_from_rfc3339(date)
        .map(|d| d.with_timezone(&Utc).date_naive() == Utc::now().date_naive())
        .unwrap_or(false)
}

fn next_reset_time() -> String {
    let tomorrow = Utc::now().date_naive() + Days::new(1);
    let midnight = tomorrow.and_hms_opt(0, 0, 0).unwrap();
    DateTime::<Utc>::from_naive_utc_and_offset(midnight, Utc).to_rfc3339()
}
