//! Newsclip Storage Layer
//!
//! SQLite persistence for users, integrations, and scraps. Every read and
//! write on integrations and scraps is scoped by the owning `user_id`; a row
//! belonging to another user behaves exactly like a missing row.
//!
//! # Thread Safety
//!
//! SQLite connections are not thread-safe. Callers that share a store across
//! tasks wrap it in a mutex.

#![warn(missing_docs)]

use newsclip_domain::{Integration, Persona, Scrap, SubscriptionTier, User};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Stored data failed to decode
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Identity-provider profile used for login upserts
#[derive(Debug, Clone)]
pub struct IdentityProfile {
    /// External identity id
    pub google_id: String,

    /// Account email
    pub email: String,

    /// Display name
    pub name: String,

    /// Avatar URL
    pub profile_picture: Option<String>,
}

/// SQLite-backed store for all persisted records.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) a store at the given path.
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    fn initialize_schema(&self) -> Result<(), StoreError> {
        let schema = include_str!("schema.sql");
        self.conn.execute_batch(schema)?;
        Ok(())
    }

    fn now() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs()
    }

    // ---- users ----

    /// Look up the user by external identity id, refreshing the mutable
    /// profile fields on a hit; create the row with tier "free" on a miss.
    pub fn find_or_create_user(&self, profile: &IdentityProfile) -> Result<User, StoreError> {
        let now = Self::now();

        let existing: Option<String> = self
            .conn
            .query_row(
                "SELECT id FROM users WHERE google_id = ?1",
                params![&profile.google_id],
                |row| row.get(0),
            )
            .optional()?;

        let id = match existing {
            Some(id) => {
                self.conn.execute(
                    "UPDATE users SET name = ?1, profile_picture = ?2, last_login_at = ?3
                     WHERE id = ?4",
                    params![&profile.name, &profile.profile_picture, now as i64, &id],
                )?;
                id
            }
            None => {
                let id = Uuid::new_v4().to_string();
                self.conn.execute(
                    "INSERT INTO users (id, google_id, email, name, profile_picture,
                                        subscription_tier, created_at, last_login_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, 'free', ?6, ?6)",
                    params![
                        &id,
                        &profile.google_id,
                        &profile.email,
                        &profile.name,
                        &profile.profile_picture,
                        now as i64,
                    ],
                )?;
                id
            }
        };

        self.get_user(&id)?
            .ok_or_else(|| StoreError::InvalidData(format!("user {} vanished after upsert", id)))
    }

    /// Fetch a user by internal id
    pub fn get_user(&self, id: &str) -> Result<Option<User>, StoreError> {
        let user = self
            .conn
            .query_row(
                "SELECT id, google_id, email, name, profile_picture, subscription_tier,
                        created_at, last_login_at
                 FROM users WHERE id = ?1",
                params![id],
                map_user,
            )
            .optional()?;
        Ok(user)
    }

    // ---- integrations ----

    /// All integrations owned by the user, newest first
    pub fn list_integrations(&self, user_id: Uuid) -> Result<Vec<Integration>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, webhook_url, workspace_name, is_active, created_at
             FROM integrations WHERE user_id = ?1 ORDER BY created_at DESC, id",
        )?;
        let rows = stmt
            .query_map(params![user_id.to_string()], map_integration)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Persist a validated integration (test delivery already succeeded)
    pub fn create_integration(
        &self,
        user_id: Uuid,
        webhook_url: &str,
        workspace_name: &str,
    ) -> Result<Integration, StoreError> {
        let id = Uuid::new_v4();
        let now = Self::now();

        self.conn.execute(
            "INSERT INTO integrations (id, user_id, webhook_url, workspace_name, is_active, created_at)
             VALUES (?1, ?2, ?3, ?4, 1, ?5)",
            params![
                id.to_string(),
                user_id.to_string(),
                webhook_url,
                workspace_name,
                now as i64,
            ],
        )?;

        Ok(Integration {
            id,
            user_id,
            webhook_url: webhook_url.to_string(),
            workspace_name: workspace_name.to_string(),
            is_active: true,
            created_at: now,
        })
    }

    /// Toggle activation. Returns `None` when the row is missing or owned by
    /// someone else; the row is left unchanged in that case.
    pub fn set_integration_active(
        &self,
        id: Uuid,
        user_id: Uuid,
        is_active: bool,
    ) -> Result<Option<Integration>, StoreError> {
        let updated = self.conn.execute(
            "UPDATE integrations SET is_active = ?1 WHERE id = ?2 AND user_id = ?3",
            params![is_active, id.to_string(), user_id.to_string()],
        )?;

        if updated == 0 {
            return Ok(None);
        }
        self.get_integration(id, user_id)
    }

    /// Delete an owned integration. Returns `false` when nothing matched.
    pub fn delete_integration(&self, id: Uuid, user_id: Uuid) -> Result<bool, StoreError> {
        let deleted = self.conn.execute(
            "DELETE FROM integrations WHERE id = ?1 AND user_id = ?2",
            params![id.to_string(), user_id.to_string()],
        )?;
        Ok(deleted > 0)
    }

    /// Fetch an owned integration
    pub fn get_integration(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Integration>, StoreError> {
        let row = self
            .conn
            .query_row(
                "SELECT id, user_id, webhook_url, workspace_name, is_active, created_at
                 FROM integrations WHERE id = ?1 AND user_id = ?2",
                params![id.to_string(), user_id.to_string()],
                map_integration,
            )
            .optional()?;
        Ok(row)
    }

    /// Fetch an owned integration only if it is active
    pub fn get_active_integration(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Integration>, StoreError> {
        let row = self
            .conn
            .query_row(
                "SELECT id, user_id, webhook_url, workspace_name, is_active, created_at
                 FROM integrations WHERE id = ?1 AND user_id = ?2 AND is_active = 1",
                params![id.to_string(), user_id.to_string()],
                map_integration,
            )
            .optional()?;
        Ok(row)
    }

    // ---- scraps ----

    /// All scraps owned by the user, newest first
    pub fn list_scraps(&self, user_id: Uuid) -> Result<Vec<Scrap>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, url, title, summary, keywords, persona, insight,
                    user_comment, word_count, integration_id, created_at
             FROM scraps WHERE user_id = ?1 ORDER BY created_at DESC, id",
        )?;
        let rows = stmt
            .query_map(params![user_id.to_string()], map_scrap)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Persist one summarized page as a scrap
    #[allow(clippy::too_many_arguments)]
    pub fn create_scrap(
        &self,
        user_id: Uuid,
        url: &str,
        title: &str,
        summary: &str,
        keywords: &[String],
        persona: Persona,
        insight: &str,
        word_count: Option<i64>,
    ) -> Result<Scrap, StoreError> {
        let id = Uuid::new_v4();
        let now = Self::now();
        let keywords_json = serde_json::to_string(keywords)
            .map_err(|e| StoreError::InvalidData(e.to_string()))?;

        self.conn.execute(
            "INSERT INTO scraps (id, user_id, url, title, summary, keywords, persona,
                                 insight, user_comment, word_count, integration_id, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, NULL, ?9, NULL, ?10)",
            params![
                id.to_string(),
                user_id.to_string(),
                url,
                title,
                summary,
                keywords_json,
                persona.as_str(),
                insight,
                word_count,
                now as i64,
            ],
        )?;

        Ok(Scrap {
            id,
            user_id,
            url: url.to_string(),
            title: title.to_string(),
            summary: summary.to_string(),
            keywords: keywords.to_vec(),
            persona,
            insight: insight.to_string(),
            user_comment: None,
            word_count,
            integration_id: None,
            created_at: now,
        })
    }

    /// Fetch an owned scrap
    pub fn get_scrap(&self, id: Uuid, user_id: Uuid) -> Result<Option<Scrap>, StoreError> {
        let row = self
            .conn
            .query_row(
                "SELECT id, user_id, url, title, summary, keywords, persona, insight,
                        user_comment, word_count, integration_id, created_at
                 FROM scraps WHERE id = ?1 AND user_id = ?2",
                params![id.to_string(), user_id.to_string()],
                map_scrap,
            )
            .optional()?;
        Ok(row)
    }

    /// Record a completed delivery on an owned scrap
    pub fn record_scrap_delivery(
        &self,
        id: Uuid,
        user_id: Uuid,
        integration_id: Uuid,
        user_comment: Option<&str>,
    ) -> Result<(), StoreError> {
        self.conn.execute(
            "UPDATE scraps SET integration_id = ?1, user_comment = ?2
             WHERE id = ?3 AND user_id = ?4",
            params![
                integration_id.to_string(),
                user_comment,
                id.to_string(),
                user_id.to_string(),
            ],
        )?;
        Ok(())
    }
}

fn parse_uuid(value: String, column: usize) -> Result<Uuid, rusqlite::Error> {
    Uuid::parse_str(&value).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(
            column,
            rusqlite::types::Type::Text,
            Box::new(e),
        )
    })
}

fn map_user(row: &Row<'_>) -> rusqlite::Result<User> {
    let id = parse_uuid(row.get(0)?, 0)?;
    let tier_str: String = row.get(5)?;
    let subscription_tier = SubscriptionTier::parse(&tier_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            5,
            rusqlite::types::Type::Text,
            format!("unknown tier: {}", tier_str).into(),
        )
    })?;

    Ok(User {
        id,
        google_id: row.get(1)?,
        email: row.get(2)?,
        name: row.get(3)?,
        profile_picture: row.get(4)?,
        subscription_tier,
        created_at: row.get::<_, i64>(6)? as u64,
        last_login_at: row.get::<_, i64>(7)? as u64,
    })
}

fn map_integration(row: &Row<'_>) -> rusqlite::Result<Integration> {
    Ok(Integration {
        id: parse_uuid(row.get(0)?, 0)?,
        user_id: parse_uuid(row.get(1)?, 1)?,
        webhook_url: row.get(2)?,
        workspace_name: row.get(3)?,
        is_active: row.get(4)?,
        created_at: row.get::<_, i64>(5)? as u64,
    })
}

fn map_scrap(row: &Row<'_>) -> rusqlite::Result<Scrap> {
    let keywords_json: String = row.get(5)?;
    let keywords: Vec<String> = serde_json::from_str(&keywords_json).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(5, rusqlite::types::Type::Text, Box::new(e))
    })?;

    let persona_str: String = row.get(6)?;
    let persona = Persona::parse(&persona_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            6,
            rusqlite::types::Type::Text,
            format!("unknown persona: {}", persona_str).into(),
        )
    })?;

    let integration_id: Option<String> = row.get(10)?;
    let integration_id = match integration_id {
        Some(value) => Some(parse_uuid(value, 10)?),
        None => None,
    };

    Ok(Scrap {
        id: parse_uuid(row.get(0)?, 0)?,
        user_id: parse_uuid(row.get(1)?, 1)?,
        url: row.get(2)?,
        title: row.get(3)?,
        summary: row.get(4)?,
        keywords,
        persona,
        insight: row.get(7)?,
        user_comment: row.get(8)?,
        word_count: row.get(9)?,
        integration_id,
        created_at: row.get::<_, i64>(11)? as u64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> SqliteStore {
        SqliteStore::new(":memory:").unwrap()
    }

    fn profile(google_id: &str) -> IdentityProfile {
        IdentityProfile {
            google_id: google_id.to_string(),
            email: format!("{}@example.com", google_id),
            name: "Test User".to_string(),
            profile_picture: Some("https://example.com/avatar.png".to_string()),
        }
    }

    fn user(store: &SqliteStore, google_id: &str) -> User {
        store.find_or_create_user(&profile(google_id)).unwrap()
    }

    #[test]
    fn test_find_or_create_user_creates_then_reuses() {
        let store = store();

        let first = user(&store, "g-1");
        assert_eq!(first.subscription_tier, SubscriptionTier::Free);

        let mut updated = profile("g-1");
        updated.name = "Renamed".to_string();
        let second = store.find_or_create_user(&updated).unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.name, "Renamed");
    }

    #[test]
    fn test_identity_key_is_google_id_not_email() {
        let store = store();
        let a = user(&store, "g-1");

        let mut other = profile("g-2");
        other.email = format!("{}@example.com", "g-1");
        let b = store.find_or_create_user(&other).unwrap();

        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_integration_create_and_list_newest_first() {
        let store = store();
        let owner = user(&store, "g-1");

        let first = store
            .create_integration(owner.id, "https://hooks.slack.com/services/T0/B0/X", "First")
            .unwrap();
        let second = store
            .create_integration(owner.id, "https://hooks.slack.com/services/T0/B0/Y", "Second")
            .unwrap();

        let listed = store.list_integrations(owner.id).unwrap();
        assert_eq!(listed.len(), 2);
        assert!(listed.iter().any(|i| i.id == first.id));
        assert!(listed.iter().any(|i| i.id == second.id));
        assert!(listed[0].created_at >= listed[1].created_at);
    }

    #[test]
    fn test_integration_toggle_scoped_to_owner() {
        let store = store();
        let owner = user(&store, "g-1");
        let intruder = user(&store, "g-2");

        let integration = store
            .create_integration(owner.id, "https://hooks.slack.com/services/T0/B0/X", "WS")
            .unwrap();

        // Wrong owner: no update, row unchanged
        let result = store
            .set_integration_active(integration.id, intruder.id, false)
            .unwrap();
        assert!(result.is_none());
        let unchanged = store.get_integration(integration.id, owner.id).unwrap().unwrap();
        assert!(unchanged.is_active);

        // Right owner: toggled
        let toggled = store
            .set_integration_active(integration.id, owner.id, false)
            .unwrap()
            .unwrap();
        assert!(!toggled.is_active);
    }

    #[test]
    fn test_integration_delete_scoped_to_owner() {
        let store = store();
        let owner = user(&store, "g-1");
        let intruder = user(&store, "g-2");

        let integration = store
            .create_integration(owner.id, "https://hooks.slack.com/services/T0/B0/X", "WS")
            .unwrap();

        assert!(!store.delete_integration(integration.id, intruder.id).unwrap());
        assert!(store.get_integration(integration.id, owner.id).unwrap().is_some());

        assert!(store.delete_integration(integration.id, owner.id).unwrap());
        assert!(store.get_integration(integration.id, owner.id).unwrap().is_none());
    }

    #[test]
    fn test_inactive_integration_invisible_to_active_lookup() {
        let store = store();
        let owner = user(&store, "g-1");
        let integration = store
            .create_integration(owner.id, "https://hooks.slack.com/services/T0/B0/X", "WS")
            .unwrap();

        store
            .set_integration_active(integration.id, owner.id, false)
            .unwrap();

        assert!(store
            .get_active_integration(integration.id, owner.id)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_scrap_round_trip() {
        let store = store();
        let owner = user(&store, "g-1");

        let keywords = vec!["k1".to_string(), "k2".to_string()];
        let created = store
            .create_scrap(
                owner.id,
                "https://example.com/post",
                "Title",
                "line one\nline two",
                &keywords,
                Persona::Marketing,
                "the insight",
                Some(420),
            )
            .unwrap();

        let fetched = store.get_scrap(created.id, owner.id).unwrap().unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.keywords, keywords);
        assert_eq!(fetched.persona, Persona::Marketing);
        assert!(fetched.integration_id.is_none());
    }

    #[test]
    fn test_scrap_invisible_to_other_users() {
        let store = store();
        let owner = user(&store, "g-1");
        let intruder = user(&store, "g-2");

        let scrap = store
            .create_scrap(owner.id, "https://x", "T", "s", &[], Persona::General, "i", None)
            .unwrap();

        assert!(store.get_scrap(scrap.id, intruder.id).unwrap().is_none());
        assert!(store.list_scraps(intruder.id).unwrap().is_empty());
    }

    #[test]
    fn test_record_scrap_delivery() {
        let store = store();
        let owner = user(&store, "g-1");
        let integration = store
            .create_integration(owner.id, "https://hooks.slack.com/services/T0/B0/X", "WS")
            .unwrap();
        let scrap = store
            .create_scrap(owner.id, "https://x", "T", "s", &[], Persona::General, "i", None)
            .unwrap();

        store
            .record_scrap_delivery(scrap.id, owner.id, integration.id, Some("nice read"))
            .unwrap();

        let updated = store.get_scrap(scrap.id, owner.id).unwrap().unwrap();
        assert_eq!(updated.integration_id, Some(integration.id));
        assert_eq!(updated.user_comment.as_deref(), Some("nice read"));
    }

    #[test]
    fn test_store_persists_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("newsclip.db");

        let owner_id = {
            let store = SqliteStore::new(&path).unwrap();
            user(&store, "g-1").id
        };

        let reopened = SqliteStore::new(&path).unwrap();
        assert!(reopened.get_user(&owner_id.to_string()).unwrap().is_some());
    }
}
