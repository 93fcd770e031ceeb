//! The key-value store that holds the onboarding flag and the user's profile.
//!
//! Values are plain strings addressed by string keys. The SQLite backend keeps
//! them in the `key_value` table next to the menu.

use rusqlite::{Connection, OptionalExtension};

use crate::Error;

/// Every key the application reads from or writes to the key-value store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    /// Set to `"true"` once the user has completed onboarding.
    OnboardingCompleted,
    /// The user's first name, also set during onboarding.
    FirstName,
    /// The user's last name.
    LastName,
    /// The user's email, also set during onboarding.
    Email,
    /// The user's phone number, e.g. `(555) 123-4567`.
    PhoneNumber,
    /// A reference to the user's avatar image, e.g. a URL. Empty if unset.
    AvatarUri,
    /// `"true"` if the user wants to hear about promotions.
    Promotions,
    /// `"true"` if the user wants the newsletter.
    News,
    /// `"true"` if the user wants special offers.
    Offers,
}

impl StorageKey {
    /// The eight keys that make up a user profile, in the order they are saved.
    pub const PROFILE_KEYS: [StorageKey; 8] = [
        StorageKey::FirstName,
        StorageKey::LastName,
        StorageKey::Email,
        StorageKey::PhoneNumber,
        StorageKey::AvatarUri,
        StorageKey::Promotions,
        StorageKey::News,
        StorageKey::Offers,
    ];

    /// The string the value is stored under.
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::OnboardingCompleted => "@onboarding_completed",
            StorageKey::FirstName => "@firstName",
            StorageKey::LastName => "@lastName",
            StorageKey::Email => "@email",
            StorageKey::PhoneNumber => "@phoneNumber",
            StorageKey::AvatarUri => "@avatarUri",
            StorageKey::Promotions => "@promotions",
            StorageKey::News => "@news",
            StorageKey::Offers => "@offers",
        }
    }
}

/// Persistent string storage addressed by [StorageKey].
pub trait KeyValueStore {
    /// Get the value stored under `key`, or `None` if nothing has been stored.
    ///
    /// # Errors
    /// Returns an error if the underlying read fails.
    fn get(&self, key: StorageKey) -> Result<Option<String>, Error>;

    /// Store `value` under `key`, replacing any existing value.
    ///
    /// # Errors
    /// Returns [Error::StorageWriteFailed] if the value could not be written.
    fn set(&self, key: StorageKey, value: &str) -> Result<(), Error>;

    /// Remove every stored value.
    ///
    /// # Errors
    /// Returns an error if the underlying delete fails.
    fn clear(&self) -> Result<(), Error>;
}

impl KeyValueStore for Connection {
    fn get(&self, key: StorageKey) -> Result<Option<String>, Error> {
        self.prepare("SELECT value FROM key_value WHERE key = ?1")?
            .query_row([key.as_str()], |row| row.get(0))
            .optional()
            .map_err(Error::from)
    }

    fn set(&self, key: StorageKey, value: &str) -> Result<(), Error> {
        self.execute(
            "INSERT INTO key_value (key, value) VALUES (?1, ?2)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            (key.as_str(), value),
        )
        .map_err(|error| {
            tracing::error!("could not write {}: {error}", key.as_str());
            Error::StorageWriteFailed(key.as_str().to_owned())
        })?;

        Ok(())
    }

    fn clear(&self) -> Result<(), Error> {
        self.execute("DELETE FROM key_value", ())?;

        Ok(())
    }
}

/// Create the key-value table.
pub fn create_key_value_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS key_value (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
        (),
    )?;

    Ok(())
}
