//! Loading, saving and clearing the user's profile in the key-value store.

use crate::{
    Error,
    profile::UserProfile,
    storage::{KeyValueStore, StorageKey},
};

/// Read the user's profile from `store`.
///
/// Missing values default to an empty string, `false` for the notification
/// preferences and `None` for the avatar. Read errors are logged and treated
/// as missing values, so this never fails.
pub fn load_profile(store: &impl KeyValueStore) -> UserProfile {
    let read = |key: StorageKey| match store.get(key) {
        Ok(value) => value.unwrap_or_default(),
        Err(error) => {
            tracing::error!("could not read {}: {error}", key.as_str());
            String::new()
        }
    };

    let avatar_uri = read(StorageKey::AvatarUri);

    UserProfile {
        first_name: read(StorageKey::FirstName),
        last_name: read(StorageKey::LastName),
        email: read(StorageKey::Email),
        phone_number: read(StorageKey::PhoneNumber),
        avatar_uri: (!avatar_uri.is_empty()).then_some(avatar_uri),
        promotions: read(StorageKey::Promotions) == "true",
        news: read(StorageKey::News) == "true",
        offers: read(StorageKey::Offers) == "true",
    }
}

/// Write every field of `profile` to `store`.
///
/// All eight keys are written, in the order of [StorageKey::PROFILE_KEYS].
/// Booleans are stored as `"true"` or `"false"` and a missing avatar as an
/// empty string.
///
/// # Errors
/// Stops at the first write that fails and returns [Error::StorageWriteFailed]
/// naming that key. The writes before it are not rolled back.
pub fn save_profile(profile: &UserProfile, store: &impl KeyValueStore) -> Result<(), Error> {
    for key in StorageKey::PROFILE_KEYS {
        let value = match key {
            StorageKey::FirstName => profile.first_name.as_str(),
            StorageKey::LastName => profile.last_name.as_str(),
            StorageKey::Email => profile.email.as_str(),
            StorageKey::PhoneNumber => profile.phone_number.as_str(),
            StorageKey::AvatarUri => profile.avatar_uri.as_deref().unwrap_or_default(),
            StorageKey::Promotions => bool_str(profile.promotions),
            StorageKey::News => bool_str(profile.news),
            StorageKey::Offers => bool_str(profile.offers),
            StorageKey::OnboardingCompleted => continue,
        };

        store.set(key, value)?;
    }

    Ok(())
}

/// Remove everything the app has stored, including the onboarding flag.
///
/// # Errors
/// Returns an error if the store could not be cleared.
pub fn logout(store: &impl KeyValueStore) -> Result<(), Error> {
    store.clear()
}

fn bool_str(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}
