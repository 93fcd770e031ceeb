//! The persisted flag that records whether the user has finished onboarding.

use crate::{
    Error,
    storage::{KeyValueStore, StorageKey},
};

const COMPLETED: &str = "true";

/// Whether the user has completed onboarding.
///
/// Only the exact value `"true"` counts as completed; a missing key or any
/// other value does not.
///
/// # Errors
/// Returns an error if the store could not be read.
pub fn is_onboarding_completed(store: &impl KeyValueStore) -> Result<bool, Error> {
    let value = store.get(StorageKey::OnboardingCompleted)?;

    Ok(value.as_deref() == Some(COMPLETED))
}

/// Record that the user has completed onboarding.
///
/// # Errors
/// Returns [Error::StorageWriteFailed] if the flag could not be written.
pub fn mark_onboarding_completed(store: &impl KeyValueStore) -> Result<(), Error> {
    store.set(StorageKey::OnboardingCompleted, COMPLETED)
}
