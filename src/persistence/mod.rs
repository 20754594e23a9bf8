//! Save/load persistence
//!
//! Features:
//! - Versioned JSON envelope around every stored value
//! - Fail-safe loads: missing, corrupt or foreign data yields defaults
//! - Achievement unlocks and their counters persist together

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::platform::{KeyValueStore, StoreError};
use crate::sim::Achievements;

/// Current envelope format
pub const ENVELOPE_VERSION: u32 = 1;
/// Storage key for the achievement record
pub const ACHIEVEMENTS_KEY: &str = "draculas_revenge_achievements";

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported envelope version {found} (expected {})", ENVELOPE_VERSION)]
    Version { found: u32 },

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Serialize)]
struct EnvelopeRef<'a, T> {
    version: u32,
    data: &'a T,
}

#[derive(Deserialize)]
struct Envelope {
    version: u32,
    data: serde_json::Value,
}

/// Wrap `data` in the current envelope
pub fn encode<T: Serialize>(data: &T) -> Result<Vec<u8>, PersistError> {
    Ok(serde_json::to_vec(&EnvelopeRef {
        version: ENVELOPE_VERSION,
        data,
    })?)
}

/// Unwrap and check an envelope
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, PersistError> {
    let envelope: Envelope = serde_json::from_slice(bytes)?;
    if envelope.version != ENVELOPE_VERSION {
        return Err(PersistError::Version {
            found: envelope.version,
        });
    }
    Ok(serde_json::from_value(envelope.data)?)
}

/// Load `key`, falling back to `T::default()` on any problem
pub fn load_or_default<T>(store: &dyn KeyValueStore, key: &str) -> T
where
    T: DeserializeOwned + Default,
{
    let Some(bytes) = store.get(key) else {
        log::info!("No stored {key}; using defaults");
        return T::default();
    };
    match decode(&bytes) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("Discarding unreadable {key}: {e}");
            T::default()
        }
    }
}

pub fn save<T: Serialize>(
    store: &mut dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), PersistError> {
    let bytes = encode(value)?;
    store.set(key, &bytes)?;
    Ok(())
}

/// Stored achievements, or nothing unlocked if there are none usable
pub fn load_achievements(store: &dyn KeyValueStore) -> Achievements {
    let achievements: Achievements = load_or_default(store, ACHIEVEMENTS_KEY);
    log::info!(
        "Loaded {} unlocked achievements",
        achievements.unlocked().count()
    );
    achievements
}

pub fn save_achievements(
    store: &mut dyn KeyValueStore,
    achievements: &Achievements,
) -> Result<(), PersistError> {
    save(store, ACHIEVEMENTS_KEY, achievements)
}
