//! Store Adapter trait.

use crate::error::Result;

/// Key holding the JSON array of diagnosis records, newest first.
pub const HISTORY_KEY: &str = "raed_diagnoses";

/// Key holding the JSON string of the last active page id.
pub const LAST_PAGE_KEY: &str = "raed_last_page";

/// Durable key/value storage for JSON text.
///
/// Both operations are total over string keys. Each key is written
/// independently; there is no transaction spanning several keys.
///
/// The history cache owns [`HISTORY_KEY`] and the session navigator owns
/// [`LAST_PAGE_KEY`]. Neither touches the other's key.
pub trait KeyValueStore: Send + Sync {
    /// Reads the raw JSON text stored under `key`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(text))`: Value present
    /// - `Ok(None)`: Nothing stored under `key`
    /// - `Err(_)`: The backing storage could not be read
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the value under `key`.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes the value under `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}
