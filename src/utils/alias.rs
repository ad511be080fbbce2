//! Random alias generation.
//!
//! Generated aliases carry no uniqueness guarantee. Collisions are detected by
//! the storage service and reported as [`crate::domain::StorageError::AlreadyExists`].

use rand::Rng;
use rand::distr::Alphanumeric;

/// Length of generated aliases.
pub const ALIAS_LENGTH: usize = 8;

/// Generates a random alias of `len` characters from `[A-Za-z0-9]`.
///
/// # Examples
///
/// ```
/// use url_shortener_gateway::utils::alias::generate_alias;
///
/// let alias = generate_alias(8);
/// assert_eq!(alias.len(), 8);
/// assert!(alias.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_alias(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}
