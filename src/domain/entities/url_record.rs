//! URL record entity owned by the storage service.

/// A stored mapping from alias to destination URL.
///
/// The alias is the unique key; uniqueness is enforced by whoever stores the
/// record, never by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlRecord {
    pub id: i64,
    pub url: String,
    pub alias: String,
}

impl UrlRecord {
    pub fn new(id: i64, url: String, alias: String) -> Self {
        Self { id, url, alias }
    }
}
