//! Column schema and key sanitization.
//!
//! On disk the columns carry human-readable names (`Number`, `ImageURL`).
//! The API addresses them by their sanitized form: lowercase with all
//! whitespace removed. The two are matched by comparing sanitized forms,
//! so `Image URL` on disk and `imageurl` from a client refer to the same
//! column.

/// API field keys of the declared product schema, in column order.
///
/// The on-disk header for these is produced by [`canonical_column`].
pub const FIELDS: [&str; 5] = ["number", "description", "cost", "availability", "imageurl"];

/// Sanitize a column or field name for API use.
///
/// # Examples
///
/// ```
/// use plateshop_store::sanitize_key;
///
/// assert_eq!(sanitize_key("ImageURL"), "imageurl");
/// assert_eq!(sanitize_key(" Image URL "), "imageurl");
/// ```
pub fn sanitize_key(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Reconstruct a canonical column name from a sanitized key.
///
/// `imageurl` maps to `ImageURL`; any other key gets its first character
/// uppercased.
pub fn canonical_column(key: &str) -> String {
    let key = sanitize_key(key);
    if key == "imageurl" {
        return "ImageURL".to_string();
    }
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Ordered list of canonical column names.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Schema {
    columns: Vec<String>,
}

impl Schema {
    /// The declared product schema: [`FIELDS`] under their canonical names.
    pub fn declared() -> Self {
        Self {
            columns: FIELDS.iter().map(|f| canonical_column(f)).collect(),
        }
    }

    /// Schema taken verbatim from a file's header row.
    pub fn from_headers<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: headers.into_iter().map(Into::into).collect(),
        }
    }

    /// Canonical column names in file order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the schema has no columns (file without a header row).
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Position of the column whose sanitized name equals `key` sanitized.
    pub fn position(&self, key: &str) -> Option<usize> {
        let key = sanitize_key(key);
        self.columns.iter().position(|c| sanitize_key(c) == key)
    }

    /// Sanitized column keys in file order.
    pub fn keys(&self) -> impl Iterator<Item = String> + '_ {
        self.columns.iter().map(|c| sanitize_key(c))
    }
}
