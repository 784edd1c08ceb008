//! Ordered header set shared by requests and responses.
//!
//! # Policy
//!
//! - Names are compared ASCII case-insensitively (`content-length` and
//!   `Content-Length` are the same header).
//! - Duplicate names: the last write wins. The existing entry keeps its
//!   position in the list, but takes the value and the spelling of the
//!   newest insertion.
//! - Iteration yields entries in first-insertion order, which keeps the wire
//!   output of a response deterministic.

/// An ordered, case-insensitive header map with last-write-wins semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, String)>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a header, replacing any existing entry with the same name.
    ///
    /// # Example
    ///
    /// ```
    /// # use courier::http::headers::Headers;
    /// let mut headers = Headers::new();
    /// headers.insert("X-Trace", "1");
    /// headers.insert("x-trace", "2");
    ///
    /// assert_eq!(headers.len(), 1);
    /// assert_eq!(headers.get("X-TRACE"), Some("2"));
    /// ```
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();

        match self.position(&name) {
            Some(idx) => self.entries[idx] = (name, value),
            None => self.entries.push((name, value)),
        }
    }

    /// Returns the value stored under `name`, if any.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.position(name).map(|idx| self.entries[idx].1.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Removes a header and returns its value.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.position(name).map(|idx| self.entries.remove(idx).1)
    }

    /// Iterates over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|(k, _)| k.eq_ignore_ascii_case(name))
    }
}

impl<K, V> FromIterator<(K, V)> for Headers
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Headers::new();
        for (k, v) in iter {
            headers.insert(k, v);
        }
        headers
    }
}
