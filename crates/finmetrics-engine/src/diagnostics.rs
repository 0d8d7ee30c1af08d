//! Append-only diagnostic log for a single computation run.

/// Ordered, human-readable explanations of every metric that could not be
/// computed.
///
/// A fresh log is created for each run and handed to every rule, so runs never
/// see each other's entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    entries: Vec<String>,
}

impl Diagnostics {
    /// Create an empty log.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append an entry.
    pub fn push(&mut self, entry: impl Into<String>) {
        self.entries.push(entry.into());
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entries were recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in the order they were recorded.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Consume the log.
    pub fn into_vec(self) -> Vec<String> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preserves_order() {
        let mut log = Diagnostics::new();
        log.push("first");
        log.push(String::from("second"));

        assert_eq!(log.len(), 2);
        assert_eq!(log.iter().collect::<Vec<_>>(), vec!["first", "second"]);
        assert_eq!(log.into_vec(), vec!["first", "second"]);
    }

    #[test]
    fn test_starts_empty() {
        assert!(Diagnostics::default().is_empty());
    }
}
