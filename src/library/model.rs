/// The entries found by the most recent scan.
///
/// Entries are relative path strings kept sorted case-insensitively. A
/// lowercase copy of every entry is kept alongside so filtering does not
/// re-lowercase the whole library on each keystroke.
#[derive(Debug, Clone, Default)]
pub struct Library {
    entries: Vec<String>,
    lower: Vec<String>,
}

impl Library {
    /// Build a library from scanned paths, sorting them by their lowercase form.
    pub fn from_paths(paths: Vec<String>) -> Self {
        let mut keyed: Vec<(String, String)> = paths
            .into_iter()
            .map(|p| (p.to_lowercase(), p))
            .collect();
        // Stable, so entries differing only in case keep their walk order.
        keyed.sort_by(|a, b| a.0.cmp(&b.0));

        let (lower, entries) = keyed.into_iter().unzip();
        Self { entries, lower }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Return indices of entries containing `query` as a case-insensitive
    /// substring. Surrounding whitespace in `query` is ignored and an empty
    /// query matches every entry.
    pub fn filter(&self, query: &str) -> Vec<usize> {
        let query = query.trim();
        if query.is_empty() {
            return (0..self.entries.len()).collect();
        }

        let query_lower = query.to_lowercase();
        self.lower
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.contains(&query_lower))
            .map(|(i, _)| i)
            .collect()
    }
}
