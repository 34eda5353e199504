use tracing::debug;

/// An ordered, user-arranged list of library entries. Duplicates are allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Playlist {
    entries: Vec<String>,
}

impl Playlist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append entries to the end, in the given order.
    pub fn add<I, S>(&mut self, items: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let before = self.entries.len();
        self.entries.extend(items.into_iter().map(Into::into));
        debug!("playlist: added {} entries", self.entries.len() - before);
    }

    /// Remove the entry at `index`. Out-of-range indices are ignored.
    pub fn remove(&mut self, index: usize) -> Option<String> {
        if index < self.entries.len() {
            debug!("playlist: removed entry {index}");
            Some(self.entries.remove(index))
        } else {
            None
        }
    }

    /// Swap the entry at `index` with its predecessor.
    ///
    /// Returns the entry's new index, or `None` when it was already first.
    pub fn move_up(&mut self, index: usize) -> Option<usize> {
        if index == 0 || index >= self.entries.len() {
            return None;
        }
        self.entries.swap(index - 1, index);
        Some(index - 1)
    }

    /// Swap the entry at `index` with its successor.
    ///
    /// Returns the entry's new index, or `None` when it was already last.
    pub fn move_down(&mut self, index: usize) -> Option<usize> {
        if index + 1 >= self.entries.len() {
            return None;
        }
        self.entries.swap(index, index + 1);
        Some(index + 1)
    }

    /// Reposition one entry: remove it at `from`, then insert it at `to`.
    ///
    /// `to` is clamped to the last position. Returns the entry's final index.
    pub fn move_to(&mut self, from: usize, to: usize) -> Option<usize> {
        if from >= self.entries.len() {
            return None;
        }
        let item = self.entries.remove(from);
        let to = to.min(self.entries.len());
        self.entries.insert(to, item);
        debug!("playlist: moved entry {from} -> {to}");
        Some(to)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        debug!("playlist: cleared");
    }
}
