use serde_json::Value;

/// Holds persisted copies of shapes between copy and paste.
#[derive(Clone, Debug, Default)]
pub struct ClipboardService {
    items: Vec<Value>,
    pastes: u32,
}

impl ClipboardService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the clipboard contents. Resets the paste counter.
    pub fn copy(&mut self, items: Vec<Value>) {
        self.items = items;
        self.pastes = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Clones of the stored items and how many pastes preceded this one
    /// plus one, so callers can offset each paste further than the last.
    pub fn paste(&mut self) -> Option<(Vec<Value>, u32)> {
        if self.items.is_empty() {
            return None;
        }
        self.pastes += 1;
        Some((self.items.clone(), self.pastes))
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.pastes = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn paste_counts_up_until_next_copy() {
        let mut c = ClipboardService::new();
        assert!(c.paste().is_none());
        c.copy(vec![json!({"id": 1})]);
        assert_eq!(c.paste().unwrap().1, 1);
        assert_eq!(c.paste().unwrap().1, 2);
        c.copy(vec![json!({"id": 2})]);
        let (items, n) = c.paste().unwrap();
        assert_eq!(n, 1);
        assert_eq!(items, vec![json!({"id": 2})]);
    }
}
