use crate::model::HistoryItem;

/// Newest-first list of past conversions, never longer than [`History::CAPACITY`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    items: Vec<HistoryItem>,
}

impl History {
    pub const CAPACITY: usize = 10;

    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps the first [`Self::CAPACITY`] items of `items` (assumed newest first).
    pub fn from_items(mut items: Vec<HistoryItem>) -> Self {
        items.truncate(Self::CAPACITY);
        Self { items }
    }

    /// Inserts at the front, evicting the oldest item when full.
    pub fn push_front(&mut self, item: HistoryItem) -> Option<HistoryItem> {
        self.items.insert(0, item);
        if self.items.len() > Self::CAPACITY {
            self.items.pop()
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn find(&self, id: &str) -> Option<&HistoryItem> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    pub fn newest(&self) -> Option<&HistoryItem> {
        self.items.first()
    }

    pub fn items(&self) -> &[HistoryItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NameTranslation;

    fn item(n: i64) -> HistoryItem {
        HistoryItem {
            translation: NameTranslation {
                hangul: format!("이름{n}"),
                romanization: format!("ireum{n}"),
                meaning: "설명".into(),
                origin: "English".into(),
            },
            id: format!("id-{n}"),
            original_name: format!("Name{n}"),
            timestamp: n,
        }
    }

    #[test]
    fn length_is_min_of_inserts_and_capacity() {
        for n in 0..=15 {
            let mut h = History::new();
            for i in 0..n {
                h.push_front(item(i));
            }
            assert_eq!(h.len(), (n as usize).min(History::CAPACITY));
        }
    }

    #[test]
    fn eviction_drops_the_oldest() {
        let mut h = History::new();
        for i in 0..10 {
            assert_eq!(h.push_front(item(i)), None);
        }

        let evicted = h.push_front(item(10)).unwrap();
        assert_eq!(evicted.id, "id-0");

        let ids: Vec<&str> = h.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids.first(), Some(&"id-10"));
        assert_eq!(ids.last(), Some(&"id-1"));
        assert!(h
            .items()
            .windows(2)
            .all(|w| w[0].timestamp >= w[1].timestamp));
    }

    #[test]
    fn from_items_truncates() {
        let items: Vec<HistoryItem> = (0..14).rev().map(item).collect();
        let h = History::from_items(items);
        assert_eq!(h.len(), 10);
        assert_eq!(h.newest().unwrap().id, "id-13");
    }

    #[test]
    fn find_and_clear() {
        let mut h = History::new();
        h.push_front(item(1));
        h.push_front(item(2));
        assert_eq!(h.find("id-1").unwrap().original_name, "Name1");
        assert!(h.find("missing").is_none());

        h.clear();
        assert!(h.is_empty());
    }
}
