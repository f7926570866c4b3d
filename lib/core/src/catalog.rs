use crate::item::{Item, ItemId};
use crate::{Error, Result};
use ahash::AHashMap;
use std::collections::hash_map::Entry;
use tracing::warn;

/// Ordered, immutable collection of items.
///
/// Position `i` of an item is its row and column in the similarity matrix.
/// Titles are not required to be unique; lookups resolve to the first item
/// carrying the title in catalog order. A repeated id keeps its first
/// position for `index_of_id`; the later row stays in the catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<Item>,
    by_title: AHashMap<String, usize>,
    by_id: AHashMap<ItemId, usize>,
}

impl Catalog {
    pub fn new(items: Vec<Item>) -> Self {
        let mut by_title = AHashMap::with_capacity(items.len());
        let mut by_id = AHashMap::with_capacity(items.len());

        for (index, item) in items.iter().enumerate() {
            match by_id.entry(item.id) {
                Entry::Vacant(slot) => {
                    slot.insert(index);
                }
                Entry::Occupied(first) => {
                    warn!(
                        "Duplicate item id {} at position {} (first seen at {})",
                        item.id,
                        index,
                        first.get()
                    );
                }
            }
            by_title.entry(item.title.clone()).or_insert(index);
        }

        Self {
            items,
            by_title,
            by_id,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Resolve a title to its position
    pub fn index_of_title(&self, title: &str) -> Result<usize> {
        self.by_title
            .get(title)
            .copied()
            .ok_or_else(|| Error::TitleNotFound(title.to_string()))
    }

    /// Resolve a position back to its item
    pub fn item_at(&self, index: usize) -> Result<&Item> {
        self.items.get(index).ok_or(Error::IndexOutOfRange {
            index,
            len: self.items.len(),
        })
    }

    #[inline]
    pub fn index_of_id(&self, id: ItemId) -> Option<usize> {
        self.by_id.get(&id).copied()
    }

    /// Titles in catalog order, duplicates included
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|item| item.title.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
