// src/backend/editor/collection.rs
// Keyed, densely ordered container behind every sub-record list of the draft.

use crate::models::{Ceremony, FamilyMember};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_COLLECTION_ID: AtomicU64 = AtomicU64::new(0);

/// Stable identity of one item within one collection.
///
/// Keys survive reorders and edits, which is what lets an upload that
/// started before a move still land on the right item. They are never
/// reused within a collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemKey(u64);

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Items that accept a partial update.
pub trait Patchable {
    type Patch;

    fn apply_patch(&mut self, patch: Self::Patch);
}

#[derive(Clone, Debug)]
struct Entry<T> {
    key: ItemKey,
    item: T,
}

/// Ordered collection with key/position split.
///
/// Position is the index into `entries`, so it is dense and zero-based by
/// construction after every mutation.
///
/// Keys are only unique within one collection. `id` tells collections apart;
/// a clone keeps it, since it holds the same logical list.
#[derive(Clone, Debug)]
pub struct OrderedCollection<T> {
    id: u64,
    entries: Vec<Entry<T>>,
    next_key: u64,
    structure_version: u64,
}

impl<T> Default for OrderedCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> OrderedCollection<T> {
    pub fn new() -> Self {
        Self {
            id: NEXT_COLLECTION_ID.fetch_add(1, Ordering::Relaxed),
            entries: Vec::new(),
            next_key: 0,
            structure_version: 0,
        }
    }

    /// Hydrates from persisted order; the item at index `i` gets key `i`.
    pub fn from_ordered_list(items: impl IntoIterator<Item = T>) -> Self {
        let mut collection = Self::new();
        for item in items {
            collection.insert(item);
        }
        collection.structure_version = 0;
        collection
    }

    /// Appends `item` and returns its fresh key.
    pub fn insert(&mut self, item: T) -> ItemKey {
        let key = ItemKey(self.next_key);
        self.next_key += 1;
        self.entries.push(Entry { key, item });
        self.structure_version += 1;
        key
    }

    /// Removes and returns the item under `key`; `None` if absent.
    pub fn remove(&mut self, key: ItemKey) -> Option<T> {
        let position = self.position_of(key)?;
        self.structure_version += 1;
        Some(self.entries.remove(position).item)
    }

    /// Relocates `key` to `to_position` (clamped). Returns the new position,
    /// or `None` when the key is absent.
    pub fn move_to(&mut self, key: ItemKey, to_position: usize) -> Option<usize> {
        let from = self.position_of(key)?;
        let to = to_position.min(self.entries.len() - 1);
        if from < to {
            self.entries[from..=to].rotate_left(1);
        } else if to < from {
            self.entries[to..=from].rotate_right(1);
        }
        Some(to)
    }

    pub fn get(&self, key: ItemKey) -> Option<&T> {
        self.entries.iter().find(|e| e.key == key).map(|e| &e.item)
    }

    pub fn get_mut(&mut self, key: ItemKey) -> Option<&mut T> {
        self.entries.iter_mut().find(|e| e.key == key).map(|e| &mut e.item)
    }

    pub fn contains(&self, key: ItemKey) -> bool {
        self.position_of(key).is_some()
    }

    pub fn position_of(&self, key: ItemKey) -> Option<usize> {
        self.entries.iter().position(|e| e.key == key)
    }

    pub fn key_at(&self, position: usize) -> Option<ItemKey> {
        self.entries.get(position).map(|e| e.key)
    }

    /// Keys in position order.
    pub fn keys(&self) -> Vec<ItemKey> {
        self.entries.iter().map(|e| e.key).collect()
    }

    /// `(key, item)` pairs in position order.
    pub fn iter(&self) -> impl Iterator<Item = (ItemKey, &T)> {
        self.entries.iter().map(|e| (e.key, &e.item))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Identity of this collection, distinct from every other live collection.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Bumped by every insert and remove, never by update or move.
    pub fn structure_version(&self) -> u64 {
        self.structure_version
    }
}

impl<T: Clone> OrderedCollection<T> {
    /// Snapshot of the items in position order.
    pub fn to_ordered_list(&self) -> Vec<T> {
        self.entries.iter().map(|e| e.item.clone()).collect()
    }
}

impl<T: Patchable> OrderedCollection<T> {
    /// Merges `patch` into the item under `key`. Returns false (and changes
    /// nothing) when the key is absent.
    pub fn update(&mut self, key: ItemKey, patch: T::Patch) -> bool {
        match self.get_mut(key) {
            Some(item) => {
                item.apply_patch(patch);
                true
            }
            None => false,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FamilyMemberPatch {
    pub name: Option<String>,
    pub relation: Option<String>,
}

impl Patchable for FamilyMember {
    type Patch = FamilyMemberPatch;

    fn apply_patch(&mut self, patch: FamilyMemberPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(relation) = patch.relation {
            self.relation = relation;
        }
    }
}

/// Partial ceremony update. `map_link`/`image_url` use `Some(None)` to clear.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CeremonyPatch {
    pub title: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub venue_name: Option<String>,
    pub venue_address: Option<String>,
    pub map_link: Option<Option<String>>,
    pub image_url: Option<Option<String>>,
}

impl CeremonyPatch {
    pub fn image(reference: String) -> Self {
        Self {
            image_url: Some(Some(reference)),
            ..Self::default()
        }
    }
}

impl Patchable for Ceremony {
    type Patch = CeremonyPatch;

    fn apply_patch(&mut self, patch: CeremonyPatch) {
        let CeremonyPatch {
            title,
            date,
            time,
            venue_name,
            venue_address,
            map_link,
            image_url,
        } = patch;
        if let Some(v) = title {
            self.title = v;
        }
        if let Some(v) = date {
            self.date = v;
        }
        if let Some(v) = time {
            self.time = v;
        }
        if let Some(v) = venue_name {
            self.venue_name = v;
        }
        if let Some(v) = venue_address {
            self.venue_address = v;
        }
        if let Some(v) = map_link {
            self.map_link = v;
        }
        if let Some(v) = image_url {
            self.image_url = v;
        }
    }
}
