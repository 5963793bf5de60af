use std::fmt;

use crate::catalog::{Catalog, Item, ItemId, Slot, SlotId};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
pub mod errors;
pub use errors::*;


/// Injective mapping from catalog items to slots.
///
/// Every item holds at most one slot and every slot at most one item. Items
/// without a slot are *unscheduled*; slots nobody holds are simply unused.
///
/// # Internal Structure
/// - `slots`: one `Option<SlotId>` per item, indexed by [`ItemId`]
///
/// # Complexity
/// - `slot_of`: O(1)
/// - `place`, `item_at`: O(n) in the number of items
///
/// # Examples
///
/// ```
/// use runthrough::catalog::Catalog;
/// use runthrough::schedule::Assignment;
///
/// let catalog = Catalog::from_labels(["A", "B"], ["S1", "S2", "S3"]).unwrap();
/// let a = catalog.item_id("A").unwrap();
/// let b = catalog.item_id("B").unwrap();
/// let s2 = catalog.slot_id("S2").unwrap();
///
/// let mut assignment = Assignment::unscheduled(catalog.item_count());
/// assignment.place(a, s2).unwrap();
///
/// // One item per slot.
/// assert!(assignment.place(b, s2).is_err());
///
/// assert_eq!(assignment.slot_of(a), Some(s2));
/// assert_eq!(assignment.item_at(s2), Some(a));
/// assert_eq!(assignment.slot_of(b), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct Assignment {
    slots: Vec<Option<SlotId>>,
}

impl Assignment {
    /// An assignment of `item_count` items in which nothing is placed.
    pub fn unscheduled(item_count: usize) -> Self {
        Self {
            slots: vec![None; item_count],
        }
    }

    /// Builds a full assignment from a search result where position `p` of
    /// `slots` goes to `items[p]`. Callers guarantee both are duplicate-free.
    pub(crate) fn from_positions(item_count: usize, items: &[ItemId], slots: &[SlotId]) -> Self {
        let mut assignment = Self::unscheduled(item_count);
        for (item, slot) in items.iter().zip(slots) {
            assignment.slots[item.0] = Some(*slot);
        }
        assignment
    }

    /// Number of items covered, placed or not.
    pub fn item_count(&self) -> usize {
        self.slots.len()
    }

    /// Number of items holding a slot.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Returns true if no item holds a slot.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Returns true if every item holds a slot.
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    pub fn slot_of(&self, item: ItemId) -> Option<SlotId> {
        self.slots.get(item.0).copied().flatten()
    }

    /// The item holding `slot`, if any.
    pub fn item_at(&self, slot: SlotId) -> Option<ItemId> {
        self.slots
            .iter()
            .position(|s| *s == Some(slot))
            .map(ItemId)
    }

    pub fn uses_slot(&self, slot: SlotId) -> bool {
        self.item_at(slot).is_some()
    }

    /// Places `item` in `slot`.
    ///
    /// Requires:
    /// - `item` within the assignment and not yet placed
    /// - `slot` not held by another item
    pub fn place(&mut self, item: ItemId, slot: SlotId) -> Result<(), AssignmentError> {
        let current = *self
            .slots
            .get(item.0)
            .ok_or(AssignmentError::UnknownItem(item))?;
        if let Some(held) = current {
            return Err(AssignmentError::ItemAlreadyPlaced { item, slot: held });
        }
        if let Some(existing) = self.item_at(slot) {
            return Err(AssignmentError::SlotTaken { slot, existing });
        }
        self.slots[item.0] = Some(slot);
        Ok(())
    }

    /// Unschedules `item`. Returns the slot it held.
    pub fn remove(&mut self, item: ItemId) -> Option<SlotId> {
        self.slots.get_mut(item.0).and_then(Option::take)
    }

    /// Unschedules every item.
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|s| *s = None);
    }

    /// Iterates over every item in catalog order with its slot, if any.
    pub fn iter(&self) -> impl Iterator<Item = (ItemId, Option<SlotId>)> + '_ {
        self.slots.iter().enumerate().map(|(i, s)| (ItemId(i), *s))
    }

    /// Iterates over placed items only.
    pub fn assigned(&self) -> impl Iterator<Item = (ItemId, SlotId)> + '_ {
        self.iter().filter_map(|(item, slot)| slot.map(|s| (item, s)))
    }

    /// Items without a slot, in catalog order.
    pub fn unscheduled_items(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.iter()
            .filter(|(_, slot)| slot.is_none())
            .map(|(item, _)| item)
    }

    /// Returns true if no two items share a slot.
    pub fn is_injective(&self) -> bool {
        let mut seen: Vec<SlotId> = self.slots.iter().flatten().copied().collect();
        let total = seen.len();
        seen.sort_unstable();
        seen.dedup();
        seen.len() == total
    }

    /// Resolves every item against `catalog`, in catalog order.
    pub fn placements<'a>(
        &'a self,
        catalog: &'a Catalog,
    ) -> impl Iterator<Item = (&'a Item, Placement<'a>)> + 'a {
        catalog.item_ids().filter_map(move |item| {
            let placement = match self.slot_of(item).and_then(|s| catalog.slot(s)) {
                Some(slot) => Placement::Slot(slot),
                None => Placement::Unscheduled,
            };
            catalog.item(item).map(|i| (i, placement))
        })
    }
}

/// Where an item ended up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement<'a> {
    Slot(&'a Slot),
    Unscheduled,
}

impl Placement<'_> {
    pub fn is_scheduled(&self) -> bool {
        matches!(self, Placement::Slot(_))
    }
}

impl fmt::Display for Placement<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Placement::Slot(slot) => write!(f, "{}", slot),
            Placement::Unscheduled => f.write_str("Not yet scheduled"),
        }
    }
}
