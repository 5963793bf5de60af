//! Fixed, ordered catalogs of items and slots.
//!
//! Both catalogs are defined once at startup and never change. Every search in
//! the crate enumerates items and slots in catalog order, so the catalog is
//! also what makes scheduling deterministic.
//!
//! Slots are listed chronologically. The last slot is the *overflow* slot: it
//! is withheld from the default search and only offered when every assignment
//! over the remaining slots (the *restricted universe*) carries a
//! High-severity conflict.

pub mod error;
mod interval;

use std::collections::HashSet;
use std::fmt;

use qtty::Minute;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub use error::CatalogError;
pub use interval::Interval;

/// Position of an item in the item catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct ItemId(pub(crate) usize);

impl ItemId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Position of a slot in the slot catalog. Ordering follows the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct SlotId(pub(crate) usize);

impl SlotId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A performance unit that needs a slot.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct Item {
    label: String,
}

impl Item {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// A discrete time window from the slot catalog.
///
/// The optional `window` is measured in minutes from the start of the
/// schedule's day and may run past midnight (a `12–1 AM` slot is
/// `[1440, 1500)`).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Slot {
    label: String,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    window: Option<Interval<Minute>>,
}

impl Slot {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            window: None,
        }
    }

    /// Attaches the time window this slot covers.
    pub fn with_window(mut self, window: Interval<Minute>) -> Self {
        self.window = Some(window);
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn window(&self) -> Option<Interval<Minute>> {
        self.window
    }
}

impl From<&str> for Slot {
    fn from(label: &str) -> Self {
        Slot::new(label)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// Items and slots known to the scheduler, in catalog order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "RawCatalog")
)]
pub struct Catalog {
    items: Vec<Item>,
    slots: Vec<Slot>,
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawCatalog {
    items: Vec<String>,
    slots: Vec<Slot>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawCatalog> for Catalog {
    type Error = CatalogError;

    fn try_from(raw: RawCatalog) -> Result<Self, Self::Error> {
        Catalog::new(raw.items, raw.slots)
    }
}

const RUN_THROUGH_SONGS: [&str; 6] = [
    "Rang Jo Lagyo",
    "Garaj Garaj",
    "Take On Me",
    "Dil Dhadakne Do",
    "Ainvayi Ainvayi",
    "Bring Me to Life",
];

const RUN_THROUGH_SLOTS: [&str; 7] = [
    "6–7 PM",
    "7–8 PM",
    "8–9 PM",
    "9–10 PM",
    "10–11 PM",
    "11–12 PM",
    "12–1 AM",
];

/// Minute of the day at which the first run-through slot opens (6 PM).
const RUN_THROUGH_START: f64 = 18.0 * 60.0;

impl Catalog {
    /// Builds a catalog, validating labels and slot windows.
    ///
    /// Slots must be listed chronologically: when two consecutive slots both
    /// carry windows, the earlier window must end no later than the next one
    /// starts.
    pub fn new<I, S>(items: I, slots: impl IntoIterator<Item = Slot>) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items: Vec<Item> = items.into_iter().map(|label| Item::new(label)).collect();
        let slots: Vec<Slot> = slots.into_iter().collect();

        let mut seen = HashSet::new();
        for item in &items {
            if item.label.trim().is_empty() {
                return Err(CatalogError::EmptyLabel);
            }
            if !seen.insert(item.label.as_str()) {
                return Err(CatalogError::DuplicateItem(item.label.clone()));
            }
        }

        let mut seen = HashSet::new();
        let mut previous: Option<Interval<Minute>> = None;
        for slot in &slots {
            if slot.label.trim().is_empty() {
                return Err(CatalogError::EmptyLabel);
            }
            if !seen.insert(slot.label.as_str()) {
                return Err(CatalogError::DuplicateSlot(slot.label.clone()));
            }
            if let Some(window) = slot.window {
                if window.is_empty() {
                    return Err(CatalogError::EmptyWindow(slot.label.clone()));
                }
                if let Some(prev) = previous {
                    if !prev.precedes(&window) {
                        return Err(CatalogError::WindowOutOfOrder(slot.label.clone()));
                    }
                }
                previous = Some(window);
            }
        }

        Ok(Self { items, slots })
    }

    /// Builds a catalog from plain slot labels, without windows.
    pub fn from_labels<I, S, J, T>(items: I, slots: J) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        J: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self::new(items, slots.into_iter().map(|label| Slot::new(label)))
    }

    /// The six-song, seven-slot evening run-through, one hour per slot from
    /// 6 PM to 1 AM.
    pub fn run_through() -> Self {
        let items = RUN_THROUGH_SONGS.iter().map(|s| Item::new(*s)).collect();
        let slots = RUN_THROUGH_SLOTS
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let start = RUN_THROUGH_START + 60.0 * i as f64;
                Slot::new(*label).with_window(Interval::from_f64(start, start + 60.0))
            })
            .collect();
        Self { items, slots }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.get(id.0)
    }

    pub fn slot(&self, id: SlotId) -> Option<&Slot> {
        self.slots.get(id.0)
    }

    /// Looks up an item by its label.
    pub fn item_id(&self, label: &str) -> Option<ItemId> {
        self.items.iter().position(|i| i.label == label).map(ItemId)
    }

    /// Looks up a slot by its label.
    pub fn slot_id(&self, label: &str) -> Option<SlotId> {
        self.slots.iter().position(|s| s.label == label).map(SlotId)
    }

    /// Item ids in catalog order.
    pub fn item_ids(&self) -> impl Iterator<Item = ItemId> + '_ {
        (0..self.items.len()).map(ItemId)
    }

    /// Slot ids in chronological order.
    pub fn slot_ids(&self) -> impl Iterator<Item = SlotId> + '_ {
        (0..self.slots.len()).map(SlotId)
    }

    /// The chronologically last slot, withheld from the default search.
    pub fn overflow_slot(&self) -> Option<SlotId> {
        self.slots.len().checked_sub(1).map(SlotId)
    }

    /// Every slot except the overflow slot, in chronological order.
    pub fn restricted_universe(&self) -> Vec<SlotId> {
        let end = self.slots.len().saturating_sub(1);
        (0..end).map(SlotId).collect()
    }

    /// Every slot, in chronological order.
    pub fn full_universe(&self) -> Vec<SlotId> {
        self.slot_ids().collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::run_through()
    }
}
