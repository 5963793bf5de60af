use thiserror::Error;

use crate::catalog::{ItemId, SlotId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AssignmentError {
    /// Item index is outside the assignment
    #[error("Item {} is not part of this assignment", .0.index())]
    UnknownItem(ItemId),

    /// Item already holds a slot
    #[error("Item {} already has slot {}", .item.index(), .slot.index())]
    ItemAlreadyPlaced { item: ItemId, slot: SlotId },

    /// Another item already holds the slot
    #[error("Slot {} is already taken by item {}", .slot.index(), .existing.index())]
    SlotTaken { slot: SlotId, existing: ItemId },
}
