use crate::{Creature, CreatureId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Explicit request for the next page (initial load, manual retry).
    LoadNextPage,
    /// The list surface is about to render the row at `index`.
    RowWillDisplay { index: usize },
    /// Paging source delivered a page.
    PageLoaded {
        page: u32,
        creatures: Vec<Creature>,
    },
    /// Paging source failed; the attempt is discarded.
    PageFailed { page: u32, reason: String },
    /// User tapped the favourite control on a row or in the detail view.
    ToggleFavourite(CreatureId),
    /// User tapped delete on a row.
    RemoveCreature(CreatureId),
    /// User opened the detail view for a creature.
    CreatureSelected(CreatureId),
    /// User navigated back from the detail view.
    DetailClosed,
    /// Fallback for placeholder wiring.
    NoOp,
}
