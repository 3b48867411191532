use std::collections::BTreeSet;

use crate::view_model::{CollectionViewModel, CreatureRowView, DetailView, ListRow};
use crate::{Creature, CreatureId};

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const DEFAULT_LOOKAHEAD: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    /// Number of creatures requested per page. Always at least 1.
    pub page_size: u32,
    /// How close to the end of the list a rendered row must be to trigger a load.
    pub lookahead: usize,
}

impl StoreConfig {
    pub fn new(page_size: u32, lookahead: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            lookahead,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE, DEFAULT_LOOKAHEAD)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPhase {
    #[default]
    Idle,
    /// A fetch for `page` is outstanding.
    Loading { page: u32 },
}

/// Arguments for one call to the remote paging source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub offset: u64,
    pub limit: u32,
}

/// What a removal actually touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct Removal {
    pub creature_removed: bool,
    pub favourite_pruned: bool,
}

/// Authoritative in-memory state of one browsing session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CollectionState {
    config: StoreConfig,
    creatures: Vec<Creature>,
    cursor: u32,
    phase: LoadPhase,
    favourites: BTreeSet<CreatureId>,
    selected: Option<CreatureId>,
    dirty: bool,
}

impl CollectionState {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config: StoreConfig::new(config.page_size, config.lookahead),
            ..Self::default()
        }
    }

    pub fn config(&self) -> StoreConfig {
        self.config
    }

    /// Loaded sequence in page-then-response order.
    pub fn creatures(&self) -> &[Creature] {
        &self.creatures
    }

    pub fn creature(&self, id: CreatureId) -> Option<&Creature> {
        self.creatures.iter().find(|creature| creature.id == id)
    }

    /// Index of the next page to request.
    pub fn cursor(&self) -> u32 {
        self.cursor
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, LoadPhase::Loading { .. })
    }

    pub fn favourites(&self) -> &BTreeSet<CreatureId> {
        &self.favourites
    }

    pub fn is_favourite(&self, id: CreatureId) -> bool {
        self.favourites.contains(&id)
    }

    pub fn selected(&self) -> Option<CreatureId> {
        self.selected
    }

    /// Returns whether anything visible changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn view(&self) -> CollectionViewModel {
        let mut rows = Vec::with_capacity(self.creatures.len() + 1);
        rows.extend(self.creatures.iter().map(|creature| {
            ListRow::Creature(CreatureRowView {
                id: creature.id,
                name: creature.name.clone(),
                image_url: creature.image_url.clone(),
                is_favourite: self.is_favourite(creature.id),
            })
        }));
        rows.push(ListRow::Loading);

        let detail = self
            .selected
            .and_then(|id| self.creature(id))
            .map(|creature| DetailView::new(creature, self.is_favourite(creature.id)));

        CollectionViewModel {
            rows,
            favourites_count: self.favourites.len(),
            loading: self.is_loading(),
            detail,
        }
    }

    /// Guard check-and-set. `None` while a fetch is outstanding.
    pub(crate) fn begin_load(&mut self) -> Option<PageRequest> {
        if self.is_loading() {
            return None;
        }
        let page = self.cursor;
        self.phase = LoadPhase::Loading { page };
        self.dirty = true;
        Some(PageRequest {
            page,
            offset: u64::from(page) * u64::from(self.config.page_size),
            limit: self.config.page_size,
        })
    }

    /// Appends a page if it answers the outstanding request. Returns whether it was applied.
    pub(crate) fn apply_page(&mut self, page: u32, creatures: Vec<Creature>) -> bool {
        if self.phase != (LoadPhase::Loading { page }) {
            return false;
        }
        self.creatures.extend(creatures);
        self.cursor += 1;
        self.phase = LoadPhase::Idle;
        self.dirty = true;
        true
    }

    /// Clears the guard without touching the cursor or the sequence.
    pub(crate) fn abandon_page(&mut self, page: u32) -> bool {
        if self.phase != (LoadPhase::Loading { page }) {
            return false;
        }
        self.phase = LoadPhase::Idle;
        self.dirty = true;
        true
    }

    pub(crate) fn remove(&mut self, id: CreatureId) -> Removal {
        let before = self.creatures.len();
        self.creatures.retain(|creature| creature.id != id);
        let removal = Removal {
            creature_removed: self.creatures.len() != before,
            favourite_pruned: self.favourites.remove(&id),
        };
        if self.selected == Some(id) {
            self.selected = None;
        }
        self.dirty = true;
        removal
    }

    /// Flips membership in the favourites set. Returns the new membership.
    pub(crate) fn toggle_favourite(&mut self, id: CreatureId) -> bool {
        let now_favourite = if self.favourites.remove(&id) {
            false
        } else {
            self.favourites.insert(id);
            true
        };
        self.dirty = true;
        now_favourite
    }

    pub(crate) fn select(&mut self, id: CreatureId) -> bool {
        if self.creature(id).is_none() {
            return false;
        }
        self.selected = Some(id);
        self.dirty = true;
        true
    }

    pub(crate) fn close_detail(&mut self) {
        if self.selected.take().is_some() {
            self.dirty = true;
        }
    }
}
