use creature_logging::{creature_debug, creature_info, creature_trace, creature_warn};

use crate::observe::Observers;
use crate::{
    should_load_more, CollectionState, CollectionViewModel, Creature, CreatureId, PageRequest,
    StoreConfig, Subscription, Topic,
};

/// Owns one browsing session's loaded creatures, paging cursor, in-flight
/// guard and favourites, and notifies observers after every change.
///
/// The store is driven from a single owner context. Fetching is expressed as a
/// [`PageRequest`] handed to the caller; the result comes back through
/// [`complete_page`](Self::complete_page) or [`fail_page`](Self::fail_page).
/// While a request is outstanding every further load request is a no-op.
#[derive(Debug, Default)]
pub struct CollectionStore {
    state: CollectionState,
    observers: Observers,
}

impl CollectionStore {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            state: CollectionState::new(config),
            observers: Observers::default(),
        }
    }

    pub fn state(&self) -> &CollectionState {
        &self.state
    }

    pub fn view(&self) -> CollectionViewModel {
        self.state.view()
    }

    pub fn consume_dirty(&mut self) -> bool {
        self.state.consume_dirty()
    }

    /// Moves `Idle -> Loading` and returns the page to fetch, or `None` if a
    /// fetch is already outstanding.
    pub fn load_next_page(&mut self) -> Option<PageRequest> {
        match self.state.begin_load() {
            Some(request) => {
                creature_debug!(
                    "Loading page {} (offset={} limit={})",
                    request.page,
                    request.offset,
                    request.limit
                );
                Some(request)
            }
            None => {
                creature_debug!("Load requested while a page is in flight; ignored");
                None
            }
        }
    }

    /// Applies the trigger policy for a row about to be rendered.
    pub fn row_will_display(&mut self, index: usize) -> Option<PageRequest> {
        let len = self.state.creatures().len();
        if should_load_more(index, len, self.state.config().lookahead) {
            creature_trace!("Row {} of {} is inside the lookahead window", index, len);
            self.load_next_page()
        } else {
            None
        }
    }

    /// Appends a fetched page and advances the cursor.
    ///
    /// A page that does not answer the outstanding request is dropped.
    pub fn complete_page(&mut self, page: u32, creatures: Vec<Creature>) {
        let count = creatures.len();
        if !self.state.apply_page(page, creatures) {
            creature_warn!("Discarding stale page {} ({} creatures)", page, count);
            return;
        }
        creature_info!(
            "Page {} loaded: {} creatures, {} total, cursor={}",
            page,
            count,
            self.state.creatures().len(),
            self.state.cursor()
        );
        self.observers.notify(Topic::Creatures, &self.state);
    }

    /// Discards a failed fetch; the cursor and sequence stay as they were.
    pub fn fail_page(&mut self, page: u32, reason: &str) {
        if self.state.abandon_page(page) {
            creature_warn!("Page {} failed, will retry on next trigger: {}", page, reason);
        } else {
            creature_warn!("Ignoring failure for stale page {}: {}", page, reason);
        }
    }

    /// Removes a creature from the sequence and the favourites set.
    ///
    /// Never touches the cursor, so a removed creature is not fetched again.
    pub fn remove_creature(&mut self, id: CreatureId) {
        let removal = self.state.remove(id);
        if !removal.creature_removed {
            creature_debug!("Remove requested for unknown creature {}", id);
        }
        self.observers.notify(Topic::Creatures, &self.state);
        if removal.favourite_pruned {
            self.observers.notify(Topic::Favourites, &self.state);
        }
    }

    /// Flips favourite membership for `id` and returns the new membership.
    ///
    /// The id does not have to be loaded; favouriting an unloaded id is
    /// allowed and has no visible effect until it appears in the list.
    pub fn toggle_favourite(&mut self, id: CreatureId) -> bool {
        let now_favourite = self.state.toggle_favourite(id);
        self.observers.notify(Topic::Favourites, &self.state);
        now_favourite
    }

    pub fn is_favourite(&self, id: CreatureId) -> bool {
        self.state.is_favourite(id)
    }

    pub fn select_creature(&mut self, id: CreatureId) -> bool {
        self.state.select(id)
    }

    pub fn close_detail(&mut self) {
        self.state.close_detail();
    }

    /// Registers `callback` for changes to `topic`.
    ///
    /// Callbacks run synchronously after the change is fully applied.
    pub fn subscribe<F>(&mut self, topic: Topic, callback: F) -> Subscription
    where
        F: FnMut(&CollectionState) + Send + 'static,
    {
        self.observers.subscribe(topic, Box::new(callback))
    }

    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        self.observers.unsubscribe(subscription)
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }
}
