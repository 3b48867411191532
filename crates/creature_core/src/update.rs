use crate::{CollectionStore, Effect, Msg};

/// Applies a message to the store and returns any effects to execute.
pub fn update(mut store: CollectionStore, msg: Msg) -> (CollectionStore, Vec<Effect>) {
    let effects = match msg {
        Msg::LoadNextPage => store
            .load_next_page()
            .map(Effect::FetchPage)
            .into_iter()
            .collect(),
        Msg::RowWillDisplay { index } => store
            .row_will_display(index)
            .map(Effect::FetchPage)
            .into_iter()
            .collect(),
        Msg::PageLoaded { page, creatures } => {
            store.complete_page(page, creatures);
            Vec::new()
        }
        Msg::PageFailed { page, reason } => {
            store.fail_page(page, &reason);
            Vec::new()
        }
        Msg::ToggleFavourite(id) => {
            store.toggle_favourite(id);
            Vec::new()
        }
        Msg::RemoveCreature(id) => {
            store.remove_creature(id);
            Vec::new()
        }
        Msg::CreatureSelected(id) => {
            store.select_creature(id);
            Vec::new()
        }
        Msg::DetailClosed => {
            store.close_detail();
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (store, effects)
}
