use creature_core::{update, CollectionStore, Msg};

#[test]
fn update_is_noop() {
    let store = CollectionStore::default();
    let before = store.state().clone();
    let (next, effects) = update(store, Msg::NoOp);

    assert_eq!(&before, next.state());
    assert!(effects.is_empty());
}

#[test]
fn detail_closed_without_selection_is_noop() {
    let (mut next, effects) = update(CollectionStore::default(), Msg::DetailClosed);
    assert!(effects.is_empty());
    assert!(!next.consume_dirty());
}
