//! Creature core: pure collection store, state machine and view-model helpers.
mod creature;
mod effect;
mod msg;
mod observe;
mod state;
mod store;
mod update;
mod view_model;

pub use creature::{Creature, CreatureId};
pub use effect::Effect;
pub use msg::Msg;
pub use observe::{Subscription, Topic};
pub use state::{CollectionState, LoadPhase, PageRequest, StoreConfig};
pub use store::CollectionStore;
pub use update::update;
pub use view_model::{
    should_load_more, CollectionViewModel, CreatureRowView, DetailView, ListRow,
};
