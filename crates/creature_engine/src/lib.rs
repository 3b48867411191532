//! Creature engine: remote paging source and background fetch execution.
mod engine;
mod source;
mod types;
mod wire;

pub use engine::EngineHandle;
pub use source::{FetchSettings, PagingSource, PokeApiSource};
pub use types::{CreatureRecord, EngineEvent, FailureKind, FetchError};
