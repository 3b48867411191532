use creature_core::{Creature, Effect, Msg};
use creature_engine::{CreatureRecord, EngineEvent, EngineHandle};
use creature_logging::{creature_info, creature_warn};

/// Executes core effects against the fetch engine and turns engine events
/// back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchPage(request) => {
                    creature_info!(
                        "FetchPage page={} offset={} limit={}",
                        request.page,
                        request.offset,
                        request.limit
                    );
                    self.engine
                        .fetch_page(request.page, request.offset, request.limit);
                }
            }
        }
    }

    pub fn poll(&self) -> Option<Msg> {
        self.engine.try_recv().map(map_event)
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::PageFetched { page, result } => match result {
            Ok(records) => Msg::PageLoaded {
                page,
                creatures: records.into_iter().map(map_record).collect(),
            },
            Err(err) => {
                creature_warn!("Page {} fetch failed: {}", page, err);
                Msg::PageFailed {
                    page,
                    reason: err.to_string(),
                }
            }
        },
    }
}

fn map_record(record: CreatureRecord) -> Creature {
    Creature::new(
        record.id,
        record.name,
        record.height,
        record.weight,
        record.image_url,
    )
}
