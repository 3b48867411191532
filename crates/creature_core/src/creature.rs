pub type CreatureId = u32;

/// One catalog record. Never mutated in place by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Creature {
    pub id: CreatureId,
    pub name: String,
    pub height: u32,
    pub weight: u32,
    pub image_url: String,
}

impl Creature {
    pub fn new(
        id: CreatureId,
        name: impl Into<String>,
        height: u32,
        weight: u32,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            height,
            weight,
            image_url: image_url.into(),
        }
    }
}
