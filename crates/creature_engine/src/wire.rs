//! JSON shapes of the PokeAPI list and detail endpoints.

use serde::Deserialize;

use crate::CreatureRecord;

#[derive(Debug, Deserialize)]
pub(crate) struct ListResponse {
    pub results: Vec<ListEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListEntry {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DetailResponse {
    pub id: u32,
    pub name: String,
    pub height: u32,
    pub weight: u32,
    #[serde(default)]
    pub sprites: Sprites,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Sprites {
    #[serde(default)]
    pub front_default: Option<String>,
}

impl From<DetailResponse> for CreatureRecord {
    fn from(detail: DetailResponse) -> Self {
        Self {
            id: detail.id,
            name: detail.name,
            height: detail.height,
            weight: detail.weight,
            image_url: detail.sprites.front_default.unwrap_or_default(),
        }
    }
}
