use crate::{Creature, CreatureId, Msg};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CollectionViewModel {
    /// Loaded creatures followed by one trailing loading indicator.
    pub rows: Vec<ListRow>,
    pub favourites_count: usize,
    /// A page fetch is outstanding.
    pub loading: bool,
    pub detail: Option<DetailView>,
}

impl CollectionViewModel {
    pub fn creature_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|row| matches!(row, ListRow::Creature(_)))
            .count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListRow {
    Creature(CreatureRowView),
    Loading,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatureRowView {
    pub id: CreatureId,
    pub name: String,
    pub image_url: String,
    pub is_favourite: bool,
}

/// Detail surface for one creature.
///
/// Holds no reference to whoever shows it: tapping the favourite control
/// returns the message the host should dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub id: CreatureId,
    pub name_text: String,
    pub height_text: String,
    pub weight_text: String,
    pub image_url: String,
    pub is_favourite: bool,
}

impl DetailView {
    pub fn new(creature: &Creature, is_favourite: bool) -> Self {
        Self {
            id: creature.id,
            name_text: format!("Name: {}", capitalize_words(&creature.name)),
            height_text: format!("Height: {} cm", creature.height),
            weight_text: format!("Weight: {} kg", creature.weight),
            image_url: creature.image_url.clone(),
            is_favourite,
        }
    }

    /// Flips the local indicator and returns the command for the host.
    pub fn favourite_tapped(&mut self) -> Msg {
        self.is_favourite = !self.is_favourite;
        Msg::ToggleFavourite(self.id)
    }
}

/// True when the row at `index` is within `lookahead` rows of the end of a
/// list of `len` creatures. The trailing loading row (`index == len`) always
/// qualifies.
pub fn should_load_more(index: usize, len: usize, lookahead: usize) -> bool {
    index.saturating_add(lookahead) >= len
}

fn capitalize_words(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut at_word_start = true;
    for ch in raw.chars() {
        if ch.is_alphanumeric() {
            if at_word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(ch);
            at_word_start = true;
        }
    }
    out
}
