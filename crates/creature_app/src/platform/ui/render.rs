use std::ops::Range;

use creature_core::{CollectionViewModel, DetailView, ListRow};

const FAVOURITE_MARK: &str = "★";
const PLAIN_MARK: &str = "☆";

/// Renders the whole screen: header plus either the detail or the list.
pub fn render(view: &CollectionViewModel, visible: Range<usize>) -> Vec<String> {
    let mut lines = vec![format!(
        "== Creatures ({} loaded) {} {}",
        view.creature_count(),
        FAVOURITE_MARK,
        view.favourites_count
    )];
    match &view.detail {
        Some(detail) => lines.extend(render_detail(detail)),
        None => lines.extend(render_list(view, visible)),
    }
    lines
}

pub fn render_list(view: &CollectionViewModel, visible: Range<usize>) -> Vec<String> {
    view.rows[visible]
        .iter()
        .map(|row| match row {
            ListRow::Creature(row) => format!(
                "{:>5} {} {}",
                row.id,
                if row.is_favourite {
                    FAVOURITE_MARK
                } else {
                    PLAIN_MARK
                },
                row.name
            ),
            ListRow::Loading if view.loading => "      Loading…".to_string(),
            ListRow::Loading => "      … ('more' loads the next page)".to_string(),
        })
        .collect()
}

pub fn render_detail(detail: &DetailView) -> Vec<String> {
    let image = if detail.image_url.is_empty() {
        "(no image)"
    } else {
        detail.image_url.as_str()
    };
    vec![
        format!(
            "  {} {}",
            detail.name_text,
            if detail.is_favourite {
                FAVOURITE_MARK
            } else {
                PLAIN_MARK
            }
        ),
        format!("  {}", detail.height_text),
        format!("  {}", detail.weight_text),
        format!("  Image: {image}"),
        "  ('star' toggles favourite, 'back' returns to the list)".to_string(),
    ]
}

pub fn help() -> Vec<String> {
    [
        "more | m        scroll down (loads more near the end)",
        "up | u          scroll up",
        "fav <id>        toggle favourite",
        "rm <id>         remove from the list",
        "show <id>       open details",
        "star / back     in details: toggle favourite / close",
        "quit | q        exit",
    ]
    .iter()
    .map(|line| line.to_string())
    .collect()
}
