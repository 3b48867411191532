use creature_core::CreatureId;

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Scroll the list down by one screen.
    More,
    /// Scroll the list up by one screen.
    Up,
    Favourite(CreatureId),
    Remove(CreatureId),
    Show(CreatureId),
    /// Toggle favourite from the open detail view.
    Star,
    Back,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),
    #[error("'{0}' needs a creature id")]
    MissingId(&'static str),
    #[error("'{0}' is not a valid creature id")]
    BadId(String),
}

/// Parses a line of input. Blank lines yield `None`.
pub fn parse_command(line: &str) -> Result<Option<Command>, InputError> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };
    let command = match head.to_ascii_lowercase().as_str() {
        "more" | "m" | "down" => Command::More,
        "up" | "u" => Command::Up,
        "fav" | "f" => Command::Favourite(parse_id(words.next(), "fav")?),
        "rm" | "remove" | "d" => Command::Remove(parse_id(words.next(), "rm")?),
        "show" | "s" => Command::Show(parse_id(words.next(), "show")?),
        "star" => Command::Star,
        "back" | "b" => Command::Back,
        "help" | "h" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        other => return Err(InputError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

fn parse_id(word: Option<&str>, command: &'static str) -> Result<CreatureId, InputError> {
    let word = word.ok_or(InputError::MissingId(command))?;
    word.parse()
        .map_err(|_| InputError::BadId(word.to_string()))
}
