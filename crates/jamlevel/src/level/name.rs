//! Level name matching ("Level 12", "Derin Level 7", "New Level 29").

const LEVEL_MARKER: &str = "Level ";

/// Trailing number of a name, if the name ends in digits
fn trailing_number(name: &str) -> Option<(&str, u32)> {
    let digits_start = name
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map(|(i, _)| i)?;
    let number = name[digits_start..].parse().ok()?;
    Some((&name[..digits_start], number))
}

/// Whether the name ends with `"Level <number>"`, with any prefix
pub fn is_level_name(name: &str) -> bool {
    trailing_number(name).is_some_and(|(head, _)| head.ends_with(LEVEL_MARKER))
}

/// Numeric suffix used to order levels; `None` sorts last
pub fn level_number(name: &str) -> Option<u32> {
    trailing_number(name).map(|(_, n)| n)
}
