use crate::models::UNSPECIFIED;

const BIRTH_NAME_MARKERS: [&str; 3] = ["Née", "née", "NÉE"];

/// Normalizes a resident or caregiver name so remarks and maiden names do not split groups.
pub fn clean_name(raw: Option<&str>) -> String {
    let Some(raw) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
        return UNSPECIFIED.to_string();
    };

    let mut name = strip_parenthesized(raw);
    if let Some(cut) = BIRTH_NAME_MARKERS
        .iter()
        .filter_map(|marker| find_word(&name, marker))
        .min()
    {
        name.truncate(cut);
    }

    let cleaned = name.trim();
    if cleaned.is_empty() {
        UNSPECIFIED.to_string()
    } else {
        cleaned.to_string()
    }
}

fn find_word(haystack: &str, word: &str) -> Option<usize> {
    haystack.match_indices(word).map(|(index, _)| index).find(|&index| {
        let starts_word = haystack[..index]
            .chars()
            .next_back()
            .map_or(true, char::is_whitespace);
        let ends_word = haystack[index + word.len()..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphabetic());
        starts_word && ends_word
    })
}

// First '(' through the last ')' after it, with surrounding whitespace.
fn strip_parenthesized(raw: &str) -> String {
    let Some(open) = raw.find('(') else {
        return raw.to_string();
    };
    let Some(close) = raw[open..].rfind(')').map(|offset| open + offset) else {
        return raw.to_string();
    };

    let before = raw[..open].trim_end();
    let after = raw[close + 1..].trim_start();
    match (before.is_empty(), after.is_empty()) {
        (true, _) => after.to_string(),
        (_, true) => before.to_string(),
        _ => format!("{before} {after}"),
    }
}
