use std::collections::HashSet;

use crate::options::is_blank;

/// Turns raw option values into the list that gets submitted: blank values
/// are dropped and exact duplicates keep only their first occurrence.
pub fn normalize<I, S>(options: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut normalized = Vec::new();

    for option in options {
        let option = option.as_ref();
        if is_blank(option) || !seen.insert(option.to_string()) {
            continue;
        }
        normalized.push(option.to_string());
    }

    normalized
}
