use std::collections::BTreeMap;

/// Key of a single option slot. Keys only ever grow, so ascending key order
/// is creation order.
pub type OptionKey = u64;

/// A value is blank when nothing but whitespace remains.
pub fn is_blank(value: &str) -> bool {
    value.chars().all(char::is_whitespace)
}

/// The option slots of a poll draft.
///
/// There is always a trailing entry for the user to type into. Filling it
/// with non-blank text opens a new blank one behind it, and the trailing
/// entry itself cannot be removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionList {
    entries: BTreeMap<OptionKey, String>,
    next_key: OptionKey,
}

impl Default for OptionList {
    fn default() -> Self {
        Self::new()
    }
}

impl OptionList {
    /// Starts with two blank slots.
    pub fn new() -> Self {
        let mut list = Self {
            entries: BTreeMap::new(),
            next_key: 0,
        };
        list.push_blank();
        list.push_blank();
        list
    }

    fn push_blank(&mut self) -> OptionKey {
        let key = self.next_key;
        self.next_key += 1;
        self.entries.insert(key, String::new());
        key
    }

    pub fn last_key(&self) -> OptionKey {
        // never empty: the trailing slot cannot be cancelled
        self.entries
            .keys()
            .next_back()
            .copied()
            .unwrap_or_default()
    }

    /// The slot typing should go into next: the first blank entry, which is
    /// the trailing one when every other slot is filled.
    pub fn next_blank_key(&self) -> OptionKey {
        self.entries
            .iter()
            .find(|(_, value)| is_blank(value))
            .map(|(key, _)| *key)
            .unwrap_or_else(|| self.last_key())
    }

    pub fn is_last(&self, key: OptionKey) -> bool {
        self.last_key() == key
    }

    /// Replaces the value at `key`. Returns `false` for unknown keys.
    pub fn on_change(&mut self, key: OptionKey, value: impl Into<String>) -> bool {
        let value = value.into();
        let was_last = self.is_last(key);
        let Some(slot) = self.entries.get_mut(&key) else {
            return false;
        };
        let opens_slot = was_last && !is_blank(&value);
        *slot = value;

        if opens_slot {
            self.push_blank();
        }
        true
    }

    /// Removes the entry at `key`. The trailing entry stays put.
    pub fn on_cancel(&mut self, key: OptionKey) -> bool {
        if self.is_last(key) {
            return false;
        }
        self.entries.remove(&key).is_some()
    }

    pub fn get(&self, key: OptionKey) -> Option<&str> {
        self.entries.get(&key).map(String::as_str)
    }

    /// Entries in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (OptionKey, &str)> {
        self.entries.iter().map(|(key, value)| (*key, value.as_str()))
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.entries.values().map(String::as_str)
    }

    pub fn keys(&self) -> Vec<OptionKey> {
        self.entries.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_two_distinct_blank_slots() {
        let list = OptionList::new();
        let keys = list.keys();

        assert_eq!(keys.len(), 2);
        assert_ne!(keys[0], keys[1]);
        assert!(list.values().all(is_blank));
    }

    #[test]
    fn filling_last_slot_appends_one_blank() {
        let mut list = OptionList::new();

        for (round, text) in ["Pizza", "Tacos", "Sushi"].into_iter().enumerate() {
            let before = list.len();
            let last = list.last_key();
            assert!(list.on_change(last, text));

            assert_eq!(list.len(), before + 1, "round {round}");
            let new_last = list.last_key();
            assert!(new_last > last);
            assert_eq!(list.get(new_last), Some(""));
            assert_eq!(list.get(last), Some(text));
        }
    }

    #[test]
    fn whitespace_in_last_slot_does_not_open_a_new_one() {
        let mut list = OptionList::new();
        let last = list.last_key();

        list.on_change(last, "   ");

        assert_eq!(list.len(), 2);
        assert_eq!(list.last_key(), last);
    }

    #[test]
    fn editing_a_middle_slot_keeps_the_count() {
        let mut list = OptionList::new();
        let first = list.keys()[0];

        list.on_change(first, "Pizza");

        assert_eq!(list.len(), 2);
        assert_eq!(list.get(first), Some("Pizza"));
    }

    #[test]
    fn unknown_key_is_ignored() {
        let mut list = OptionList::new();

        assert!(!list.on_change(999, "ghost"));
        assert!(!list.on_cancel(999));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn cancelling_the_last_slot_is_a_no_op() {
        let mut list = OptionList::new();
        let last = list.last_key();

        assert!(!list.on_cancel(last));
        assert_eq!(list.len(), 2);
        assert_eq!(list.last_key(), last);
    }

    #[test]
    fn cancelling_other_slots_shrinks_by_one() {
        let mut list = OptionList::new();
        let last = list.last_key();
        list.on_change(last, "Pizza");
        let last = list.last_key();

        for key in list.keys().into_iter().filter(|key| *key != last) {
            let before = list.len();
            assert!(list.on_cancel(key));
            assert_eq!(list.len(), before - 1);
            assert_eq!(list.last_key(), last);
            assert_eq!(list.get(last), Some(""));
        }

        assert_eq!(list.len(), 1);
        assert!(!list.on_cancel(last));
    }

    #[test]
    fn next_blank_key_fills_top_to_bottom() {
        let mut list = OptionList::new();
        let [first, second] = [list.keys()[0], list.keys()[1]];
        assert_eq!(list.next_blank_key(), first);

        list.on_change(list.next_blank_key(), "Pizza");
        assert_eq!(list.len(), 2);
        assert_eq!(list.next_blank_key(), second);

        list.on_change(list.next_blank_key(), "Tacos");
        assert_eq!(list.len(), 3);
        assert_eq!(list.next_blank_key(), list.last_key());

        list.on_change(first, "");
        assert_eq!(list.next_blank_key(), first);
    }

    #[test]
    fn iterates_in_creation_order() {
        let mut list = OptionList::new();
        for text in ["c", "a", "b"] {
            let last = list.last_key();
            list.on_change(last, text);
        }

        let values: Vec<&str> = list.values().collect();
        assert_eq!(values, ["", "c", "a", "b", ""]);
    }
}
