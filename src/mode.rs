//! Most frequent elements of a sequence, counted with a [`ChainedHashMap`]

use crate::{error::TableError, separate_chaining::ChainedHashMap};

/// Finds the mode(s) of `items` and how often they occur.
///
/// Modes are listed once each, in the order they first appear. An empty input yields
/// no modes and a frequency of zero.
///
/// # Errors
///
/// Propagates [`TableError`] from the frequency table.
pub fn find_mode<T: AsRef<str>>(items: &[T]) -> Result<(Vec<String>, usize), TableError> {
    let mut frequencies = ChainedHashMap::<usize>::default();
    for item in items {
        let key = item.as_ref();
        match frequencies.get_mut(key) {
            Some(count) => *count = count.saturating_add(1),
            None => {
                frequencies.put(key, 1)?;
            }
        }
    }

    let mut modes = Vec::new();
    let mut listed = ChainedHashMap::<()>::default();
    let mut max_frequency = 0;

    for item in items {
        let key = item.as_ref();
        let frequency = frequencies.get(key).copied().unwrap_or(0);
        if frequency > max_frequency {
            max_frequency = frequency;
            modes.clear();
            listed.clear();
        }
        if frequency == max_frequency && !listed.contains_key(key) {
            listed.put(key, ())?;
            modes.push(key.to_owned());
        }
    }

    Ok((modes, max_frequency))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_mode() -> Result<(), TableError> {
        let (modes, frequency) = find_mode(&["apple", "apple", "grape", "melon", "peach"])?;
        assert_eq!(modes, vec!["apple"]);
        assert_eq!(frequency, 2);
        Ok(())
    }

    #[test]
    fn test_all_distinct() -> Result<(), TableError> {
        let (modes, frequency) = find_mode(&["a", "b", "c"])?;
        assert_eq!(modes, vec!["a", "b", "c"]);
        assert_eq!(frequency, 1);
        Ok(())
    }

    #[test]
    fn test_tied_modes_in_first_seen_order() -> Result<(), TableError> {
        let items = [
            "Arch", "Manjaro", "Manjaro", "Mint", "Mint", "Mint", "Ubuntu", "Ubuntu", "Ubuntu",
        ];
        let (modes, frequency) = find_mode(&items)?;
        assert_eq!(modes, vec!["Mint", "Ubuntu"]);
        assert_eq!(frequency, 3);
        Ok(())
    }

    #[test]
    fn test_many_items_grow_the_counter() -> Result<(), TableError> {
        let items: Vec<String> = (0..100).map(|i| format!("{}", i % 40)).collect();
        let (modes, frequency) = find_mode(&items)?;
        let expected: Vec<String> = (0..20).map(|i| i.to_string()).collect();
        assert_eq!(modes, expected);
        assert_eq!(frequency, 3);
        Ok(())
    }

    #[test]
    fn test_empty_input() -> Result<(), TableError> {
        let items: [&str; 0] = [];
        assert_eq!(find_mode(&items)?, (Vec::new(), 0));
        Ok(())
    }
}
