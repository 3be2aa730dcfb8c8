//! Levenshtein edit distance

/// Edit distance between two strings, counted in characters
#[must_use]
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0usize; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(ca != cb);
            current[j + 1] = substitution
                .min(previous[j + 1] + 1)
                .min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_strings_have_distance_zero() {
        assert_eq!(levenshtein("mes", "mes"), 0);
        assert_eq!(levenshtein("", ""), 0);
    }

    #[test]
    fn empty_versus_non_empty_is_length() {
        assert_eq!(levenshtein("", "chat"), 4);
        assert_eq!(levenshtein("chat", ""), 4);
    }

    #[test]
    fn single_edits() {
        assert_eq!(levenshtein("chat", "chats"), 1); // insertion
        assert_eq!(levenshtein("chat", "cat"), 1); // deletion
        assert_eq!(levenshtein("chat", "chot"), 1); // substitution
    }

    #[test]
    fn is_symmetric() {
        assert_eq!(levenshtein("eau", "au"), levenshtein("au", "eau"));
    }

    #[test]
    fn counts_characters_not_bytes() {
        assert_eq!(levenshtein("été", "ete"), 2);
    }
}
