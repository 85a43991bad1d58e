// File: src/fuzzy/distance.rs

/// Levenshtein edit distance over chars (insert, delete, substitute all cost 1).
/// Complexity: O(n*m) time, O(m) memory.
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
    let mut current = vec![0; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(ca != cb);
            current[j + 1] = substitution.min(previous[j + 1] + 1).min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }
    previous[b.len()]
}

/// Length of the longest contiguous substring shared by `a` and `b`.
pub fn longest_common_substring(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    // run[j + 1] = length of the common run ending at a[i], b[j]
    let mut run = vec![0usize; b.len() + 1];
    let mut longest = 0;
    for &ca in &a {
        for j in (0..b.len()).rev() {
            run[j + 1] = if ca == b[j] { run[j] + 1 } else { 0 };
            longest = longest.max(run[j + 1]);
        }
    }
    longest
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levenshtein_basics() {
        assert_eq!(levenshtein("", ""), 0);
        assert_eq!(levenshtein("abc", ""), 3);
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("4828", "4828"), 0);
        assert_eq!(levenshtein("flaw", "lawn"), 2);
    }

    #[test]
    fn common_substring_basics() {
        assert_eq!(longest_common_substring("", "abc"), 0);
        assert_eq!(longest_common_substring("abcdef", "zcdez"), 3);
        assert_eq!(longest_common_substring("4828", "28"), 2);
        assert_eq!(longest_common_substring("abc", "xyz"), 0);
    }

    #[test]
    fn metrics_are_symmetric() {
        let pairs = [("482", "28"), ("R163", "R150"), ("0657", "65"), ("", "12")];
        for (a, b) in pairs {
            assert_eq!(levenshtein(a, b), levenshtein(b, a));
            assert_eq!(longest_common_substring(a, b), longest_common_substring(b, a));
        }
    }
}
