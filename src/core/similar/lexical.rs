//! Ratcliff/Obershelp string similarity.
//!
//! `ratio = 2 * M / T`, where `T` is the total length of both strings and
//! `M` the number of characters in the matching blocks found by repeatedly
//! taking the longest common substring and recursing on both sides of it.
//! Ties between equally long substrings go to the earliest one in `a`, then
//! in `b`.

/// Similarity of two strings in `[0.0, 1.0]`; two empty strings score 1.0
pub fn sequence_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    2.0 * matching_characters(&a, &b) as f64 / total as f64
}

fn matching_characters(a: &[char], b: &[char]) -> usize {
    let mut matched = 0;
    let mut queue = vec![(0, a.len(), 0, b.len())];

    while let Some((alo, ahi, blo, bhi)) = queue.pop() {
        let (i, j, size) = longest_match(a, b, alo, ahi, blo, bhi);
        if size == 0 {
            continue;
        }

        matched += size;
        if alo < i && blo < j {
            queue.push((alo, i, blo, j));
        }
        if i + size < ahi && j + size < bhi {
            queue.push((i + size, ahi, j + size, bhi));
        }
    }

    matched
}

/// Longest common run of `a[alo..ahi]` and `b[blo..bhi]` as `(i, j, size)`
fn longest_match(
    a: &[char],
    b: &[char],
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0);

    // run[k + 1] = length of the match ending at a[i], b[blo + k]
    let width = bhi - blo + 1;
    let mut previous = vec![0usize; width];
    let mut current = vec![0usize; width];

    for i in alo..ahi {
        for j in blo..bhi {
            let k = j - blo;
            current[k + 1] = if a[i] == b[j] { previous[k] + 1 } else { 0 };

            let size = current[k + 1];
            if size > best_size {
                best_i = i + 1 - size;
                best_j = j + 1 - size;
                best_size = size;
            }
        }
        std::mem::swap(&mut previous, &mut current);
    }

    (best_i, best_j, best_size)
}
