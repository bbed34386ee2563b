// @module: Character-level alignment of a lyric line with its phonetic reading

/// Align an original-orthography line with its phonetic reading and render
/// the divergent spans as bracketed corrections.
///
/// Matched characters (kana and punctuation that survive the reading
/// unchanged) are emitted literally; wherever the reading diverges from the
/// spelling, the reading characters are emitted as a `[...]` run standing in
/// for the original span: `駆け抜ける` with reading `かけぬける` renders as
/// `[か]け[ぬ]ける`.
///
/// Aligning a string with itself is a no-op: `align(s, s) == s`, and no
/// brackets are introduced. The computation is a unit-cost edit-distance
/// table with a backward walk, O(|original| x |reading|) time and space.
pub fn align(original: &str, reading: &str) -> String {
    let a: Vec<char> = original.chars().collect();
    let b: Vec<char> = reading.chars().collect();
    let m = a.len();
    let n = b.len();

    let mut dp = vec![vec![0usize; n + 1]; m + 1];
    for i in 0..=m {
        for j in 0..=n {
            if i == 0 || j == 0 {
                dp[i][j] = i + j;
            } else if a[i - 1] == b[j - 1] {
                dp[i][j] = dp[i - 1][j - 1];
            } else {
                dp[i][j] = 1 + dp[i - 1][j].min(dp[i][j - 1]);
            }
        }
    }

    // Backward walk. Emitted pieces are reversed at the end, so a `]` pushed
    // when a group opens ends up closing the forward-order bracket, and a `[`
    // pushed when the group ends becomes its opener. The deletion comparison
    // is strict: ties take the insertion branch, which keeps groups balanced.
    let mut i = m;
    let mut j = n;
    let mut pieces: Vec<String> = Vec::new();
    let mut group_open = false;

    while i > 0 || j > 0 {
        if i > 0 && j > 0 && a[i - 1] == b[j - 1] {
            pieces.push(a[i - 1].to_string());
            i -= 1;
            j -= 1;
        } else if i > 0 && (j == 0 || dp[i - 1][j] < dp[i][j - 1]) {
            if group_open {
                pieces.push("[".to_string());
                group_open = false;
            }
            i -= 1;
        } else {
            if group_open {
                pieces.push(b[j - 1].to_string());
            } else {
                group_open = true;
                pieces.push(format!("{}]", b[j - 1]));
            }
            j -= 1;
        }
    }

    // A group still open here means the reading inserts at the very start of
    // the line; close it so the rendered string stays balanced.
    if group_open {
        pieces.push("[".to_string());
    }

    pieces.iter().rev().map(|s| s.as_str()).collect()
}
