/*!
 * Tests for the alignment engine
 */

use jlrc::alignment::align;

/// Remove `[...]` groups, leaving only the literal (matched) characters
fn strip_annotations(aligned: &str) -> String {
    let mut literals = String::new();
    let mut inside = false;
    for c in aligned.chars() {
        match c {
            '[' => inside = true,
            ']' => inside = false,
            c if !inside => literals.push(c),
            _ => {}
        }
    }
    literals
}

/// Reference longest-common-subsequence length
fn lcs_len(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let mut dp = vec![vec![0usize; b.len() + 1]; a.len() + 1];
    for i in 1..=a.len() {
        for j in 1..=b.len() {
            dp[i][j] = if a[i - 1] == b[j - 1] {
                dp[i - 1][j - 1] + 1
            } else {
                dp[i - 1][j].max(dp[i][j - 1])
            };
        }
    }
    dp[a.len()][b.len()]
}

/// True when `needle` is a subsequence of `haystack`
fn is_subsequence(needle: &str, haystack: &str) -> bool {
    let mut chars = haystack.chars();
    needle.chars().all(|n| chars.by_ref().any(|h| h == n))
}

/// Aligning a string with itself is the identity
#[test]
fn test_align_withEqualInputs_shouldReturnInputUnchanged() {
    for text in ["", "ねこ", "流れ星", "Neko desu", "煌めけ!"] {
        assert_eq!(align(text, text), text);
    }
}

/// A fully divergent pair yields one bracket group holding the reading
#[test]
fn test_align_withDisjointStrings_shouldBracketWholeReading() {
    assert_eq!(align("猫", "ねこ"), "[ねこ]");
    assert_eq!(align("星", "ほし"), "[ほし]");
}

/// Kanji spans inside kana context produce bracketed runs in place
#[test]
fn test_align_withTypicalLyricLines_shouldMatchExpectedShapes() {
    assert_eq!(align("駆け抜ける", "かけぬける"), "[か]け[ぬ]ける");
    assert_eq!(align("星になる", "ほしになる"), "[ほし]になる");
    assert_eq!(align("ひとり星", "ひとりぼし"), "ひとり[ぼし]");
}

/// Stripping annotations reconstructs exactly the matched subsequence,
/// which must be a common subsequence of maximal length
#[test]
fn test_align_strippedLiterals_shouldBeMaximalCommonSubsequence() {
    let cases = [
        ("駆け抜けるシューティングスター", "かけぬけるしゅーてぃんぐすたー"),
        ("追いかけて星になる", "おいかけてほしになる"),
        ("何も見えない夜空", "なにもみえないよぞら"),
        ("ひとすじの流れ星", "ひとすじのながれぼし"),
        ("abc", "xyz"),
        ("", "よみ"),
        ("漢字", ""),
    ];

    for (original, reading) in cases {
        let aligned = align(original, reading);
        let literals = strip_annotations(&aligned);
        assert!(
            is_subsequence(&literals, original),
            "{:?} not a subsequence of {:?}",
            literals,
            original
        );
        assert!(
            is_subsequence(&literals, reading),
            "{:?} not a subsequence of {:?}",
            literals,
            reading
        );
        assert_eq!(
            literals.chars().count(),
            lcs_len(original, reading),
            "alignment of {:?}/{:?} missed matches",
            original,
            reading
        );
    }
}

/// Brackets always come out balanced, even for insertions at the line head
#[test]
fn test_align_withInsertionAtStart_shouldBalanceBrackets() {
    for (original, reading) in [("あ", "くあ"), ("猫", "ねこ"), ("星空", "ほしぞら")] {
        let aligned = align(original, reading);
        let opens = aligned.matches('[').count();
        let closes = aligned.matches(']').count();
        assert_eq!(opens, closes, "unbalanced brackets in {:?}", aligned);
        assert!(opens >= 1);
    }
}

/// An empty reading consumes the original with no output
#[test]
fn test_align_withEmptyReading_shouldProduceEmpty() {
    assert_eq!(align("漢字", ""), "");
    assert_eq!(align("", "よみ"), "[よみ]");
}
