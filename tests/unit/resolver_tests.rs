/*!
 * Tests for root resolution and row arrangement
 */

use jlrc::lyric_parser::{TimeCode, TimestampGroup};
use jlrc::resolver::{ArrangeError, ArrangeOptions, RootChoice, arrange, choose_root};

fn group_of(lines: &[&str]) -> TimestampGroup {
    TimestampGroup {
        time: TimeCode::from_parts(0, 1, 0),
        lines: lines.iter().map(|s| s.to_string()).collect(),
    }
}

fn strings(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|s| s.to_string()).collect()
}

/// A kana+han line wins immediately, regardless of position
#[test]
fn test_choose_root_withMixedLineLast_shouldStillWin() {
    let candidates = strings(&["zh fan yi", "追逐夜空中飞掠的流星", "流れ星になる"]);
    assert_eq!(
        choose_root(&candidates),
        RootChoice::Chosen("流れ星になる".to_string())
    );
}

/// Traditional-script candidates outrank kana-only ones (documented order)
#[test]
fn test_choose_root_withTraditionalAndKana_shouldPreferTraditional() {
    let candidates = strings(&["ながれぼし", "永遠的夢"]);
    assert_eq!(
        choose_root(&candidates),
        RootChoice::Chosen("永遠的夢".to_string())
    );
}

/// Two candidates with equal normalized forms collapse to the shorter
#[test]
fn test_choose_root_withNormalizedPair_shouldTakeShorter() {
    let candidates = strings(&["ながれぼし！！", "ながれぼし"]);
    assert_eq!(
        choose_root(&candidates),
        RootChoice::Chosen("ながれぼし".to_string())
    );
}

/// Katakana and hiragana variants normalize together
#[test]
fn test_choose_root_withKatakanaVariant_shouldCollapse() {
    let candidates = strings(&["ナガレボシ", "ながれぼし"]);
    assert!(matches!(choose_root(&candidates), RootChoice::Chosen(_)));
}

/// Three mutually dissimilar candidates in one bucket are ambiguous
#[test]
fn test_choose_root_withThreeDissimilar_shouldBeAmbiguous() {
    let candidates = strings(&["hitotsu", "futatsu", "mittsu"]);
    assert_eq!(choose_root(&candidates), RootChoice::Ambiguous);
}

/// Repeated calls on the same ordered input yield the same outcome
#[test]
fn test_choose_root_isDeterministic() {
    let ambiguous = strings(&["alpha", "beta", "gamma"]);
    let chosen = strings(&["ひかり", "hikari"]);
    for _ in 0..5 {
        assert_eq!(choose_root(&ambiguous), RootChoice::Ambiguous);
        assert_eq!(choose_root(&chosen), RootChoice::Chosen("ひかり".to_string()));
    }
}

/// Empty candidate list resolves to the empty outcome
#[test]
fn test_choose_root_withNoCandidates_shouldBeEmpty() {
    assert_eq!(choose_root(&[]), RootChoice::Empty);
}

/// The spec example: kanji, reading and romaji with translation disabled
#[test]
fn test_arrange_withKanjiKanaRomaji_shouldFillThreeSlots() {
    let options = ArrangeOptions {
        translation_enabled: false,
        ..ArrangeOptions::default()
    };
    let row = arrange(&group_of(&["猫", "ねこ", "Neko"]), &options).unwrap();
    assert_eq!(row.root, "猫");
    assert_eq!(row.kana, "ねこ");
    assert_eq!(row.romanization, "Neko");
    assert_eq!(row.translation, "");
}

/// With translation enabled, a bare-ideograph simplified line is a translation
#[test]
fn test_arrange_withMixedRootAndChineseLine_shouldAssignTranslation() {
    let row = arrange(
        &group_of(&["追いかけて星になる", "直到成为最闪亮的自己"]),
        &ArrangeOptions::default(),
    )
    .unwrap();
    assert_eq!(row.root, "追いかけて星になる");
    assert_eq!(row.translation, "直到成为最闪亮的自己");
}

/// A leftover traditional line competes for the translation slot
#[test]
fn test_arrange_withTraditionalTranslation_shouldFillTranslationSlot() {
    let row = arrange(
        &group_of(&["追いかけて星になる", "直到成為最閃亮的自己"]),
        &ArrangeOptions::default(),
    )
    .unwrap();
    assert_eq!(row.root, "追いかけて星になる");
    assert_eq!(row.translation, "直到成為最閃亮的自己");
}

/// A matched duplicate pair collapses and keeps the count invariant intact
#[test]
fn test_arrange_withCollapsiblePair_shouldCollapseExactlyOne() {
    let row = arrange(
        &group_of(&["流れ星", "ながれぼし", "ながれぼし！"]),
        &ArrangeOptions::default(),
    )
    .unwrap();
    // 3 candidates, 1 collapse, 2 non-empty fields
    assert_eq!(row.root, "流れ星");
    assert_eq!(row.kana, "ながれぼし");
    assert_eq!(row.translation, "");
    assert_eq!(row.romanization, "");
}

/// Bucket overflow refuses the group instead of guessing
#[test]
fn test_arrange_withThreeRomajiLines_shouldBeUnresolvable() {
    let result = arrange(
        &group_of(&["line one", "line two", "line three"]),
        &ArrangeOptions::default(),
    );
    assert!(matches!(result, Err(ArrangeError::Unresolvable { .. })));
}

/// An impossible confidence floor disables promotion and the group refuses
#[test]
fn test_arrange_withUnpromotableTranslations_shouldBeUnresolvable() {
    let options = ArrangeOptions {
        chinese_confidence_floor: 2.0,
        ..ArrangeOptions::default()
    };
    let result = arrange(
        &group_of(&["我们的羁绊就在这里", "每当站起身就会闪耀的小星星"]),
        &options,
    );
    assert!(matches!(result, Err(ArrangeError::Unresolvable { .. })));
}

/// A single line group always resolves with that line as root
#[test]
fn test_arrange_withSingleLine_shouldUseItAsRoot() {
    for line in ["ひとすじの流れ星", "one line", "煌めけ"] {
        let row = arrange(&group_of(&[line]), &ArrangeOptions::default()).unwrap();
        assert_eq!(row.root, line);
    }
}

/// Errors carry the group timecode for logging
#[test]
fn test_arrange_errorDisplay_shouldMentionTime() {
    let error = arrange(
        &group_of(&["one", "two", "three"]),
        &ArrangeOptions::default(),
    )
    .unwrap_err();
    assert!(error.to_string().contains("00:01.000"));
}
