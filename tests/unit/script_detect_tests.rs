/*!
 * Tests for script classification
 */

use jlrc::script_detect::{
    classify, is_ideograph, is_kana, is_traditional_chinese, kana_to_hiragana, normalized_form,
};

/// Classification is total: non-empty tag set iff visible content
#[test]
fn test_classify_withVisibleContent_shouldNeverBeEmpty() {
    for text in ["a", "猫", "ね", "!", "§", "流れ星 Neko", "中文歌词"] {
        assert!(!classify(text).is_empty(), "{:?}", text);
    }
    for text in ["", " ", "\t", "\u{3000}\u{00A0}"] {
        assert!(classify(text).is_empty(), "{:?}", text);
    }
}

/// Kana and ideograph predicates are non-exclusive
#[test]
fn test_classify_withKanaAndHan_shouldTagBoth() {
    let class = classify("流れ星");
    assert!(class.kana);
    assert!(class.ideograph);
    assert!(!class.latin);
    assert!(!class.other);
}

/// Latin requires the whole string to be ASCII
#[test]
fn test_classify_withAsciiOnly_shouldTagLatin() {
    assert!(classify("na ga re bo shi").latin);
    assert!(!classify("naがre").latin);
}

/// Strings with none of the defined scripts fall into other
#[test]
fn test_classify_withCyrillic_shouldTagOther() {
    let class = classify("пример");
    assert!(class.other);
    assert!(!class.kana && !class.ideograph && !class.latin);
}

/// Supplementary-plane ideographs are recognized
#[test]
fn test_is_ideograph_withExtensionBlocks_shouldMatch() {
    assert!(is_ideograph('\u{4E00}'));
    assert!(is_ideograph('\u{3400}'));
    assert!(is_ideograph('\u{20000}'));
    assert!(!is_ideograph('あ'));
    assert!(is_kana('あ'));
    assert!(is_kana('ア'));
    assert!(!is_kana('A'));
}

/// Katakana folds to hiragana, everything else is untouched
#[test]
fn test_kana_to_hiragana_withMixedScripts_shouldFoldKatakanaOnly() {
    assert_eq!(kana_to_hiragana("シューティングスター"), "しゅーてぃんぐすたー");
    assert_eq!(kana_to_hiragana("星abc"), "星abc");
}

/// Normalized forms ignore case, width and punctuation
#[test]
fn test_normalized_form_withEquivalentVariants_shouldAgree() {
    assert_eq!(normalized_form("ネコだ！"), normalized_form("ねこだ"));
    assert_eq!(normalized_form("NEKO desu"), normalized_form("neko desu"));
    assert_ne!(normalized_form("ねこ"), normalized_form("いぬ"));
}

/// Traditional-only characters flip the simplification check
#[test]
fn test_is_traditional_chinese_withTraditionalForms_shouldDetect() {
    assert!(is_traditional_chinese("永遠的夢"));
    assert!(!is_traditional_chinese("永远的梦"));
    assert!(!is_traditional_chinese("na ga re"));
}
