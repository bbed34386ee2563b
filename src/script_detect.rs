use character_converter::traditional_to_simplified;

// @module: Unicode script classification for lyric candidate lines

/// Script tags a lyric line can carry. Predicates are non-exclusive:
/// a line may be both kana- and ideograph-bearing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScriptClass {
    /// Contains hiragana or katakana
    pub kana: bool,
    /// Contains a CJK unified ideograph
    pub ideograph: bool,
    /// Entirely ASCII (with at least one non-whitespace character)
    pub latin: bool,
    /// Has visible content but none of the tags above
    pub other: bool,
}

impl ScriptClass {
    /// True when no tag applies (empty or whitespace-only input)
    pub fn is_empty(&self) -> bool {
        !(self.kana || self.ideograph || self.latin || self.other)
    }
}

/// Checks if the given character is hiragana or katakana
pub fn is_kana(c: char) -> bool {
    ('\u{3040}'..='\u{309F}').contains(&c) || ('\u{30A0}'..='\u{30FF}').contains(&c)
}

/// Checks if the given character is a CJK unified ideograph, including the
/// extension blocks on the supplementary planes
pub fn is_ideograph(c: char) -> bool {
    matches!(c,
        '\u{4E00}'..='\u{9FAF}'
        | '\u{3400}'..='\u{4DBF}'
        | '\u{20000}'..='\u{2A6DF}'
        | '\u{2A700}'..='\u{2B73F}'
        | '\u{2B740}'..='\u{2B81F}'
        | '\u{2B820}'..='\u{2CEAF}')
}

/// Classify a text span into its script tag set.
///
/// Pure and total: the returned set is non-empty iff the string contains at
/// least one non-whitespace character.
pub fn classify(text: &str) -> ScriptClass {
    let mut class = ScriptClass::default();
    let mut has_visible = false;

    for c in text.chars() {
        if c.is_whitespace() {
            continue;
        }
        has_visible = true;
        if is_kana(c) {
            class.kana = true;
        }
        if is_ideograph(c) {
            class.ideograph = true;
        }
    }

    if has_visible && text.is_ascii() {
        class.latin = true;
    }
    if has_visible && !class.kana && !class.ideograph && !class.latin {
        class.other = true;
    }

    class
}

/// Converts katakana characters to their hiragana equivalents.
/// Characters outside the katakana block are left unchanged.
pub fn kana_to_hiragana(text: &str) -> String {
    text.chars()
        .map(|c| {
            if ('\u{30A1}'..='\u{30F6}').contains(&c) {
                let offset = c as u32 - 0x30A0;
                char::from_u32(0x3040 + offset).unwrap_or(c)
            } else {
                c
            }
        })
        .collect()
}

/// Canonical form used when deciding whether two candidate lines are the
/// same lyric: lowercased, katakana folded to hiragana, everything that is
/// not alphanumeric stripped.
pub fn normalized_form(text: &str) -> String {
    kana_to_hiragana(text)
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect()
}

/// True iff converting the string to simplified Chinese changes it, i.e. the
/// string carries at least one traditional-only character.
pub fn is_traditional_chinese(text: &str) -> bool {
    traditional_to_simplified(text) != text
}
