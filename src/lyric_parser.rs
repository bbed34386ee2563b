use std::collections::HashMap;
use std::fmt;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::script_detect;

// @module: LRC lyric parsing and per-timestamp grouping

// @const: Synced timestamp tag, minutes variable-width, ms 1-3 digits optional
static TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[(\d+):(\d{1,2})(?:[.:](\d{1,3}))?\]").unwrap()
});

// @const: Non-numeric metadata tag spanning the whole line, e.g. [ar:artist]
static METADATA_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\[([A-Za-z]+):(.*)\]$").unwrap()
});

// @const: Lyricist/composer/singer credit markers
static CREDITS_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[词詞曲歌手]\s*[:：]").unwrap()
});

/// Normalized playback timestamp, ordered by its numeric value.
/// Displays as `mm:ss.mmm`; equal timecodes denote the same playback instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeCode {
    total_ms: u64,
}

impl TimeCode {
    /// Build a timecode from its minute/second/millisecond parts
    pub fn from_parts(minutes: u64, seconds: u64, millis: u64) -> Self {
        TimeCode {
            total_ms: minutes * 60_000 + seconds * 1_000 + millis,
        }
    }

    /// The `00:00.000` preamble timecode credits are forced to
    pub fn zero() -> Self {
        TimeCode { total_ms: 0 }
    }

    /// Total offset in milliseconds
    pub fn total_ms(&self) -> u64 {
        self.total_ms
    }

    /// The bracketed tag form, `[mm:ss.mmm]`
    pub fn as_tag(&self) -> String {
        format!("[{}]", self)
    }
}

impl fmt::Display for TimeCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let minutes = self.total_ms / 60_000;
        let seconds = (self.total_ms % 60_000) / 1_000;
        let millis = self.total_ms % 1_000;
        write!(f, "{:02}:{:02}.{:03}", minutes, seconds, millis)
    }
}

/// One parsed synced lyric line. Immutable once produced by parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LyricLine {
    /// Playback timestamp
    pub time: TimeCode,
    /// Lyric content with all tags stripped
    pub text: String,
}

/// All candidate lines sharing one timecode, in first-seen source order
#[derive(Debug, Clone)]
pub struct TimestampGroup {
    /// The shared timecode
    pub time: TimeCode,
    /// Candidate texts, exact duplicates collapsed
    pub lines: Vec<String>,
}

/// Result of splitting a raw lyric block. Parsing is total: every input line
/// either lands in one of these three buckets or is dropped by an explicit
/// noise rule; no line can make parsing fail.
#[derive(Debug, Default)]
pub struct ParsedLyrics {
    /// Metadata lines, kept verbatim (credits get a forced `[00:00.000]` tag)
    pub metadata: Vec<String>,
    /// `(timecode, content)` pairs, one per tag x content combination
    pub pairs: Vec<LyricLine>,
    /// Lines with no recognizable tag
    pub invalid: Vec<String>,
}

/// Tunable parsing constants (spec'd defaults, overridable from config)
#[derive(Debug, Clone)]
pub struct ParserOptions {
    /// Metadata lines at or above this length are treated as noise
    pub max_metadata_len: usize,
    /// Content equal to this token marks an intentionally blank synced line
    pub sentinel_token: String,
}

impl Default for ParserOptions {
    fn default() -> Self {
        ParserOptions {
            max_metadata_len: 100,
            sentinel_token: "//".to_string(),
        }
    }
}

/// Normalize exotic spaces to ASCII and collapse whitespace runs
fn normalize_whitespace(line: &str) -> String {
    let replaced: String = line
        .chars()
        .map(|c| if c == '\u{00A0}' || c == '\u{3000}' { ' ' } else { c })
        .collect();
    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parse a timestamp capture into a normalized timecode.
/// Minutes and seconds are taken at face value; a 1-3 digit millisecond part
/// is right-padded with zeros to 3 digits (`.5` means 500ms, not 5ms).
fn timecode_from_captures(caps: &regex::Captures) -> TimeCode {
    let minutes: u64 = caps[1].parse().unwrap_or(0);
    let seconds: u64 = caps[2].parse().unwrap_or(0);
    let millis: u64 = caps
        .get(3)
        .map(|m| {
            let mut digits = m.as_str().to_string();
            while digits.len() < 3 {
                digits.push('0');
            }
            digits[..3].parse().unwrap_or(0)
        })
        .unwrap_or(0);
    TimeCode::from_parts(minutes, seconds, millis)
}

/// Parse a raw lyric block with default options
pub fn parse(content: &str) -> ParsedLyrics {
    parse_with(content, &ParserOptions::default())
}

/// Parse a raw lyric block into metadata, synced pairs and invalid lines.
///
/// Per physical line, after whitespace normalization:
/// 1. `[letters:value]` lines are metadata, kept when the value is non-empty
///    and the line is short enough.
/// 2. All timestamp tags are extracted; the remainder is the content.
/// 3. Empty content, the sentinel token, and `" - "` credit/noise lines are
///    dropped.
/// 4. Credit-marker content is redirected to metadata at `00:00.000`;
///    `" / "` splits the content into alternatives.
/// 5. Every tag x content combination becomes one pair.
/// 6. Lines with no tag at all are collected as invalid.
pub fn parse_with(content: &str, options: &ParserOptions) -> ParsedLyrics {
    let mut parsed = ParsedLyrics::default();

    for raw_line in content.lines() {
        let line = normalize_whitespace(raw_line);
        if line.is_empty() {
            continue;
        }

        if let Some(caps) = METADATA_REGEX.captures(&line) {
            let value = caps.get(2).map_or("", |m| m.as_str()).trim();
            if !value.is_empty() && line.chars().count() < options.max_metadata_len {
                parsed.metadata.push(line);
            } else {
                debug!("Dropping degenerate metadata line: {}", line);
            }
            continue;
        }

        let tags: Vec<TimeCode> = TIMESTAMP_REGEX
            .captures_iter(&line)
            .map(|caps| timecode_from_captures(&caps))
            .collect();

        if tags.is_empty() {
            parsed.invalid.push(line);
            continue;
        }

        let text = TIMESTAMP_REGEX.replace_all(&line, "").trim().to_string();

        if text.is_empty() || text == options.sentinel_token || text.contains(" - ") {
            debug!("Dropping noise line: {}", line);
            continue;
        }

        if CREDITS_REGEX.is_match(&text) {
            // Credits sort as preamble, not as synced lyric
            parsed
                .metadata
                .push(format!("{}{}", TimeCode::zero().as_tag(), text));
            continue;
        }

        let alternatives: Vec<&str> = if text.contains(" / ") {
            text.split(" / ").collect()
        } else {
            vec![text.as_str()]
        };

        for tag in &tags {
            for alternative in &alternatives {
                parsed.pairs.push(LyricLine {
                    time: *tag,
                    text: alternative.to_string(),
                });
            }
        }
    }

    parsed
}

/// Group pairs by timecode in first-seen order, collapsing exact duplicates
pub fn group(pairs: &[LyricLine]) -> Vec<TimestampGroup> {
    let mut groups: Vec<TimestampGroup> = Vec::new();
    let mut index: HashMap<TimeCode, usize> = HashMap::new();

    for pair in pairs {
        match index.get(&pair.time) {
            Some(&i) => {
                if !groups[i].lines.iter().any(|line| line == &pair.text) {
                    groups[i].lines.push(pair.text.clone());
                }
            }
            None => {
                index.insert(pair.time, groups.len());
                groups.push(TimestampGroup {
                    time: pair.time,
                    lines: vec![pair.text.clone()],
                });
            }
        }
    }

    groups
}

/// Japanese gate: true iff at least `min_kana` of the first `window` pairs
/// carry kana. A block that fails this is not treated as Japanese lyrics.
pub fn looks_japanese(pairs: &[LyricLine], window: usize, min_kana: usize) -> bool {
    let mut kana_count = 0;
    for pair in pairs.iter().take(window) {
        if script_detect::classify(&pair.text).kana {
            kana_count += 1;
            if kana_count >= min_kana {
                return true;
            }
        }
    }
    false
}
