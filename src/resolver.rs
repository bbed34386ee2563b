use log::debug;
use thiserror::Error;

use crate::language_utils;
use crate::lyric_parser::{TimeCode, TimestampGroup};
use crate::script_detect::{classify, is_traditional_chinese, normalized_form};

// @module: Canonical-line resolution and structured row arrangement

/// Outcome of picking the canonical original-language line from a set of
/// duplicate candidates
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RootChoice {
    /// One candidate was unambiguously the original lyric
    Chosen(String),
    /// No candidate qualified at all
    Empty,
    /// The consulted bucket held conflicting candidates; the caller should
    /// log and skip rather than guess
    Ambiguous,
}

/// One fully arranged output row for a single timecode. Any field may be
/// empty; a field is non-empty only if some input candidate was assigned
/// that role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRow {
    /// Shared timecode of the group
    pub time: TimeCode,
    /// Canonical original-language line
    pub root: String,
    /// Chinese translation line
    pub translation: String,
    /// Kana reading line
    pub kana: String,
    /// Romanization line
    pub romanization: String,
}

/// Non-fatal arrangement failures. Callers skip the group and keep going;
/// neither variant ever aborts a file.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArrangeError {
    /// Candidates could not be assigned to roles without guessing
    #[error("unresolvable group at {time}: {reason}")]
    Unresolvable {
        /// Timecode of the group
        time: TimeCode,
        /// Human-readable cause
        reason: String,
    },

    /// The lossless-count invariant failed: the arranged fields do not
    /// account for every input candidate
    #[error("structural drift at {time}: {fields} fields from {candidates} candidates")]
    StructuralDrift {
        /// Timecode of the group
        time: TimeCode,
        /// Non-empty fields produced
        fields: usize,
        /// Input candidates consumed
        candidates: usize,
    },
}

/// Tunables for arrangement
#[derive(Debug, Clone)]
pub struct ArrangeOptions {
    /// Whether Chinese-translation handling is active. When it is not,
    /// ideograph-only candidates are original-lyric material rather than
    /// translations.
    pub translation_enabled: bool,
    /// Minimum language-id confidence for promoting a translation candidate
    /// to root
    pub chinese_confidence_floor: f64,
}

impl Default for ArrangeOptions {
    fn default() -> Self {
        ArrangeOptions {
            translation_enabled: true,
            chinese_confidence_floor: 0.0,
        }
    }
}

/// Resolve a bucket of same-role candidates down to one item.
/// One item wins outright; two items whose normalized forms agree collapse
/// to the shorter (the longer is assumed to carry bracket/whitespace noise);
/// anything else is ambiguous.
fn resolve_bucket(bucket: &[String]) -> RootChoice {
    match bucket {
        [] => RootChoice::Empty,
        [only] => RootChoice::Chosen(only.clone()),
        [first, second] => {
            if normalized_form(first) == normalized_form(second) {
                let shorter = if second.chars().count() < first.chars().count() {
                    second
                } else {
                    first
                };
                RootChoice::Chosen(shorter.clone())
            } else {
                RootChoice::Ambiguous
            }
        }
        _ => RootChoice::Ambiguous,
    }
}

/// Pick the canonical original-language line among duplicate candidates.
///
/// A line bearing both kana and ideographs is taken as the original lyric
/// immediately. Otherwise candidates are bucketed and the first non-empty
/// bucket in priority order `[traditional, kana-only, other-ideograph,
/// other]` is resolved. Traditional-script candidates deliberately outrank
/// kana-only ones; see DESIGN.md. Meaningful ambiguity only arises in groups
/// of three or more candidates.
pub fn choose_root(candidates: &[String]) -> RootChoice {
    let mut traditional: Vec<String> = Vec::new();
    let mut kana_only: Vec<String> = Vec::new();
    let mut other_ideograph: Vec<String> = Vec::new();
    let mut other: Vec<String> = Vec::new();

    for candidate in candidates {
        let class = classify(candidate);
        if class.kana && class.ideograph {
            return RootChoice::Chosen(candidate.clone());
        } else if class.kana {
            kana_only.push(candidate.clone());
        } else if class.ideograph {
            if is_traditional_chinese(candidate) {
                traditional.push(candidate.clone());
            } else {
                other_ideograph.push(candidate.clone());
            }
        } else {
            other.push(candidate.clone());
        }
    }

    for bucket in [&traditional, &kana_only, &other_ideograph, &other] {
        if !bucket.is_empty() {
            return resolve_bucket(bucket);
        }
    }

    RootChoice::Empty
}

/// Candidate roles recognized while arranging a timestamp group
struct Buckets {
    root: Vec<String>,
    kana_only: Vec<String>,
    traditional: Vec<String>,
    translation: Vec<String>,
    other: Vec<String>,
}

impl Buckets {
    fn classify_group(group: &TimestampGroup, options: &ArrangeOptions) -> Self {
        let mut buckets = Buckets {
            root: Vec::new(),
            kana_only: Vec::new(),
            traditional: Vec::new(),
            translation: Vec::new(),
            other: Vec::new(),
        };

        for line in &group.lines {
            let class = classify(line);
            if class.kana && class.ideograph {
                buckets.root.push(line.clone());
            } else if class.kana {
                buckets.kana_only.push(line.clone());
            } else if class.ideograph {
                if is_traditional_chinese(line) {
                    buckets.traditional.push(line.clone());
                } else if options.translation_enabled {
                    buckets.translation.push(line.clone());
                } else {
                    // With translation handling off there is no translation
                    // role; a bare-ideograph line is original-lyric material
                    buckets.root.push(line.clone());
                }
            } else {
                buckets.other.push(line.clone());
            }
        }

        buckets
    }
}

/// Fill one output slot from its candidate bucket.
/// Returns the chosen text and how many duplicates were collapsed into it.
fn fill_slot(
    time: TimeCode,
    slot_name: &str,
    bucket: &[String],
) -> Result<(String, usize), ArrangeError> {
    match resolve_bucket(bucket) {
        RootChoice::Empty => Ok((String::new(), 0)),
        RootChoice::Chosen(text) => Ok((text, bucket.len().saturating_sub(1))),
        RootChoice::Ambiguous => Err(ArrangeError::Unresolvable {
            time,
            reason: format!("{} slot holds {} conflicting candidates", slot_name, bucket.len()),
        }),
    }
}

/// Arrange a raw timestamp group into one structured row, or refuse.
///
/// Candidates are classified into role buckets; if no root candidate was
/// found, a translation candidate with a uniquely highest Chinese confidence
/// is promoted, and failing that the remaining non-translation candidates go
/// through [`choose_root`]. Each slot then collapses to at most one line.
/// The row is accepted only when every input candidate is accounted for:
/// `non-empty fields == candidates - collapsed duplicates`.
pub fn arrange(
    group: &TimestampGroup,
    options: &ArrangeOptions,
) -> Result<ResolvedRow, ArrangeError> {
    let candidates_total = group.lines.len();
    let mut buckets = Buckets::classify_group(group, options);

    // Promotion: among several translation candidates, a uniquely
    // best-scoring Chinese line stands in for a missing root
    if buckets.root.is_empty() && buckets.translation.len() >= 2 {
        if let Some(index) = most_confident_chinese(&buckets.translation, options) {
            let promoted = buckets.translation.remove(index);
            debug!("Promoted translation candidate to root at {}: {}", group.time, promoted);
            buckets.root.push(promoted);
        }
    }

    // Fallback: resolve a root among the non-translation candidates with the
    // documented bucket priority
    if buckets.root.is_empty() {
        let mut remaining: Vec<String> = Vec::new();
        remaining.extend(buckets.traditional.iter().cloned());
        remaining.extend(buckets.kana_only.iter().cloned());
        remaining.extend(buckets.other.iter().cloned());

        match choose_root(&remaining) {
            RootChoice::Chosen(text) => {
                for bucket in [
                    &mut buckets.traditional,
                    &mut buckets.kana_only,
                    &mut buckets.other,
                ] {
                    if let Some(pos) = bucket.iter().position(|line| line == &text) {
                        bucket.remove(pos);
                        break;
                    }
                }
                buckets.root.push(text);
            }
            RootChoice::Empty => {}
            RootChoice::Ambiguous => {
                return Err(ArrangeError::Unresolvable {
                    time: group.time,
                    reason: "no root candidate and fallback resolution is ambiguous".to_string(),
                });
            }
        }
    }

    // Leftover traditional-script lines compete for the translation slot
    let mut translation_pool = buckets.translation.clone();
    translation_pool.extend(buckets.traditional.iter().cloned());

    let mut collapsed = 0;
    let (root, n) = fill_slot(group.time, "root", &buckets.root)?;
    collapsed += n;
    let (translation, n) = fill_slot(group.time, "translation", &translation_pool)?;
    collapsed += n;
    let (kana, n) = fill_slot(group.time, "kana", &buckets.kana_only)?;
    collapsed += n;
    let (romanization, n) = fill_slot(group.time, "romanization", &buckets.other)?;
    collapsed += n;

    let fields = [&root, &translation, &kana, &romanization]
        .iter()
        .filter(|field| !field.is_empty())
        .count();

    if fields != candidates_total - collapsed {
        return Err(ArrangeError::StructuralDrift {
            time: group.time,
            fields,
            candidates: candidates_total,
        });
    }

    Ok(ResolvedRow {
        time: group.time,
        root,
        translation,
        kana,
        romanization,
    })
}

/// Index of the translation candidate with a strictly highest Chinese
/// confidence, if any clears the floor
fn most_confident_chinese(candidates: &[String], options: &ArrangeOptions) -> Option<usize> {
    let mut scored: Vec<(usize, f64)> = candidates
        .iter()
        .enumerate()
        .filter_map(|(index, text)| {
            language_utils::chinese_confidence(text)
                .filter(|confidence| *confidence >= options.chinese_confidence_floor)
                .map(|confidence| (index, confidence))
        })
        .collect();

    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    match scored.as_slice() {
        [] => None,
        [(index, _)] => Some(*index),
        [(best, best_score), (_, runner_up), ..] => {
            if best_score > runner_up {
                Some(*best)
            } else {
                None
            }
        }
    }
}
