use whatlang::Lang;

/// Language identification utilities
///
/// This module wraps the whatlang detector behind the two questions the
/// resolver actually asks: "how confident are we this line is Chinese?" and
/// "what language does this line look like?". Detection is best-effort and
/// never fails; an undetectable line simply yields `None`.
/// Detect the most likely language of a text span with its confidence (0..1)
pub fn detect_language(text: &str) -> Option<(Lang, f64)> {
    whatlang::detect(text).map(|info| (info.lang(), info.confidence()))
}

/// Confidence that a line is Mandarin Chinese, `None` when the detector
/// identifies another language or cannot decide
pub fn chinese_confidence(text: &str) -> Option<f64> {
    match detect_language(text) {
        Some((Lang::Cmn, confidence)) => Some(confidence),
        _ => None,
    }
}
