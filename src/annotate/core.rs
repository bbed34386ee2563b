use std::sync::Arc;
use log::{debug, info, warn};

use crate::alignment::align;
use crate::app_config::{Config, OutputKind};
use crate::lyric_parser::TimestampGroup;
use crate::providers::{ChineseTranslator, PhoneticConverter};
use crate::resolver::{ArrangeError, ArrangeOptions, ResolvedRow, arrange};

use super::batch::convert_with_recovery;

/// Outcome of annotating one parsed lyric block
#[derive(Debug, Default)]
pub struct AnnotationReport {
    /// Assembled synced output lines, `[mm:ss.mmm]text`
    pub lines: Vec<String>,
    /// Rows that made it through arrangement
    pub rows: usize,
    /// Groups skipped as ambiguous or unresolvable
    pub skipped_groups: usize,
    /// Structural-drift events: failed count invariants plus provider lines
    /// that never resolved
    pub drift_events: usize,
    /// Duplicate candidates collapsed while arranging
    pub collapsed: usize,
}

impl AnnotationReport {
    /// True when every group resolved cleanly
    pub fn is_clean(&self) -> bool {
        self.skipped_groups == 0 && self.drift_events == 0
    }
}

/// Annotation service: turns timestamp groups into the final output block,
/// filling missing readings/romanizations/translations from the providers
pub struct AnnotationService {
    /// Phonetic reading backend
    converter: Arc<dyn PhoneticConverter>,
    /// Translation backend, absent when translation is local-only/disabled
    translator: Option<Arc<dyn ChineseTranslator>>,
    /// Output line kinds in emission order
    output_order: Vec<OutputKind>,
    /// Arrangement tunables
    arrange_options: ArrangeOptions,
    /// Lines per provider request
    batch_size: usize,
    /// Attempts per chunk before giving up on it
    max_attempts: u32,
}

impl AnnotationService {
    /// Create a service from configuration and provider instances
    pub fn new(
        config: &Config,
        converter: Arc<dyn PhoneticConverter>,
        translator: Option<Arc<dyn ChineseTranslator>>,
    ) -> Self {
        Self {
            converter,
            translator,
            output_order: config.output_order.clone(),
            arrange_options: ArrangeOptions {
                translation_enabled: config.translation_enabled(),
                chinese_confidence_floor: config.heuristics.chinese_confidence_floor,
            },
            batch_size: config.provider.batch_size,
            max_attempts: config.provider.max_retries.saturating_add(1),
        }
    }

    /// Annotate a block of timestamp groups.
    ///
    /// Ambiguous and unresolvable groups are skipped and counted; drift is
    /// counted; neither aborts the block. Provider calls only happen for
    /// fields no candidate line already supplied.
    pub async fn annotate(&self, groups: &[TimestampGroup]) -> AnnotationReport {
        let mut report = AnnotationReport::default();
        let mut rows: Vec<ResolvedRow> = Vec::new();

        for group in groups {
            match arrange(group, &self.arrange_options) {
                Ok(row) => {
                    let fields = [&row.root, &row.translation, &row.kana, &row.romanization]
                        .iter()
                        .filter(|field| !field.is_empty())
                        .count();
                    report.collapsed += group.lines.len().saturating_sub(fields);
                    rows.push(row);
                }
                Err(error @ ArrangeError::Unresolvable { .. }) => {
                    warn!("Skipping group: {}", error);
                    report.skipped_groups += 1;
                }
                Err(error @ ArrangeError::StructuralDrift { .. }) => {
                    warn!("Dropping row: {}", error);
                    report.drift_events += 1;
                }
            }
        }

        if self.output_order.contains(&OutputKind::Hira) {
            report.drift_events += self.fill_kana(&mut rows).await;
        }
        if self.output_order.contains(&OutputKind::Roma) {
            report.drift_events += self.fill_romanization(&mut rows).await;
        }
        if self.output_order.contains(&OutputKind::Chin) {
            report.drift_events += self.fill_translations(&mut rows).await;
            realign_lagging_translations(&mut rows);
        }

        report.rows = rows.len();
        report.lines = self.assemble(&rows);
        report
    }

    /// Derive kana readings where no candidate supplied one. The reading is
    /// rendered through the aligner so divergent spans come out bracketed.
    async fn fill_kana(&self, rows: &mut [ResolvedRow]) -> usize {
        let wanting: Vec<usize> = rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.kana.is_empty() && !row.root.is_empty())
            .map(|(index, _)| index)
            .collect();
        if wanting.is_empty() {
            return 0;
        }

        let roots: Vec<String> = wanting.iter().map(|&i| rows[i].root.clone()).collect();
        let converter = Arc::clone(&self.converter);
        let outcome = convert_with_recovery(&roots, self.batch_size, self.max_attempts, |chunk| {
            let converter = Arc::clone(&converter);
            async move { converter.to_kana(&chunk).await }
        })
        .await;

        for (slot, reading) in wanting.iter().zip(outcome.resolved) {
            if let Some(reading) = reading {
                let row = &mut rows[*slot];
                row.kana = if reading == row.root {
                    reading
                } else {
                    align(&row.root, &reading)
                };
            }
        }
        outcome.unresolved
    }

    /// Derive romanizations where no candidate supplied one
    async fn fill_romanization(&self, rows: &mut [ResolvedRow]) -> usize {
        let wanting: Vec<usize> = rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.romanization.is_empty() && !row.root.is_empty())
            .map(|(index, _)| index)
            .collect();
        if wanting.is_empty() {
            return 0;
        }

        let roots: Vec<String> = wanting.iter().map(|&i| rows[i].root.clone()).collect();
        let converter = Arc::clone(&self.converter);
        let outcome = convert_with_recovery(&roots, self.batch_size, self.max_attempts, |chunk| {
            let converter = Arc::clone(&converter);
            async move { converter.to_romanization(&chunk).await }
        })
        .await;

        for (slot, romanization) in wanting.iter().zip(outcome.resolved) {
            if let Some(romanization) = romanization {
                rows[*slot].romanization = romanization;
            }
        }
        outcome.unresolved
    }

    /// Translate roots that came without a translation candidate. Without a
    /// translator only pre-existing candidate translations are emitted.
    async fn fill_translations(&self, rows: &mut [ResolvedRow]) -> usize {
        let Some(translator) = &self.translator else {
            debug!("No translator configured, keeping candidate translations only");
            return 0;
        };

        let wanting: Vec<usize> = rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.translation.is_empty() && !row.root.is_empty())
            .map(|(index, _)| index)
            .collect();
        if wanting.is_empty() {
            return 0;
        }

        let roots: Vec<String> = wanting.iter().map(|&i| rows[i].root.clone()).collect();
        let translator = Arc::clone(translator);
        let outcome = convert_with_recovery(&roots, self.batch_size, self.max_attempts, |chunk| {
            let translator = Arc::clone(&translator);
            async move { translator.translate(&chunk).await }
        })
        .await;

        for (slot, translation) in wanting.iter().zip(outcome.resolved) {
            if let Some(translation) = translation {
                rows[*slot].translation = translation;
            }
        }
        outcome.unresolved
    }

    /// Assemble the output block in configured order, one tagged line per
    /// non-empty field, suppressing readings/romanizations equal to the root
    /// and exact duplicate output lines
    fn assemble(&self, rows: &[ResolvedRow]) -> Vec<String> {
        let mut lines: Vec<String> = Vec::new();

        for row in rows {
            let tag = row.time.as_tag();
            for kind in &self.output_order {
                let text = match kind {
                    OutputKind::Kanji => (!row.root.is_empty()).then_some(&row.root),
                    OutputKind::Hira => {
                        (!row.kana.is_empty() && row.kana != row.root).then_some(&row.kana)
                    }
                    OutputKind::Chin => (!row.translation.is_empty()).then_some(&row.translation),
                    OutputKind::Roma => (!row.romanization.is_empty()
                        && row.romanization != row.root)
                        .then_some(&row.romanization),
                };
                if let Some(text) = text {
                    let line = format!("{}{}", tag, text);
                    if !lines.contains(&line) {
                        lines.push(line);
                    }
                }
            }
        }

        lines
    }
}

/// Some sources carry translations shifted down by one timestamp (the first
/// row has none, one trailing row has only a translation). Shift the
/// translation column up one row and drop the dangling tail.
fn realign_lagging_translations(rows: &mut Vec<ResolvedRow>) {
    let lagging = match (rows.first(), rows.last()) {
        (Some(first), Some(last)) if rows.len() > 1 => {
            first.translation.is_empty()
                && !first.root.is_empty()
                && !last.translation.is_empty()
                && last.root.is_empty()
        }
        _ => false,
    };
    if !lagging {
        return;
    }

    for i in 0..rows.len() - 1 {
        rows[i].translation = rows[i + 1].translation.clone();
    }
    rows.pop();
    info!("Realigned lagging translation rows");
}
