/*!
 * End-to-end tests: parse, group, arrange and annotate a realistic block
 */

use std::sync::Arc;

use jlrc::annotate::AnnotationService;
use jlrc::app_config::Config;
use jlrc::lyric_parser::{self, ParserOptions};
use jlrc::providers::kks::KakasiConverter;

const BILINGUAL_BLOCK: &str = "\
[ar:伊達さゆり]
[al:朗朗]
[00:02.340]Tiny Stars - 伊達さゆり/Liyuu
[00:03.190]駆け抜けるシューティングスター
[00:03.920]追いかけて星になる
[00:07.430]煌めけ
[00:03.190]追逐夜空中飞掠的流星
[00:03.920]直到成为最闪亮的自己
[00:07.430]闪耀吧
[00:03.920]o i ka ke te ho shi ni na ru
";

/// The bilingual sample resolves every timestamp into one structured row
#[tokio::test]
async fn test_workflow_withBilingualBlock_shouldAnnotateCleanly() {
    let parsed = lyric_parser::parse_with(BILINGUAL_BLOCK, &ParserOptions::default());
    assert_eq!(parsed.metadata, vec!["[ar:伊達さゆり]", "[al:朗朗]"]);
    // the " - " credit line is dropped
    assert!(parsed.pairs.iter().all(|pair| !pair.text.contains(" - ")));
    assert!(lyric_parser::looks_japanese(&parsed.pairs, 16, 3));

    let groups = lyric_parser::group(&parsed.pairs);
    assert_eq!(groups.len(), 3);
    // groups merge the Japanese and Chinese blocks by timecode
    assert_eq!(groups[0].lines.len(), 2);
    assert_eq!(groups[1].lines.len(), 3);

    let config = {
        let mut config = Config::default();
        config.output_order = Config::parse_order("chin-hira-kanji-roma").unwrap();
        config
    };
    let service = AnnotationService::new(&config, Arc::new(KakasiConverter::new()), None);
    let report = service.annotate(&groups).await;

    assert!(report.is_clean(), "skipped {} drift {}", report.skipped_groups, report.drift_events);
    assert_eq!(report.rows, 3);

    // row at 00:03.920 reuses all three candidates
    let at_392: Vec<&String> = report
        .lines
        .iter()
        .filter(|line| line.starts_with("[00:03.920]"))
        .collect();
    assert!(at_392.iter().any(|line| line.ends_with("追いかけて星になる")));
    assert!(at_392.iter().any(|line| line.ends_with("直到成为最闪亮的自己")));
    assert!(at_392.iter().any(|line| line.ends_with("o i ka ke te ho shi ni na ru")));

    // derived readings carry bracketed corrections for kanji spans
    let reading = report
        .lines
        .iter()
        .find(|line| line.starts_with("[00:03.190]") && line.matches('[').count() >= 2);
    assert!(reading.is_some(), "no derived reading in {:?}", report.lines);
}

/// Output lines reconstruct as valid input: the emitted block reparses
#[tokio::test]
async fn test_workflow_outputBlock_shouldReparse() {
    let parsed = lyric_parser::parse_with(BILINGUAL_BLOCK, &ParserOptions::default());
    let groups = lyric_parser::group(&parsed.pairs);

    let config = {
        let mut config = Config::default();
        config.output_order = Config::parse_order("kanji-hira").unwrap();
        config
    };
    let service = AnnotationService::new(&config, Arc::new(KakasiConverter::new()), None);
    let report = service.annotate(&groups).await;

    let block = report.lines.join("\n");
    let reparsed = lyric_parser::parse_with(&block, &ParserOptions::default());
    assert!(reparsed.invalid.is_empty(), "{:?}", reparsed.invalid);
    assert!(!reparsed.pairs.is_empty());
    assert!(reparsed.pairs.iter().all(|pair| !pair.text.is_empty()));
}
