/*!
 * Tests for provider implementations
 */

use jlrc::app_config::ProviderSettings;
use jlrc::providers::PhoneticConverter;
use jlrc::providers::deepseek::DeepSeekClient;
use jlrc::providers::kks::KakasiConverter;

/// The local converter always keeps the line count
#[tokio::test]
async fn test_kakasi_to_kana_withManyLines_shouldKeepCount() {
    let converter = KakasiConverter::new();
    let lines: Vec<String> = [
        "駆け抜けるシューティングスター",
        "追いかけて星になる",
        "煌めけ",
        "",
        "Neko desu",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    let kana = converter.to_kana(&lines).await.unwrap();
    let roma = converter.to_romanization(&lines).await.unwrap();
    assert_eq!(kana.len(), lines.len());
    assert_eq!(roma.len(), lines.len());
}

/// Hiragana input passes through the kana conversion unchanged
#[tokio::test]
async fn test_kakasi_to_kana_withHiraganaInput_shouldBeIdentity() {
    let converter = KakasiConverter::new();
    let kana = converter
        .to_kana(&["ひとすじのながれぼし".to_string()])
        .await
        .unwrap();
    assert_eq!(kana[0], "ひとすじのながれぼし");
}

/// Kanji input comes back as kana
#[tokio::test]
async fn test_kakasi_to_kana_withKanjiInput_shouldProduceKana() {
    let converter = KakasiConverter::new();
    let kana = converter.to_kana(&["星".to_string()]).await.unwrap();
    assert!(kana[0].chars().all(jlrc::script_detect::is_kana));
    assert_ne!(kana[0], "星");
}

/// Romanization output is ASCII
#[tokio::test]
async fn test_kakasi_to_romanization_withJapaneseInput_shouldBeAscii() {
    let converter = KakasiConverter::new();
    let roma = converter
        .to_romanization(&["流れ星".to_string()])
        .await
        .unwrap();
    assert!(roma[0].is_ascii(), "{:?}", roma[0]);
}

/// Client construction from settings needs no network
#[test]
fn test_deepseek_client_construction_shouldNotTouchNetwork() {
    let settings = ProviderSettings {
        api_key: "sk-test".to_string(),
        ..ProviderSettings::default()
    };
    let _client = DeepSeekClient::new(&settings);
}
