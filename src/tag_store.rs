use std::fs;
use std::path::Path;
use anyhow::{Context, Result, anyhow};
use lofty::config::WriteOptions;
use lofty::file::TaggedFileExt;
use lofty::probe::Probe;
use lofty::tag::{ItemKey, ItemValue, Tag, TagExt};
use log::debug;

// @module: Lyric text extraction from and injection into audio containers

/// Extensions the store knows how to read and write
pub const SUPPORTED_EXTENSIONS: [&str; 5] = ["flac", "mp3", "opus", "lrc", "txt"];

/// Lowercased extension of a path, empty when absent
fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

/// True when the path is a plain lyric text file rather than a container
fn is_plain_text(path: &Path) -> bool {
    matches!(extension_of(path).as_str(), "lrc" | "txt")
}

/// True when the store can handle this path at all
pub fn supported_format(path: &Path) -> bool {
    SUPPORTED_EXTENSIONS.contains(&extension_of(path).as_str())
}

/// Read the raw lyric text carried by a file.
///
/// Plain `.lrc`/`.txt` files are read as UTF-8. Audio containers are probed
/// with lofty and the text is taken from the `Lyrics` tag item of any tag,
/// falling back to any custom tag item whose key mentions "lyric". Returns
/// `Ok(None)` when the file carries no lyric text at all; the container
/// format itself stays opaque to the caller.
pub fn read_lyrics(path: &Path) -> Result<Option<String>> {
    if !supported_format(path) {
        return Err(anyhow!("Unsupported file format: {:?}", path));
    }

    if is_plain_text(path) {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read lyric file: {:?}", path))?;
        if text.trim().is_empty() {
            return Ok(None);
        }
        return Ok(Some(text));
    }

    let tagged_file = Probe::open(path)
        .with_context(|| format!("Failed to open audio file: {:?}", path))?
        .read()
        .with_context(|| format!("Failed to read audio tags: {:?}", path))?;

    for tag in tagged_file.tags() {
        if let Some(text) = tag.get_string(&ItemKey::Lyrics) {
            if !text.trim().is_empty() {
                return Ok(Some(text.to_string()));
            }
        }
    }

    // Some taggers stash lyrics under nonstandard keys
    for tag in tagged_file.tags() {
        for item in tag.items() {
            if let ItemKey::Unknown(key) = item.key() {
                if key.to_lowercase().contains("lyric") {
                    if let ItemValue::Text(text) = item.value() {
                        if !text.trim().is_empty() {
                            debug!("Using nonstandard lyric tag key '{}' in {:?}", key, path);
                            return Ok(Some(text.clone()));
                        }
                    }
                }
            }
        }
    }

    Ok(None)
}

/// Write lyric text back to a file, replacing whatever was there.
///
/// Plain files are rewritten wholesale; audio containers get the `Lyrics`
/// item of their primary tag replaced and the tag saved in place.
pub fn write_lyrics(path: &Path, text: &str) -> Result<()> {
    if !supported_format(path) {
        return Err(anyhow!("Unsupported file format: {:?}", path));
    }

    if is_plain_text(path) {
        fs::write(path, text)
            .with_context(|| format!("Failed to write lyric file: {:?}", path))?;
        return Ok(());
    }

    let mut tagged_file = Probe::open(path)
        .with_context(|| format!("Failed to open audio file: {:?}", path))?
        .read()
        .with_context(|| format!("Failed to read audio tags: {:?}", path))?;

    if tagged_file.primary_tag_mut().is_none() {
        let tag_type = tagged_file.primary_tag_type();
        tagged_file.insert_tag(Tag::new(tag_type));
    }

    let tag = tagged_file
        .primary_tag_mut()
        .ok_or_else(|| anyhow!("Could not create a tag for {:?}", path))?;
    tag.insert_text(ItemKey::Lyrics, text.to_string());
    tag.save_to_path(path, WriteOptions::default())
        .with_context(|| format!("Failed to save audio tags: {:?}", path))?;

    Ok(())
}
