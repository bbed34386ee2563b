/*!
 * Annotation service for resolved lyric rows.
 *
 * This module turns arranged timestamp groups into the final annotated LRC
 * block, deriving missing readings, romanizations and translations from a
 * provider. It is split into:
 *
 * - `core`: the annotation service and output assembly
 * - `batch`: chunked provider invocation with count-mismatch recovery
 */

pub use self::core::{AnnotationReport, AnnotationService};

pub mod batch;
pub mod core;
