/*!
 * Session state for one opened media file.
 *
 * This module provides:
 * - The `Session` object holding aligned sentences, annotations and sub_delay
 * - Point, neighbor, phrase and range queries over that state
 * - Windowed subtitle export for generated clips
 */

pub mod models;
pub mod query;

// Re-export main types
pub use models::{Direction, QueryLine, QuerySettings, SessionStatus};
pub use query::{Session, LINE_BREAK};
