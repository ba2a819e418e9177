/*!
 * Sentence reconstruction and cross-track alignment.
 *
 * Data flows one way: the target track is merged into sentences, then the
 * native track is matched onto those sentences and the gaps are repaired.
 */

pub mod sentences;
pub mod sync;

pub use sentences::SentenceReconstructor;
pub use sync::{repair_gaps, AlignedTracks, Synchronizer};
