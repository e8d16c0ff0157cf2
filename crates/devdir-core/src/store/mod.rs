// ── Observable directory state ──
//
// Watch-channel cells with push-based change notification.

mod cell;
mod directory_state;
mod fetch;

pub use directory_state::{DirectorySnapshot, DirectoryState, StateVersions};
