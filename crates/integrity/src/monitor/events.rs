//! Classification of file system events

use notify::event::ModifyKind;
use notify::EventKind;

/// Whether an event should trigger a hash recheck
///
/// Content changes always do. Creations, removals and renames only matter
/// when file paths are bound into the hash.
pub(crate) fn requires_recheck(kind: &EventKind, structural: bool) -> bool {
    match kind {
        EventKind::Modify(ModifyKind::Name(_)) => structural,
        EventKind::Modify(ModifyKind::Metadata(_)) => false,
        EventKind::Modify(_) => true,
        EventKind::Create(_) | EventKind::Remove(_) => structural,
        EventKind::Any | EventKind::Access(_) | EventKind::Other => false,
    }
}
