//! Process-wide allocation of report filename timestamps.

use std::sync::atomic::{AtomicU64, Ordering};

static LAST_EPOCH_MS: AtomicU64 = AtomicU64::new(0);

/// Return a millisecond stamp that is `>= now_ms` and strictly greater than
/// every stamp handed out before in this process.
pub fn allocate_epoch_ms(now_ms: u64) -> u64 {
    let previous = LAST_EPOCH_MS
        .fetch_update(Ordering::AcqRel, Ordering::Acquire, |last| {
            Some(now_ms.max(last.saturating_add(1)))
        })
        .unwrap_or_else(|last| last);
    now_ms.max(previous.saturating_add(1))
}
