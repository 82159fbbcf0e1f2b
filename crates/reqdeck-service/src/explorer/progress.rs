//! Busy indicator that is released on every exit path.

use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::watch;

use reqdeck_entity::ExplorerSnapshot;

/// Marks one operation as in flight for as long as it is alive.
///
/// The snapshot's `progressing` flag is recomputed from the in-flight count
/// on acquire and on drop, under the snapshot's write lock, so overlapping
/// operations keep the flag set until the last of them settles.
#[derive(Debug)]
pub struct ProgressGuard<'a> {
    in_flight: &'a AtomicUsize,
    snapshot: &'a watch::Sender<ExplorerSnapshot>,
}

impl<'a> ProgressGuard<'a> {
    pub(crate) fn acquire(
        in_flight: &'a AtomicUsize,
        snapshot: &'a watch::Sender<ExplorerSnapshot>,
    ) -> Self {
        in_flight.fetch_add(1, Ordering::SeqCst);
        sync_flag(in_flight, snapshot);
        Self {
            in_flight,
            snapshot,
        }
    }
}

impl Drop for ProgressGuard<'_> {
    fn drop(&mut self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        sync_flag(self.in_flight, self.snapshot);
    }
}

pub(crate) fn sync_flag(in_flight: &AtomicUsize, snapshot: &watch::Sender<ExplorerSnapshot>) {
    snapshot.send_if_modified(|s| {
        let busy = in_flight.load(Ordering::SeqCst) > 0;
        let changed = s.progressing != busy;
        s.progressing = busy;
        changed
    });
}
