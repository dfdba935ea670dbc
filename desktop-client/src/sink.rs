use engine::{GameSnapshot, SnapshotSink};

use crate::state::SharedState;

/// In-process sink: the session task publishes straight into the UI's shared
/// snapshot cell.
#[derive(Clone)]
pub struct LocalSnapshotSink {
    shared_state: SharedState,
}

impl LocalSnapshotSink {
    pub fn new(shared_state: SharedState) -> Self {
        Self { shared_state }
    }
}

impl SnapshotSink for LocalSnapshotSink {
    async fn publish(&self, snapshot: GameSnapshot) {
        self.shared_state.set_snapshot(snapshot);
    }
}
