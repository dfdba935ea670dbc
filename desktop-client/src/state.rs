use engine::GameSnapshot;
use std::sync::{Arc, Mutex};

/// Latest published snapshot, shared between the session task and the UI
/// thread. The UI only ever reads the most recent frame.
pub struct SharedState {
    snapshot: Arc<Mutex<Option<GameSnapshot>>>,
}

impl SharedState {
    pub fn new() -> Self {
        Self {
            snapshot: Arc::new(Mutex::new(None)),
        }
    }

    pub fn set_snapshot(&self, snapshot: GameSnapshot) {
        *self.snapshot.lock().unwrap() = Some(snapshot);
    }

    pub fn get_snapshot(&self) -> Option<GameSnapshot> {
        self.snapshot.lock().unwrap().clone()
    }
}

impl Clone for SharedState {
    fn clone(&self) -> Self {
        Self {
            snapshot: Arc::clone(&self.snapshot),
        }
    }
}
