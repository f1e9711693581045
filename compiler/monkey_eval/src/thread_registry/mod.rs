//! Registry of launched tasks.
//!
//! `launch` registers a task and gets back an id plus the sending half of a
//! single-result channel; the spawned task sends its value and drops the
//! sender. `await` looks the id up and joins: it drains the channel until it
//! disconnects, keeping the last value received (`null` if none).
//!
//! The first join caches the drained value in the entry, and each entry
//! serializes its joins, so repeated or concurrent `await`s on one handle
//! all observe the same result. The registry lock is only held for the map
//! operation itself, never while a join blocks.
//!
//! Entries are never removed.

use std::fmt;
use std::sync::Arc;

use crossbeam::channel::{self, Receiver, Sender};
use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::value::Value;

/// Identifier of a launched task. Issued in increasing order from zero.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ThreadId(u64);

impl ThreadId {
    #[inline]
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ThreadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One registered task: its result channel and the cached join result.
struct TaskEntry {
    receiver: Receiver<Value>,
    alive: bool,
    joined: Mutex<Option<Value>>,
}

/// Handle to a registered task, obtained from [`ThreadRegistry::lookup`].
#[derive(Clone)]
pub struct TaskHandle {
    id: ThreadId,
    entry: Arc<TaskEntry>,
}

impl TaskHandle {
    pub fn id(&self) -> ThreadId {
        self.id
    }

    /// Block until the task's channel closes and return the last value it
    /// sent, or `null` if it sent none. Later joins return the same value.
    pub fn join(&self) -> Value {
        let mut joined = self.entry.joined.lock();
        if let Some(value) = joined.as_ref() {
            return value.clone();
        }

        let mut result = Value::Null;
        for value in self.entry.receiver.iter() {
            result = value;
        }
        *joined = Some(result.clone());
        result
    }
}

impl fmt::Debug for TaskHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskHandle")
            .field("id", &self.id)
            .field("joined", &self.entry.joined.try_lock().map(|joined| joined.is_some()))
            .finish()
    }
}

#[derive(Default)]
struct RegistryState {
    tasks: FxHashMap<ThreadId, Arc<TaskEntry>>,
    next_id: u64,
}

/// Shared, synchronized task table. Cloning shares the table.
#[derive(Clone, Default)]
pub struct ThreadRegistry {
    state: Arc<Mutex<RegistryState>>,
}

impl ThreadRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next id with a fresh result channel, marked alive.
    pub fn register(&self) -> (ThreadId, Sender<Value>) {
        let (sender, receiver) = channel::bounded(1);
        let entry = Arc::new(TaskEntry {
            receiver,
            alive: true,
            joined: Mutex::new(None),
        });

        let mut state = self.state.lock();
        let id = ThreadId(state.next_id);
        state.next_id += 1;
        state.tasks.insert(id, entry);
        (id, sender)
    }

    /// The task registered under `id`, if it is known and alive.
    pub fn lookup(&self, id: ThreadId) -> Option<TaskHandle> {
        let state = self.state.lock();
        let entry = state.tasks.get(&id).filter(|entry| entry.alive)?;
        Some(TaskHandle {
            id,
            entry: Arc::clone(entry),
        })
    }

    /// Number of tasks ever registered.
    pub fn len(&self) -> usize {
        self.state.lock().tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for ThreadRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("ThreadRegistry")
            .field("tasks", &state.tasks.len())
            .field("next_id", &state.next_id)
            .finish()
    }
}
