//! Deferred tasks on the simulated clock
//!
//! The game runs on a single timeline driven by `tick(elapsed_ms)`. Work that
//! must happen "a little later" is queued here with a delay and handed back
//! once enough simulated time has passed. Tasks cannot be cancelled.

/// Work that can be deferred by the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeferredTask {
    /// Run gravity on every column.
    CollapseAll,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry<T> {
    remaining_ms: u32,
    task: T,
}

/// FIFO of delayed tasks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeferredQueue<T> {
    entries: Vec<Entry<T>>,
}

impl<T> DeferredQueue<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Queue `task` to become due after `delay_ms`.
    pub fn schedule(&mut self, delay_ms: u32, task: T) {
        self.entries.push(Entry {
            remaining_ms: delay_ms,
            task,
        });
    }

    /// Advance the clock and hand every task that became due to `run`,
    /// oldest first.
    pub fn advance(&mut self, elapsed_ms: u32, mut run: impl FnMut(T))
    where
        T: Copy,
    {
        self.entries.retain_mut(|entry| {
            entry.remaining_ms = entry.remaining_ms.saturating_sub(elapsed_ms);
            if entry.remaining_ms > 0 {
                return true;
            }
            run(entry.task);
            false
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for DeferredQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
