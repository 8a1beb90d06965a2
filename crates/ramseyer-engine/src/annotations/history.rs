/// Linear undo/redo history of whole-state snapshots.
///
/// Holds at least one entry; `pointer` always indexes the current one.
/// Pushing after an undo drops every entry past the pointer, so redo is
/// only possible until the next new action.
#[derive(Debug, Clone)]
pub struct History<T> {
    entries: Vec<T>,
    pointer: usize,
}

impl<T> History<T> {
    pub fn new(initial: T) -> Self {
        Self {
            entries: vec![initial],
            pointer: 0,
        }
    }

    pub fn current(&self) -> &T {
        &self.entries[self.pointer]
    }

    /// Records `entry` as the new current state, truncating any redo tail.
    pub fn push(&mut self, entry: T) {
        self.entries.truncate(self.pointer + 1);
        self.entries.push(entry);
        self.pointer = self.entries.len() - 1;
    }

    /// Steps back one entry; returns false at the oldest entry.
    pub fn undo(&mut self) -> bool {
        if !self.can_undo() {
            return false;
        }
        self.pointer -= 1;
        true
    }

    /// Steps forward one entry; returns false at the newest entry.
    pub fn redo(&mut self) -> bool {
        if !self.can_redo() {
            return false;
        }
        self.pointer += 1;
        true
    }

    pub fn can_undo(&self) -> bool {
        self.pointer > 0
    }

    pub fn can_redo(&self) -> bool {
        self.pointer + 1 < self.entries.len()
    }

    /// Replaces the whole history with a single entry.
    pub fn reset(&mut self, initial: T) {
        self.entries = vec![initial];
        self.pointer = 0;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn pointer(&self) -> usize {
        self.pointer
    }
}
