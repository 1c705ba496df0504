use parking_lot::Mutex;

use crate::domain::entities::command::{Command, CommandRequest, CommandSpec};
use crate::domain::errors::ValidationError;

struct OutboxState {
    commands: Vec<Command>,
    next_id: u64,
}

/// FIFO of operator commands waiting for the terminal's next poll.
///
/// Every operation takes the same lock once, so a drain sees either all or
/// none of a concurrent enqueue. Ids are never reused, even after delete or
/// clear.
pub struct CommandOutbox {
    state: Mutex<OutboxState>,
}

impl CommandOutbox {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(OutboxState {
                commands: Vec::new(),
                next_id: 0,
            }),
        }
    }

    /// Validate and append a command. Returns the id it was assigned.
    ///
    /// Invalid input never reaches the queue.
    pub fn enqueue(&self, request: &CommandRequest) -> Result<u64, ValidationError> {
        let spec = CommandSpec::try_from(request)?;
        Ok(self.enqueue_spec(spec))
    }

    pub fn enqueue_spec(&self, spec: CommandSpec) -> u64 {
        let mut state = self.state.lock();
        let id = state.next_id;
        state.next_id += 1;
        state.commands.push(Command::new(id, spec));
        id
    }

    /// Remove the command at `position` in current queue order.
    ///
    /// Out-of-range positions leave the queue untouched and return `None`.
    pub fn delete_at(&self, position: usize) -> Option<Command> {
        let mut state = self.state.lock();
        if position < state.commands.len() {
            Some(state.commands.remove(position))
        } else {
            None
        }
    }

    /// Drop every queued command. Returns how many were removed.
    pub fn clear(&self) -> usize {
        let mut state = self.state.lock();
        let removed = state.commands.len();
        state.commands.clear();
        removed
    }

    /// Take the whole queue in one step. Drained commands are gone for good.
    pub fn drain_all(&self) -> Vec<Command> {
        std::mem::take(&mut self.state.lock().commands)
    }

    /// Copy of the queue for display; does not consume anything.
    pub fn snapshot(&self) -> Vec<Command> {
        self.state.lock().commands.clone()
    }

    pub fn len(&self) -> usize {
        self.state.lock().commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().commands.is_empty()
    }
}

impl Default for CommandOutbox {
    fn default() -> Self {
        Self::new()
    }
}
