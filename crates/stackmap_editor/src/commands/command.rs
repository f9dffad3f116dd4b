//! Command pattern for undo/redo

use stackmap_core::{ListenerId, Listeners};
use tracing::debug;

use crate::config::HistoryConfig;

/// A command that can be undone/redone against a target of type `L`
pub trait Command<L: ?Sized>: Send + Sync {
    /// Execute the command, capturing whatever is needed to reverse it
    fn execute(&mut self, target: &mut L);
    /// Restore the state from just before `execute`
    fn undo(&mut self, target: &mut L);
    /// Reproduce the state from just after `execute`
    fn redo(&mut self, target: &mut L) {
        self.execute(target);
    }
    /// Get a description of the command
    fn description(&self) -> &str;
}

/// Raised after every change to the history stacks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryChanged {
    pub can_undo: bool,
    pub can_redo: bool,
}

/// Stores command history for undo/redo
#[cfg_attr(feature = "bevy", derive(bevy::prelude::Resource))]
pub struct CommandHistory<L: ?Sized + 'static> {
    /// Stack of commands that have been executed
    undo_stack: Vec<Box<dyn Command<L>>>,
    /// Stack of commands that have been undone
    redo_stack: Vec<Box<dyn Command<L>>>,
    /// Oldest entries are dropped beyond this many undo steps
    max_depth: Option<usize>,
    listeners: Listeners<HistoryChanged>,
}

impl<L: ?Sized + 'static> CommandHistory<L> {
    pub fn new() -> Self {
        Self::with_config(&HistoryConfig::default())
    }

    pub fn with_config(config: &HistoryConfig) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_depth: config.max_depth,
            listeners: Listeners::new(),
        }
    }

    /// Execute a command and add it to history
    pub fn execute(&mut self, mut command: Box<dyn Command<L>>, target: &mut L) {
        debug!("Execute: {}", command.description());
        command.execute(target);
        self.push_undo(command);
    }

    /// Undo the last command
    pub fn undo(&mut self, target: &mut L) {
        if let Some(mut command) = self.undo_stack.pop() {
            debug!("Undo: {}", command.description());
            command.undo(target);
            self.redo_stack.push(command);
            self.changed();
        }
    }

    /// Redo the last undone command
    pub fn redo(&mut self, target: &mut L) {
        if let Some(mut command) = self.redo_stack.pop() {
            debug!("Redo: {}", command.description());
            command.redo(target);
            self.undo_stack.push(command);
            self.changed();
        }
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    /// Get description of command to undo
    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack.last().map(|c| c.description())
    }

    /// Get description of command to redo
    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack.last().map(|c| c.description())
    }

    /// Clear all history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.changed();
    }

    /// Push a command directly onto the undo stack without executing it.
    /// Use this when the changes have already been applied.
    pub fn push_undo(&mut self, command: Box<dyn Command<L>>) {
        self.undo_stack.push(command);
        self.redo_stack.clear();
        if let Some(max) = self.max_depth {
            let excess = self.undo_stack.len().saturating_sub(max);
            if excess > 0 {
                self.undo_stack.drain(..excess);
            }
        }
        self.changed();
    }

    pub fn subscribe(&mut self, listener: impl Fn(&HistoryChanged) + Send + Sync + 'static) -> ListenerId {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    fn changed(&self) {
        self.listeners.emit(&HistoryChanged {
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
        });
    }
}

impl<L: ?Sized + 'static> Default for CommandHistory<L> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Appends a value to a list; undo pops it
    struct Push(u32);

    impl Command<Vec<u32>> for Push {
        fn execute(&mut self, target: &mut Vec<u32>) {
            target.push(self.0);
        }

        fn undo(&mut self, target: &mut Vec<u32>) {
            target.pop();
        }

        fn description(&self) -> &str {
            "Push"
        }
    }

    #[test]
    fn test_execute_undo_redo() {
        let mut history = CommandHistory::<Vec<u32>>::new();
        let mut target: Vec<u32> = Vec::new();

        history.execute(Box::new(Push(1)), &mut target);
        history.execute(Box::new(Push(2)), &mut target);
        assert_eq!(target, vec![1, 2]);

        history.undo(&mut target);
        assert_eq!(target, vec![1]);
        assert!(history.can_redo());

        history.redo(&mut target);
        assert_eq!(target, vec![1, 2]);
        assert!(!history.can_redo());
    }

    #[test]
    fn test_new_command_clears_redo() {
        let mut history = CommandHistory::<Vec<u32>>::new();
        let mut target: Vec<u32> = Vec::new();
        history.execute(Box::new(Push(1)), &mut target);
        history.undo(&mut target);
        assert_eq!(history.redo_count(), 1);

        history.execute(Box::new(Push(3)), &mut target);

        assert_eq!(history.redo_count(), 0);
        history.redo(&mut target);
        assert_eq!(target, vec![3]);
    }

    #[test]
    fn test_empty_stacks_are_noops() {
        let mut history = CommandHistory::<Vec<u32>>::new();
        let mut target = vec![9];
        history.undo(&mut target);
        history.redo(&mut target);
        assert_eq!(target, vec![9]);
        assert!(history.undo_description().is_none());
    }

    #[test]
    fn test_max_depth_drops_oldest() {
        let mut history = CommandHistory::<Vec<u32>>::with_config(&HistoryConfig { max_depth: Some(2) });
        let mut target: Vec<u32> = Vec::new();
        for i in 0..4 {
            history.execute(Box::new(Push(i)), &mut target);
        }

        assert_eq!(history.undo_count(), 2);
        history.undo(&mut target);
        history.undo(&mut target);
        history.undo(&mut target);
        assert_eq!(target, vec![0, 1]);
    }

    #[test]
    fn test_history_changed_notifications() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let mut history = CommandHistory::<Vec<u32>>::new();
        let sink = events.clone();
        history.subscribe(move |e| sink.lock().unwrap().push(*e));
        let mut target: Vec<u32> = Vec::new();

        history.execute(Box::new(Push(1)), &mut target);
        history.undo(&mut target);
        history.undo(&mut target);
        history.redo(&mut target);

        assert_eq!(
            *events.lock().unwrap(),
            vec![
                HistoryChanged { can_undo: true, can_redo: false },
                HistoryChanged { can_undo: false, can_redo: true },
                HistoryChanged { can_undo: true, can_redo: false },
            ]
        );
    }

    #[test]
    fn test_descriptions() {
        let mut history = CommandHistory::<Vec<u32>>::new();
        let mut target: Vec<u32> = Vec::new();
        history.execute(Box::new(Push(1)), &mut target);
        assert_eq!(history.undo_description(), Some("Push"));
        history.undo(&mut target);
        assert_eq!(history.redo_description(), Some("Push"));
    }
}
