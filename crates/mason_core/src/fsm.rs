//! State Machine Runtime
//!
//! Flat, typed state machines used for engine lifecycle and tile interaction
//! states. Supports:
//! - Typed states and events
//! - Bounded transition history
//!
//! Side effects are left to the caller: `send` reports the new state and the
//! owner reacts to it, which keeps the machine free of borrowed context.

use smallvec::SmallVec;
use std::fmt::Debug;

const DEFAULT_HISTORY_LIMIT: usize = 64;

/// A transition in the state machine
struct Transition<S, E> {
    from_state: S,
    event: E,
    to_state: S,
}

/// Builder for creating state machines
pub struct StateMachineBuilder<S, E> {
    initial_state: S,
    transitions: SmallVec<[Transition<S, E>; 8]>,
    history_limit: usize,
}

impl<S, E> StateMachineBuilder<S, E>
where
    S: Copy + Eq + Debug,
    E: Copy + Eq + Debug,
{
    pub fn new(initial_state: S) -> Self {
        Self {
            initial_state,
            transitions: SmallVec::new(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }

    /// Add a simple transition (from, event, to)
    pub fn on(mut self, from: S, event: E, to: S) -> Self {
        self.transitions.push(Transition {
            from_state: from,
            event,
            to_state: to,
        });
        self
    }

    /// Maximum number of transitions kept in history (0 disables history)
    pub fn history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    /// Build the state machine
    pub fn build(self) -> StateMachine<S, E> {
        StateMachine {
            current_state: self.initial_state,
            transitions: self.transitions,
            history: Vec::new(),
            history_limit: self.history_limit,
        }
    }
}

/// A state machine instance
pub struct StateMachine<S, E> {
    current_state: S,
    transitions: SmallVec<[Transition<S, E>; 8]>,
    /// History of state transitions (for debugging)
    history: Vec<(S, E, S)>,
    history_limit: usize,
}

impl<S, E> StateMachine<S, E>
where
    S: Copy + Eq + Debug,
    E: Copy + Eq + Debug,
{
    /// Create a builder for a state machine
    pub fn builder(initial_state: S) -> StateMachineBuilder<S, E> {
        StateMachineBuilder::new(initial_state)
    }

    /// Get the current state
    pub fn current_state(&self) -> S {
        self.current_state
    }

    /// Check if we're in a specific state
    pub fn is_in(&self, state: S) -> bool {
        self.current_state == state
    }

    /// Get transition history, oldest first
    pub fn history(&self) -> &[(S, E, S)] {
        &self.history
    }

    /// Send an event, returning the new state if a transition fired
    pub fn send(&mut self, event: E) -> Option<S> {
        let from = self.current_state;
        let to = self
            .transitions
            .iter()
            .find(|t| t.from_state == from && t.event == event)?
            .to_state;

        self.current_state = to;
        tracing::trace!("fsm: {:?} --{:?}--> {:?}", from, event, to);

        if self.history_limit > 0 {
            if self.history.len() == self.history_limit {
                self.history.remove(0);
            }
            self.history.push((from, event, to));
        }

        Some(to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    enum Hover {
        Idle,
        Hovered,
        Pressed,
    }

    const POINTER_ENTER: u32 = 1;
    const POINTER_LEAVE: u32 = 2;
    const POINTER_DOWN: u32 = 3;
    const POINTER_UP: u32 = 4;

    fn hover_machine() -> StateMachine<Hover, u32> {
        StateMachine::builder(Hover::Idle)
            .on(Hover::Idle, POINTER_ENTER, Hover::Hovered)
            .on(Hover::Hovered, POINTER_LEAVE, Hover::Idle)
            .on(Hover::Hovered, POINTER_DOWN, Hover::Pressed)
            .on(Hover::Pressed, POINTER_UP, Hover::Hovered)
            .build()
    }

    #[test]
    fn test_simple_transitions() {
        let mut fsm = hover_machine();
        assert_eq!(fsm.current_state(), Hover::Idle);

        assert_eq!(fsm.send(POINTER_ENTER), Some(Hover::Hovered));
        assert_eq!(fsm.send(POINTER_DOWN), Some(Hover::Pressed));
        assert_eq!(fsm.send(POINTER_UP), Some(Hover::Hovered));
        assert_eq!(fsm.send(POINTER_LEAVE), Some(Hover::Idle));
        assert!(fsm.is_in(Hover::Idle));
    }

    #[test]
    fn test_invalid_event_no_transition() {
        let mut fsm = hover_machine();

        // POINTER_DOWN is not valid while idle
        assert_eq!(fsm.send(POINTER_DOWN), None);
        assert_eq!(fsm.current_state(), Hover::Idle);
        assert!(fsm.history().is_empty());
    }

    #[test]
    fn test_first_matching_transition_wins() {
        let mut fsm = StateMachine::builder(Hover::Idle)
            .on(Hover::Idle, POINTER_ENTER, Hover::Hovered)
            .on(Hover::Idle, POINTER_ENTER, Hover::Pressed)
            .build();

        assert_eq!(fsm.send(POINTER_ENTER), Some(Hover::Hovered));
    }

    #[test]
    fn test_history() {
        let mut fsm = hover_machine();
        fsm.send(POINTER_ENTER);
        fsm.send(POINTER_DOWN);

        let history = fsm.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0], (Hover::Idle, POINTER_ENTER, Hover::Hovered));
        assert_eq!(history[1], (Hover::Hovered, POINTER_DOWN, Hover::Pressed));
    }

    #[test]
    fn test_history_is_bounded() {
        let mut fsm = StateMachine::builder(Hover::Idle)
            .on(Hover::Idle, POINTER_ENTER, Hover::Hovered)
            .on(Hover::Hovered, POINTER_LEAVE, Hover::Idle)
            .history_limit(3)
            .build();

        for _ in 0..5 {
            fsm.send(POINTER_ENTER);
            fsm.send(POINTER_LEAVE);
        }

        assert_eq!(fsm.history().len(), 3);
        assert_eq!(
            fsm.history().last(),
            Some(&(Hover::Hovered, POINTER_LEAVE, Hover::Idle))
        );
    }
}
