use crate::{Signal, signal};

/// Pure reducer over a piece of UI state.
///
/// Components keep the state in a [`Store`] and only ever change it by
/// dispatching events, so every transition is a plain function call that can
/// be tested without a host.
pub trait StateHolder: 'static {
    type State: Clone;
    type Event;

    fn initial_state() -> Self::State;
    fn reduce(state: &Self::State, event: Self::Event) -> Self::State;
}

/// A [`StateHolder`]'s state behind a [`Signal`].
pub struct Store<H: StateHolder> {
    state: Signal<H::State>,
}

impl<H: StateHolder> Clone for Store<H> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}

impl<H: StateHolder> Default for Store<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: StateHolder> Store<H> {
    pub fn new() -> Self {
        Self::with_state(H::initial_state())
    }

    pub fn with_state(state: H::State) -> Self {
        Self {
            state: signal(state),
        }
    }

    pub fn get(&self) -> H::State {
        self.state.get()
    }

    pub fn signal(&self) -> &Signal<H::State> {
        &self.state
    }

    pub fn dispatch(&self, event: H::Event) -> H::State {
        let next = self.state.with(|s| H::reduce(s, event));
        self.state.set(next.clone());
        next
    }
}
