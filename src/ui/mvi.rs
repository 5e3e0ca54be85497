//! Model-View-Intent primitives shared by the kiosk views.
//!
//! ```text
//! key / API outcome ──→ Intent ──→ Reducer ──→ State ──→ render
//!                                     │
//!                                     └──→ state.in_flight ──→ worker
//! ```
//!
//! Reducers never perform I/O. A reducer that needs the service stores the
//! request in its state's `in_flight` slot; the app loop sends it and feeds
//! the outcome back as another intent.

/// View state: cloned for snapshots in tests, compared to skip no-op updates.
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}

/// Something that happened: a key press, a decoded scan, a finished request.
pub trait Intent: Send + 'static {}

/// The only place a view's state changes.
pub trait Reducer {
    type State: UiState;
    type Intent: Intent;

    /// `(State, Intent) -> State`, with no side effects.
    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}
