//! Session events, the shared event queue, and the subscriber bus
//!
//! The original design wired collaborators together with direct signal/slot
//! connections; here the links are explicit. Producers (backend, system I/O,
//! panels) push [`SessionEvent`]s onto a shared [`EventQueue`]; the
//! coordinator drains the queue in emission order and publishes each event on
//! an [`EventBus`], a mapping from event kind to an ordered list of
//! subscriber callbacks. The coordinator is the sole owner of subscription
//! lifetime: links are registered at construction and dropped at teardown.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::session::panel::PanelKind;

/// All discrete, named events flowing through the session.
///
/// The first group is the multiplexed execution-backend feed; the second is
/// produced by panels. Delivery order within the queue is emission order:
/// no reordering, no coalescing.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    // Backend / system I/O feed.
    ProgramLoaded,
    /// Terminal event for a run; `fault` is set when the backend reported an
    /// abnormal stop (forwarded as data, never as a control-flow fault).
    ExecutionFinished { fault: Option<String> },
    RunFinished,
    ProcessorChanged,
    Stopping,
    Reset,
    OutputProduced(String),
    SyscallStatus(String),

    // Panel-produced events.
    ProgramChanged,
    EditorStateChanged { dirty: bool },
    FocusAddressChanged(u64),
    ActivePanelChanged(PanelKind),
}

/// Payload-free discriminant used as the bus subscription key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    ProgramLoaded,
    ExecutionFinished,
    RunFinished,
    ProcessorChanged,
    Stopping,
    Reset,
    OutputProduced,
    SyscallStatus,
    ProgramChanged,
    EditorStateChanged,
    FocusAddressChanged,
    ActivePanelChanged,
}

impl SessionEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            SessionEvent::ProgramLoaded => EventKind::ProgramLoaded,
            SessionEvent::ExecutionFinished { .. } => EventKind::ExecutionFinished,
            SessionEvent::RunFinished => EventKind::RunFinished,
            SessionEvent::ProcessorChanged => EventKind::ProcessorChanged,
            SessionEvent::Stopping => EventKind::Stopping,
            SessionEvent::Reset => EventKind::Reset,
            SessionEvent::OutputProduced(_) => EventKind::OutputProduced,
            SessionEvent::SyscallStatus(_) => EventKind::SyscallStatus,
            SessionEvent::ProgramChanged => EventKind::ProgramChanged,
            SessionEvent::EditorStateChanged { .. } => EventKind::EditorStateChanged,
            SessionEvent::FocusAddressChanged(_) => EventKind::FocusAddressChanged,
            SessionEvent::ActivePanelChanged(_) => EventKind::ActivePanelChanged,
        }
    }
}

/// Shared FIFO the host drains between dispatches.
///
/// Cloning yields another handle to the same queue. Events pushed while a
/// modal prompt is open simply wait here until the prompt returns, so the
/// coordinator never observes an event mid-transition.
#[derive(Clone, Default)]
pub struct EventQueue {
    inner: Rc<RefCell<VecDeque<SessionEvent>>>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, event: SessionEvent) {
        self.inner.borrow_mut().push_back(event);
    }

    /// Remove and return all pending events, oldest first.
    pub fn take_all(&self) -> Vec<SessionEvent> {
        self.inner.borrow_mut().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }
}

/// Subscriber callback invoked for each published event of its kind.
pub type Listener = Box<dyn FnMut(&SessionEvent)>;

/// Mapping from event kind to an ordered list of subscribers.
#[derive(Default)]
pub struct EventBus {
    listeners: FxHashMap<EventKind, Vec<Listener>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subscriber; delivery follows registration order per kind.
    pub fn subscribe(&mut self, kind: EventKind, listener: Listener) {
        self.listeners.entry(kind).or_default().push(listener);
    }

    /// Deliver `event` to every subscriber of its kind, in order.
    pub fn publish(&mut self, event: &SessionEvent) {
        if let Some(subs) = self.listeners.get_mut(&event.kind()) {
            for listener in subs.iter_mut() {
                listener(event);
            }
        }
    }

    /// Drop all subscriptions (teardown).
    pub fn clear(&mut self) {
        self.listeners.clear();
    }

    pub fn subscriber_count(&self, kind: EventKind) -> usize {
        self.listeners.get(&kind).map_or(0, Vec::len)
    }
}
