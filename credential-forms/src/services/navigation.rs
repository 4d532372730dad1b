use std::sync::Mutex;

use crate::models::Route;

/// Host navigation stack.
pub trait Navigator: Send + Sync {
    /// Push `route` on top of the current screen.
    fn navigate(&self, route: Route);
    /// Replace the current screen with `route`.
    fn replace(&self, route: Route);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationEvent {
    Navigate(Route),
    Replace(Route),
}

#[derive(Default)]
pub struct MockNavigator {
    pub events: Mutex<Vec<NavigationEvent>>,
}

impl MockNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<NavigationEvent> {
        self.events.lock().ok().and_then(|e| e.last().cloned())
    }

    pub fn count(&self) -> usize {
        self.events.lock().map(|e| e.len()).unwrap_or(0)
    }

    fn push(&self, event: NavigationEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event),
            Err(e) => tracing::error!(error = %e, "Mock navigator mutex poisoned"),
        }
    }
}

impl Navigator for MockNavigator {
    fn navigate(&self, route: Route) {
        self.push(NavigationEvent::Navigate(route));
    }

    fn replace(&self, route: Route) {
        self.push(NavigationEvent::Replace(route));
    }
}
