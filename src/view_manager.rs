//! Process-wide record of which screen is active.
//!
//! The root container subscribes to it and swaps the visible view whenever it
//! is notified; presenters are the only writers.

use crate::view_model::{Inbox, Shared, ViewModel};
use crate::view_name::ViewName;

pub struct ViewManagerModel {
    inner: ViewModel<ViewName>,
}

impl ViewManagerModel {
    pub fn new(initial: ViewName) -> Self {
        // The manager is not a screen itself; its own name is never shown.
        Self {
            inner: ViewModel::new(initial, initial),
        }
    }

    pub fn shared(initial: ViewName) -> Shared<Self> {
        std::rc::Rc::new(std::cell::RefCell::new(Self::new(initial)))
    }

    pub fn get_active_view(&self) -> ViewName {
        self.inner.get_state()
    }

    pub fn set_active_view(&mut self, view: ViewName) {
        self.inner.set_state(view);
    }

    pub fn notify_changed(&mut self) {
        log::debug!("Active view is now {}", self.get_active_view());
        self.inner.notify_changed();
    }

    pub fn subscribe(&mut self) -> Inbox<ViewName> {
        self.inner.subscribe()
    }
}
