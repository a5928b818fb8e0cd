//! Observable state holder shared by presenters and views.
//!
//! A [`ViewModel`] owns one state snapshot and the listeners interested in it.
//! Presenters mutate the snapshot and call [`ViewModel::notify_changed`];
//! listeners are invoked synchronously, in registration order, on the calling
//! thread. Everything here lives on the UI thread, so sharing uses
//! `Rc<RefCell<_>>` rather than locks.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::view_name::ViewName;

/// A view-model handed out to every collaborator that needs to touch it.
pub type Shared<T> = Rc<RefCell<T>>;

type Listener<S> = Box<dyn FnMut(&S)>;

pub struct ViewModel<S> {
    view_name: ViewName,
    state: S,
    listeners: Vec<Listener<S>>,
}

impl<S: Clone> ViewModel<S> {
    pub fn new(view_name: ViewName, state: S) -> Self {
        Self {
            view_name,
            state,
            listeners: Vec::new(),
        }
    }

    /// Wraps a new view-model for sharing between presenters and views.
    pub fn shared(view_name: ViewName, state: S) -> Shared<Self> {
        Rc::new(RefCell::new(Self::new(view_name, state)))
    }

    pub fn view_name(&self) -> ViewName {
        self.view_name
    }

    /// Snapshot of the current state.
    pub fn get_state(&self) -> S {
        self.state.clone()
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut S {
        &mut self.state
    }

    /// Replaces the snapshot. Listeners are not told until `notify_changed`.
    pub fn set_state(&mut self, state: S) {
        self.state = state;
    }

    pub fn add_change_listener(&mut self, listener: impl FnMut(&S) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Registers a listener that queues every published snapshot, and returns
    /// the queue so the owner can drain it once per frame.
    pub fn subscribe(&mut self) -> Inbox<S>
    where
        S: 'static,
    {
        let inbox = Inbox::default();
        let sink = inbox.clone();
        self.add_change_listener(move |state| sink.push(state.clone()));
        inbox
    }

    pub fn notify_changed(&mut self) {
        let state = &self.state;
        for listener in &mut self.listeners {
            listener(state);
        }
    }
}

/// Snapshots published by a [`ViewModel`] and not yet rendered.
pub struct Inbox<S> {
    queue: Rc<RefCell<VecDeque<S>>>,
}

impl<S> Clone for Inbox<S> {
    fn clone(&self) -> Self {
        Self {
            queue: Rc::clone(&self.queue),
        }
    }
}

impl<S> Default for Inbox<S> {
    fn default() -> Self {
        Self {
            queue: Rc::new(RefCell::new(VecDeque::new())),
        }
    }
}

impl<S> Inbox<S> {
    fn push(&self, state: S) {
        self.queue.borrow_mut().push_back(state);
    }

    /// Removes every pending snapshot, oldest first.
    pub fn drain(&self) -> Vec<S> {
        self.queue.borrow_mut().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.queue.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, Default, PartialEq)]
    struct Counter {
        value: u32,
    }

    #[test]
    fn set_state_does_not_notify() {
        let mut vm = ViewModel::new(ViewName::Weather, Counter::default());
        let inbox = vm.subscribe();

        vm.set_state(Counter { value: 3 });

        assert!(inbox.is_empty());
        assert_eq!(vm.get_state(), Counter { value: 3 });
    }

    #[test]
    fn listeners_fire_in_registration_order() {
        let mut vm = ViewModel::new(ViewName::Daily, Counter::default());
        let order = Rc::new(RefCell::new(Vec::new()));
        for id in 0..3 {
            let order = Rc::clone(&order);
            vm.add_change_listener(move |state: &Counter| {
                order.borrow_mut().push((id, state.value));
            });
        }

        vm.state_mut().value = 7;
        vm.notify_changed();

        assert_eq!(*order.borrow(), vec![(0, 7), (1, 7), (2, 7)]);
    }

    #[test]
    fn inbox_collects_each_notification() {
        let mut vm = ViewModel::new(ViewName::Hourly, Counter::default());
        let inbox = vm.subscribe();

        vm.notify_changed();
        vm.state_mut().value = 1;
        vm.notify_changed();

        assert_eq!(inbox.len(), 2);
        assert_eq!(inbox.drain(), vec![Counter { value: 0 }, Counter { value: 1 }]);
        assert!(inbox.is_empty());
    }

    #[test]
    fn view_name_is_fixed() {
        let vm = ViewModel::new(ViewName::LoggedIn, Counter::default());
        assert_eq!(vm.view_name(), ViewName::LoggedIn);
    }
}
