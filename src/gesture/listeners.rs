use std::collections::HashMap;
use std::rc::Rc;

use super::event::{DragEventType, DragNotification};

pub type Listener<P> = Rc<dyn Fn(&DragNotification<'_, P>)>;

/// Per-event-type ordered subscriber lists.
///
/// Listener identity is the `Rc` allocation: registering the same `Rc` twice
/// for one event type does nothing.
pub struct ListenerRegistry<P> {
    callbacks: HashMap<DragEventType, Vec<Listener<P>>>,
}

impl<P> Default for ListenerRegistry<P> {
    fn default() -> Self {
        Self {
            callbacks: HashMap::new(),
        }
    }
}

impl<P> ListenerRegistry<P> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(&mut self, kind: DragEventType, listener: Listener<P>) -> bool {
        let list = self.callbacks.entry(kind).or_default();
        if list.iter().any(|existing| Rc::ptr_eq(existing, &listener)) {
            return false;
        }
        list.push(listener);
        true
    }

    pub fn off(&mut self, kind: DragEventType, listener: &Listener<P>) -> bool {
        let Some(list) = self.callbacks.get_mut(&kind) else {
            return false;
        };
        let Some(index) = list.iter().position(|existing| Rc::ptr_eq(existing, listener)) else {
            return false;
        };
        list.remove(index);
        true
    }

    pub fn len(&self, kind: DragEventType) -> usize {
        self.callbacks.get(&kind).map_or(0, Vec::len)
    }

    pub fn emit(&self, notification: &DragNotification<'_, P>) {
        if let Some(list) = self.callbacks.get(&notification.kind) {
            for listener in list {
                listener(notification);
            }
        }
    }
}
