//! Debounced Values
//!
//! The output follows the input only after the input has stayed unchanged
//! for the full delay. Every new input restarts the window.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use crate::timer::Timer;

pub const DEFAULT_DELAY: Duration = Duration::from_millis(500);

type Listener<T> = Rc<dyn Fn(T)>;

struct Inner<T, H> {
    output: T,
    latest: Option<T>,
    /// Bumped on every input and on cancel; stale callbacks compare against it
    generation: u64,
    handle: Option<H>,
    listener: Option<Listener<T>>,
}

pub struct Debounced<T, M: Timer> {
    inner: Rc<RefCell<Inner<T, M::Handle>>>,
    timer: M,
    delay: Duration,
}

impl<T, M> Debounced<T, M>
where
    T: Clone + PartialEq + 'static,
    M: Timer,
    M::Handle: 'static,
{
    pub fn new(initial: T, delay: Duration, timer: M) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                output: initial,
                latest: None,
                generation: 0,
                handle: None,
                listener: None,
            })),
            timer,
            delay,
        }
    }

    /// Called with the new output each time it changes
    pub fn on_settle(&self, listener: impl Fn(T) + 'static) {
        self.inner.borrow_mut().listener = Some(Rc::new(listener));
    }

    /// Feed a new input, discarding any pending one
    pub fn set(&self, value: T) {
        let generation = {
            let mut inner = self.inner.borrow_mut();
            inner.generation += 1;
            inner.latest = Some(value);
            inner.generation
        };

        let weak = Rc::downgrade(&self.inner);
        let handle = self
            .timer
            .schedule(self.delay, Box::new(move || settle(weak, generation)));

        // replacing the handle cancels the previous timer
        let previous = self.inner.borrow_mut().handle.replace(handle);
        drop(previous);
    }

    /// Current debounced output
    #[cfg(test)]
    pub fn get(&self) -> T {
        self.inner.borrow().output.clone()
    }

    #[cfg(test)]
    pub fn is_pending(&self) -> bool {
        self.inner.borrow().latest.is_some()
    }

    /// Drop any pending input; nothing propagates afterwards
    pub fn cancel(&self) {
        let handle = {
            let mut inner = self.inner.borrow_mut();
            inner.generation += 1;
            inner.latest = None;
            inner.handle.take()
        };
        drop(handle);
    }
}

impl<T, M: Timer> Drop for Debounced<T, M> {
    fn drop(&mut self) {
        if let Ok(mut inner) = self.inner.try_borrow_mut() {
            inner.generation += 1;
            inner.latest = None;
            inner.handle = None;
        }
    }
}

fn settle<T, H>(weak: Weak<RefCell<Inner<T, H>>>, generation: u64)
where
    T: Clone + PartialEq,
{
    let Some(inner) = weak.upgrade() else {
        return;
    };
    let notify = {
        let mut inner = inner.borrow_mut();
        if inner.generation != generation {
            return;
        }
        let Some(value) = inner.latest.take() else {
            return;
        };
        if value == inner.output {
            None
        } else {
            inner.output = value.clone();
            inner.listener.clone().map(|listener| (listener, value))
        }
    };
    if let Some((listener, value)) = notify {
        listener(value);
    }
}
