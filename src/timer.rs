//! Timer Seam
//!
//! One-shot callbacks on the single-threaded event loop. Dropping the
//! returned handle cancels the callback.

use std::time::Duration;

pub trait Timer {
    type Handle;

    fn schedule(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> Self::Handle;
}

/// Browser `setTimeout` through gloo
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTimer;

impl Timer for BrowserTimer {
    type Handle = gloo_timers::callback::Timeout;

    fn schedule(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> Self::Handle {
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        gloo_timers::callback::Timeout::new(millis, callback)
    }
}

#[cfg(test)]
pub mod manual {
    //! Virtual-clock timer for tests.

    use super::Timer;
    use std::cell::RefCell;
    use std::rc::{Rc, Weak};
    use std::time::Duration;

    struct Entry {
        id: u64,
        due: Duration,
        callback: Box<dyn FnOnce()>,
    }

    #[derive(Default)]
    struct Queue {
        now: Duration,
        next_id: u64,
        entries: Vec<Entry>,
    }

    #[derive(Clone, Default)]
    pub struct ManualTimer {
        queue: Rc<RefCell<Queue>>,
    }

    pub struct ManualHandle {
        id: u64,
        queue: Weak<RefCell<Queue>>,
    }

    impl Drop for ManualHandle {
        fn drop(&mut self) {
            if let Some(queue) = self.queue.upgrade() {
                if let Ok(mut queue) = queue.try_borrow_mut() {
                    queue.entries.retain(|e| e.id != self.id);
                }
            }
        }
    }

    impl ManualTimer {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn now(&self) -> Duration {
            self.queue.borrow().now
        }

        pub fn pending(&self) -> usize {
            self.queue.borrow().entries.len()
        }

        /// Advance the clock, firing due callbacks in deadline order
        pub fn advance(&self, by: Duration) {
            self.run_until(self.now() + by, true);
        }

        pub fn advance_ms(&self, ms: u64) {
            self.advance(Duration::from_millis(ms));
        }

        /// Move the clock to the instant `ms` ahead without firing what is due
        /// exactly then. Input applied next lands ahead of those callbacks.
        pub fn advance_to_edge_ms(&self, ms: u64) {
            self.run_until(self.now() + Duration::from_millis(ms), false);
        }

        fn run_until(&self, target: Duration, inclusive: bool) {
            loop {
                let next = {
                    let mut queue = self.queue.borrow_mut();
                    let idx = queue
                        .entries
                        .iter()
                        .enumerate()
                        .filter(|(_, e)| e.due < target || (inclusive && e.due == target))
                        .min_by_key(|(_, e)| (e.due, e.id))
                        .map(|(i, _)| i);
                    idx.map(|i| {
                        let entry = queue.entries.remove(i);
                        queue.now = entry.due;
                        entry.callback
                    })
                };
                match next {
                    Some(callback) => callback(),
                    None => break,
                }
            }
            self.queue.borrow_mut().now = target;
        }
    }

    impl Timer for ManualTimer {
        type Handle = ManualHandle;

        fn schedule(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> ManualHandle {
            let mut queue = self.queue.borrow_mut();
            let id = queue.next_id;
            queue.next_id += 1;
            let due = queue.now + delay;
            queue.entries.push(Entry { id, due, callback });
            ManualHandle { id, queue: Rc::downgrade(&self.queue) }
        }
    }

    mod tests {
        use super::*;
        use std::cell::Cell;

        #[test]
        fn test_fires_in_deadline_order() {
            let timer = ManualTimer::new();
            let log = Rc::new(RefCell::new(Vec::new()));
            let (a, b) = (log.clone(), log.clone());
            let _late = timer.schedule(Duration::from_millis(300), Box::new(move || a.borrow_mut().push("late")));
            let _early = timer.schedule(Duration::from_millis(100), Box::new(move || b.borrow_mut().push("early")));

            timer.advance_ms(250);
            assert_eq!(*log.borrow(), vec!["early"]);
            timer.advance_ms(50);
            assert_eq!(*log.borrow(), vec!["early", "late"]);
            assert_eq!(timer.now(), Duration::from_millis(300));
        }

        #[test]
        fn test_edge_leaves_callbacks_due_at_target() {
            let timer = ManualTimer::new();
            let fired = Rc::new(Cell::new(0));
            let (a, b) = (fired.clone(), fired.clone());
            let _early = timer.schedule(Duration::from_millis(50), Box::new(move || a.set(a.get() + 1)));
            let _due = timer.schedule(Duration::from_millis(100), Box::new(move || b.set(b.get() + 10)));

            timer.advance_to_edge_ms(100);
            assert_eq!(fired.get(), 1);
            assert_eq!(timer.now(), Duration::from_millis(100));
            assert_eq!(timer.pending(), 1);

            timer.advance_ms(0);
            assert_eq!(fired.get(), 11);
        }

        #[test]
        fn test_dropped_handle_cancels() {
            let timer = ManualTimer::new();
            let fired = Rc::new(Cell::new(false));
            let flag = fired.clone();
            let handle = timer.schedule(Duration::from_millis(10), Box::new(move || flag.set(true)));
            drop(handle);

            timer.advance_ms(100);
            assert!(!fired.get());
            assert_eq!(timer.pending(), 0);
        }
    }
}
