//! Observable value: a shared cell plus synchronously notified subscribers.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Handle returned by [`Observable::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Inner<T> {
    value: T,
    next_id: u64,
    subscribers: Vec<(SubscriptionId, Callback<T>)>,
    // Written values not yet delivered, oldest first.
    pending: VecDeque<T>,
    // Set while some thread is delivering `pending`.
    draining: bool,
}

/// Shared value whose subscribers run on every change.
///
/// Clones share the same cell. Callbacks run after the internal lock is released, in
/// subscription order, so a callback may read or even write the observable. A write that
/// leaves the value equal to the current one notifies nobody.
///
/// Notifications are delivered one write at a time, in write order. A write made while
/// another thread is still notifying is queued and delivered by that thread, so the last
/// value a subscriber sees is always the current one.
pub struct Observable<T> {
    inner: Arc<Mutex<Inner<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Observable<T>
where
    T: Clone + PartialEq + Send + 'static,
{
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                value,
                next_id: 0,
                subscribers: Vec::new(),
                pending: VecDeque::new(),
                draining: false,
            })),
        }
    }

    pub fn get(&self) -> T {
        self.lock().value.clone()
    }

    /// Replace the value and notify subscribers if it changed.
    pub fn set(&self, value: T) {
        self.update(|_| value);
    }

    /// Derive the next value from the current one.
    pub fn update(&self, f: impl FnOnce(&T) -> T) {
        {
            let mut guard = self.lock();
            let next = f(&guard.value);
            if next == guard.value {
                return;
            }
            guard.value = next.clone();
            guard.pending.push_back(next);
            if guard.draining {
                return;
            }
            guard.draining = true;
        }
        self.drain();
    }

    fn drain(&self) {
        let _reset = DrainReset(self);
        loop {
            let (value, callbacks) = {
                let mut guard = self.lock();
                match guard.pending.pop_front() {
                    Some(value) => {
                        let callbacks: Vec<Callback<T>> =
                            guard.subscribers.iter().map(|(_, cb)| Arc::clone(cb)).collect();
                        (value, callbacks)
                    }
                    None => {
                        guard.draining = false;
                        return;
                    }
                }
            };
            for cb in callbacks {
                cb(&value);
            }
        }
    }

    /// Register `f`; it is called immediately with the current value, then on every change.
    pub fn subscribe<F>(&self, f: F) -> SubscriptionId
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let cb: Callback<T> = Arc::new(f);
        let (id, current) = {
            let mut guard = self.lock();
            let id = SubscriptionId(guard.next_id);
            guard.next_id += 1;
            guard.subscribers.push((id, Arc::clone(&cb)));
            (id, guard.value.clone())
        };
        cb(&current);
        id
    }

    /// Remove a subscriber. Returns false when `id` was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut guard = self.lock();
        let before = guard.subscribers.len();
        guard.subscribers.retain(|(sid, _)| *sid != id);
        guard.subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock().subscribers.len()
    }

    fn lock(&self) -> MutexGuard<'_, Inner<T>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// Hands delivery back to the next writer if a callback panics mid-drain.
struct DrainReset<'a, T>(&'a Observable<T>);

impl<T> Drop for DrainReset<'_, T> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            let mut guard = self.0.inner.lock().unwrap_or_else(PoisonError::into_inner);
            guard.draining = false;
            guard.pending.clear();
        }
    }
}

impl<T> Default for Observable<T>
where
    T: Clone + PartialEq + Default + Send + 'static,
{
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> std::fmt::Debug for Observable<T>
where
    T: Clone + PartialEq + Send + std::fmt::Debug + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observable")
            .field("value", &self.get())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder<T: Clone + Send + 'static>() -> (Arc<Mutex<Vec<T>>>, impl Fn(&T) + Send + Sync) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        (seen, move |v: &T| sink.lock().unwrap().push(v.clone()))
    }

    #[test]
    fn subscribers_see_current_then_each_change() {
        let obs = Observable::new(1);
        let (seen, cb) = recorder();
        obs.subscribe(cb);
        obs.set(2);
        obs.update(|v| v + 10);
        assert_eq!(*seen.lock().unwrap(), vec![1, 2, 12]);
        assert_eq!(obs.get(), 12);
    }

    #[test]
    fn equal_writes_do_not_notify() {
        let obs = Observable::new("a".to_string());
        let (seen, cb) = recorder();
        obs.subscribe(cb);
        obs.set("a".to_string());
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let obs = Observable::new(0u32);
        let (first, cb1) = recorder();
        let (second, cb2) = recorder();
        let id1 = obs.subscribe(cb1);
        obs.subscribe(cb2);
        assert!(obs.unsubscribe(id1));
        assert!(!obs.unsubscribe(id1));
        obs.set(5);
        assert_eq!(*first.lock().unwrap(), vec![0]);
        assert_eq!(*second.lock().unwrap(), vec![0, 5]);
        assert_eq!(obs.subscriber_count(), 1);
    }

    #[test]
    fn concurrent_writers_notify_in_write_order() {
        use std::sync::Barrier;
        use std::thread;
        use std::time::Duration;

        let obs = Observable::new(0u32);
        let (seen, cb) = recorder();
        let started = Arc::new(Barrier::new(2));
        let in_callback = Arc::clone(&started);
        obs.subscribe(move |v: &u32| {
            if *v == 1 {
                in_callback.wait();
                thread::sleep(Duration::from_millis(100));
            }
            cb(v);
        });
        let writer = obs.clone();
        let slow = thread::spawn(move || writer.set(1));
        started.wait();
        thread::sleep(Duration::from_millis(20));
        obs.set(2);
        slow.join().unwrap();
        let seen = seen.lock().unwrap().clone();
        assert_eq!(seen, vec![0, 1, 2]);
        assert_eq!(seen.last().copied(), Some(obs.get()));
    }

    #[test]
    fn callbacks_may_write_the_observable() {
        let obs = Observable::new(0i32);
        let writer = obs.clone();
        let (seen, cb) = recorder();
        obs.subscribe(move |v: &i32| {
            cb(v);
            if *v == 1 {
                writer.set(2);
            }
        });
        obs.set(1);
        assert_eq!(*seen.lock().unwrap(), vec![0, 1, 2]);
        assert_eq!(obs.get(), 2);
    }

    #[test]
    fn callbacks_may_read_the_observable() {
        let obs = Observable::new(0i32);
        let reader = obs.clone();
        let (seen, cb) = recorder();
        obs.subscribe(move |_| cb(&reader.get()));
        obs.set(7);
        assert_eq!(*seen.lock().unwrap(), vec![0, 7]);
    }
}
