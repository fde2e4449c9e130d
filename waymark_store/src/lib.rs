// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Waymark Store: a single-value observable cell.
//!
//! A [`Store`] holds one value and a list of zero-argument subscribers.
//! Writers replace the value with [`Store::set`]; every subscriber registered at that
//! moment is then called synchronously, in registration order, and re-reads the value
//! with [`Store::get`] (or [`Store::with`] to borrow it).
//!
//! ## Delivery rules
//!
//! - No buffering, no coalescing, no async delivery: each `set` notifies once.
//! - Notification walks a snapshot of the subscriber list taken when `set` begins.
//!   A subscriber added during the walk is first called on the next `set`.
//!   A subscriber removed during the walk is skipped if it has not been reached yet.
//! - The value is never borrowed while subscribers run, so a subscriber may call
//!   `get`, `set`, or `subscribe` on the same store.
//!
//! ## Subscriptions
//!
//! [`Store::subscribe`] returns a [`Subscription`] capability that deregisters exactly
//! that callback. Unsubscribing is idempotent, and dropping the subscription
//! unsubscribes, so owning the subscription ties the callback to the owner's lifetime.
//! Use [`Subscription::leak`] to keep a callback for the whole life of the store.
//!
//! ## Minimal example
//!
//! ```
//! use core::cell::Cell;
//! use std::rc::Rc;
//! use waymark_store::Store;
//!
//! let store = Store::new(0_u32);
//! let seen = Rc::new(Cell::new(0));
//!
//! let sub = store.subscribe({
//!     let store = store.clone();
//!     let seen = seen.clone();
//!     move || seen.set(store.get())
//! });
//!
//! store.set(3);
//! assert_eq!(seen.get(), 3);
//!
//! sub.unsubscribe();
//! store.set(4);
//! assert_eq!(seen.get(), 3);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::boxed::Box;
use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

type Callback = Box<dyn Fn()>;

struct Entry {
    id: u64,
    active: Cell<bool>,
    callback: Callback,
}

struct Inner<T> {
    value: RefCell<T>,
    subscribers: RefCell<Vec<Rc<Entry>>>,
    next_id: Cell<u64>,
}

/// Removal side of a store, independent of its value type.
trait Registry {
    fn remove(&self, id: u64);
}

impl<T> Registry for Inner<T> {
    fn remove(&self, id: u64) {
        self.subscribers.borrow_mut().retain(|e| e.id != id);
    }
}

/// A shared, single-value observable cell.
///
/// Cloning a `Store` yields another handle to the same value and subscriber list.
pub struct Store<T> {
    inner: Rc<Inner<T>>,
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Default> Default for Store<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: core::fmt::Debug> core::fmt::Debug for Store<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Store")
            .field("value", &*self.inner.value.borrow())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

impl<T> Store<T> {
    /// Create a store holding `value` with no subscribers.
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(Inner {
                value: RefCell::new(value),
                subscribers: RefCell::new(Vec::new()),
                next_id: Cell::new(0),
            }),
        }
    }

    /// Return a clone of the current value.
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.inner.value.borrow().clone()
    }

    /// Borrow the current value for the duration of `f`.
    ///
    /// `f` must not call [`Store::set`] or [`Store::update`] on this store.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.value.borrow())
    }

    /// Replace the value and notify every current subscriber.
    pub fn set(&self, value: T) {
        let previous = self.inner.value.replace(value);
        drop(previous);
        self.notify();
    }

    /// Mutate the value in place and notify every current subscriber.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        f(&mut self.inner.value.borrow_mut());
        self.notify();
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.borrow().len()
    }

    /// Whether two handles refer to the same store.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    fn notify(&self) {
        // Snapshot so subscribers may (un)subscribe while we walk the list.
        let snapshot: Vec<Rc<Entry>> = self.inner.subscribers.borrow().clone();
        tracing::trace!(subscribers = snapshot.len(), "store notify");
        for entry in snapshot {
            if entry.active.get() {
                (entry.callback)();
            }
        }
    }
}

impl<T: 'static> Store<T> {
    /// Register `callback` to run after every subsequent [`Store::set`].
    ///
    /// The callback receives no payload; read the value through a store handle.
    /// The returned [`Subscription`] deregisters the callback when unsubscribed or dropped.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(&self, callback: impl Fn() + 'static) -> Subscription {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        let entry = Rc::new(Entry {
            id,
            active: Cell::new(true),
            callback: Box::new(callback),
        });
        let handle = Rc::downgrade(&entry);
        self.inner.subscribers.borrow_mut().push(entry);
        tracing::trace!(subscriber = id, "store subscribe");

        let registry: Weak<dyn Registry> = Rc::downgrade(&self.inner) as Weak<dyn Registry>;
        Subscription {
            id,
            entry: handle,
            registry,
        }
    }
}

/// Capability to deregister one store subscriber.
///
/// Dropping a `Subscription` unsubscribes. The subscription does not keep the store
/// alive; if the store is gone, unsubscribing is a no-op.
#[must_use = "dropping the subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    entry: Weak<Entry>,
    registry: Weak<dyn Registry>,
}

impl core::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}

impl Subscription {
    /// Deregister the callback. Calling this more than once is a no-op.
    ///
    /// If a notification is in progress and has not reached this callback yet,
    /// the callback is skipped.
    pub fn unsubscribe(&self) {
        let Some(entry) = self.entry.upgrade() else {
            return;
        };
        if !entry.active.replace(false) {
            return;
        }
        drop(entry);
        if let Some(registry) = self.registry.upgrade() {
            registry.remove(self.id);
        }
        tracing::trace!(subscriber = self.id, "store unsubscribe");
    }

    /// Whether the callback is still registered with a live store.
    pub fn is_active(&self) -> bool {
        self.entry.upgrade().is_some_and(|e| e.active.get())
    }

    /// Keep the callback registered for as long as the store lives.
    ///
    /// The store owns the callback from then on. A leaked callback that captures a
    /// handle to its own store forms an `Rc` cycle, and that store is never freed.
    pub fn leak(self) {
        core::mem::forget(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;
    use alloc::vec;

    fn counter() -> Rc<Cell<usize>> {
        Rc::new(Cell::new(0))
    }

    // Every set notifies once, and the subscriber reads the latest value.
    #[test]
    fn subscriber_sees_each_set_in_order() {
        let store = Store::new(0_i32);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let _sub = store.subscribe({
            let store = store.clone();
            let seen = seen.clone();
            move || seen.borrow_mut().push(store.get())
        });

        for v in 1..=5 {
            store.set(v);
        }
        assert_eq!(*seen.borrow(), vec![1, 2, 3, 4, 5]);
        assert_eq!(store.get(), 5);
    }

    // Subscribers are called in registration order.
    #[test]
    fn notification_follows_registration_order() {
        let store = Store::new(());
        let log = Rc::new(RefCell::new(String::new()));
        let _a = store.subscribe({
            let log = log.clone();
            move || log.borrow_mut().push('a')
        });
        let _b = store.subscribe({
            let log = log.clone();
            move || log.borrow_mut().push('b')
        });
        store.set(());
        assert_eq!(log.borrow().as_str(), "ab");
    }

    // No notification reaches a callback after unsubscribe.
    #[test]
    fn unsubscribe_stops_notifications() {
        let store = Store::new(0);
        let hits = counter();
        let sub = store.subscribe({
            let hits = hits.clone();
            move || hits.set(hits.get() + 1)
        });
        store.set(1);
        sub.unsubscribe();
        store.set(2);
        store.set(3);
        assert_eq!(hits.get(), 1);
        assert_eq!(store.subscriber_count(), 0);
    }

    // Unsubscribing twice is harmless and leaves other subscribers alone.
    #[test]
    fn unsubscribe_is_idempotent() {
        let store = Store::new(0);
        let hits = counter();
        let first = store.subscribe(|| {});
        let _second = store.subscribe({
            let hits = hits.clone();
            move || hits.set(hits.get() + 1)
        });
        first.unsubscribe();
        first.unsubscribe();
        assert!(!first.is_active());
        assert_eq!(store.subscriber_count(), 1);
        store.set(1);
        assert_eq!(hits.get(), 1);
    }

    // Dropping the subscription deregisters; leaking keeps it.
    #[test]
    fn drop_unsubscribes_and_leak_keeps() {
        let store = Store::new(0);
        let hits = counter();
        {
            let _sub = store.subscribe(|| {});
        }
        assert_eq!(store.subscriber_count(), 0);

        store
            .subscribe({
                let hits = hits.clone();
                move || hits.set(hits.get() + 1)
            })
            .leak();
        store.set(1);
        assert_eq!(hits.get(), 1);
        assert_eq!(store.subscriber_count(), 1);
    }

    // A leaked callback holding its own store keeps that store alive.
    #[test]
    fn leaked_self_reference_keeps_store_alive() {
        let store = Store::new(0);
        let inner = Rc::downgrade(&store.inner);
        store
            .subscribe({
                let store = store.clone();
                move || {
                    let _ = store.get();
                }
            })
            .leak();
        drop(store);
        assert!(inner.upgrade().is_some());

        let store = Store::new(0);
        let inner = Rc::downgrade(&store.inner);
        let sub = store.subscribe({
            let store = store.clone();
            move || {
                let _ = store.get();
            }
        });
        drop(sub);
        drop(store);
        assert!(inner.upgrade().is_none());
    }

    // A subscriber removing a later one mid-notification prevents its call.
    #[test]
    fn unsubscribe_during_notification_skips_pending() {
        let store = Store::new(0);
        let hits = counter();
        let victim: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let _killer = store.subscribe({
            let victim = victim.clone();
            move || {
                if let Some(sub) = victim.borrow_mut().take() {
                    sub.unsubscribe();
                }
            }
        });
        *victim.borrow_mut() = Some(store.subscribe({
            let hits = hits.clone();
            move || hits.set(hits.get() + 1)
        }));
        store.set(1);
        store.set(2);
        assert_eq!(hits.get(), 0);
        assert_eq!(store.subscriber_count(), 1);
    }

    // A subscriber added mid-notification runs from the next set onward.
    #[test]
    fn subscribe_during_notification_defers_to_next_set() {
        let store = Store::new(0);
        let late_hits = counter();
        let added: Rc<RefCell<Vec<Subscription>>> = Rc::new(RefCell::new(Vec::new()));
        let _adder = store.subscribe({
            let store = store.clone();
            let added = added.clone();
            let late_hits = late_hits.clone();
            move || {
                if added.borrow().is_empty() {
                    let late_hits = late_hits.clone();
                    let sub = store.subscribe(move || late_hits.set(late_hits.get() + 1));
                    added.borrow_mut().push(sub);
                }
            }
        });
        store.set(1);
        assert_eq!(late_hits.get(), 0);
        store.set(2);
        assert_eq!(late_hits.get(), 1);
    }

    // Nested set from inside a subscriber delivers the newest value.
    #[test]
    fn reentrant_set_is_delivered() {
        let store = Store::new(0);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let _clamp = store.subscribe({
            let store = store.clone();
            move || {
                if store.get() > 10 {
                    store.set(10);
                }
            }
        });
        let _watch = store.subscribe({
            let store = store.clone();
            let seen = seen.clone();
            move || seen.borrow_mut().push(store.get())
        });
        store.set(42);
        assert_eq!(store.get(), 10);
        assert_eq!(seen.borrow().first(), Some(&10));
    }

    // Unsubscribing after the store is gone is a no-op.
    #[test]
    fn subscription_outlives_store() {
        let store = Store::new(String::from("x"));
        let sub = store.subscribe(|| {});
        drop(store);
        assert!(!sub.is_active());
        sub.unsubscribe();
    }

    #[test]
    fn update_mutates_in_place_and_notifies() {
        let store = Store::new(vec![1]);
        let hits = counter();
        let _sub = store.subscribe({
            let hits = hits.clone();
            move || hits.set(hits.get() + 1)
        });
        store.update(|v| v.push(2));
        assert_eq!(store.with(|v| v.len()), 2);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn clones_share_state() {
        let a = Store::new(1);
        let b = a.clone();
        b.set(2);
        assert_eq!(a.get(), 2);
        assert!(a.ptr_eq(&b));
        assert!(!a.ptr_eq(&Store::new(2)));
    }
}
