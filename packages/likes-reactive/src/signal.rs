//! Reactive state.

use std::ops::Deref;
use std::rc::Weak;

use crate::effect::EFFECTS;
use crate::*;

type WeakEffectCallback<'a> = Weak<RefCell<dyn FnMut() + 'a>>;
type EffectCallbackPtr<'a> = *const RefCell<dyn FnMut() + 'a>;

/// Keeps track of the effects subscribed to a signal.
#[derive(Default)]
pub struct SignalEmitter<'a>(RefCell<IndexMap<EffectCallbackPtr<'a>, WeakEffectCallback<'a>>>);

impl<'a> SignalEmitter<'a> {
    /// Adds a subscriber. Subscribing twice is the same as subscribing once.
    pub(crate) fn subscribe(&self, cb: WeakEffectCallback<'a>) {
        self.0.borrow_mut().insert(cb.as_ptr(), cb);
    }

    /// Removes a subscriber, if present.
    pub(crate) fn unsubscribe(&self, cb: EffectCallbackPtr<'a>) {
        self.0.borrow_mut().remove(&cb);
    }

    /// Records this emitter as a dependency of the effect that is currently running, if any.
    pub fn track(&self) {
        EFFECTS.with(|effects| {
            if let Some(last) = effects.borrow().last() {
                // SAFETY: an EffectState is only on the stack while its callback runs, and the
                // emitter outlives that run.
                let last = unsafe { &mut **last };
                last.add_dependency(unsafe { std::mem::transmute(self) });
            }
        });
    }

    /// Re-runs every subscribed effect.
    pub fn trigger_subscribers(&self) {
        // Snapshot, since effects re-subscribe while running.
        let subscribers = self.0.borrow().clone();
        // Newest first, so that an outer effect runs before the ones it created.
        for subscriber in subscribers.values().rev() {
            if let Some(callback) = subscriber.upgrade() {
                // Already borrowed means the effect is setting its own dependency. Skip.
                if let Ok(mut callback) = callback.try_borrow_mut() {
                    (*callback)()
                }
            }
        }
    }
}

/// A read-only view of a [`Signal`].
///
/// Reading with [`get`](Self::get) inside an effect subscribes the effect to the signal.
pub struct ReadSignal<'a, T> {
    value: RefCell<Rc<T>>,
    emitter: SignalEmitter<'a>,
}

impl<'a, T> ReadSignal<'a, T> {
    /// Returns the current value and tracks the signal in the running effect.
    #[must_use = "to only subscribe the signal without using the value, use .track() instead"]
    pub fn get(&self) -> Rc<T> {
        self.emitter.track();
        self.get_untracked()
    }

    /// Returns the current value without tracking.
    #[must_use = "discarding the returned value does nothing"]
    pub fn get_untracked(&self) -> Rc<T> {
        self.value.borrow().clone()
    }

    /// Subscribes the running effect without reading the value.
    pub fn track(&self) {
        self.emitter.track();
    }
}

/// A piece of reactive state.
pub struct Signal<'a, T>(ReadSignal<'a, T>);

impl<'a, T> Signal<'a, T> {
    pub(crate) fn new(value: T) -> Self {
        Self(ReadSignal {
            value: RefCell::new(Rc::new(value)),
            emitter: Default::default(),
        })
    }

    /// Replaces the value and re-runs every effect that depends on it.
    pub fn set(&self, value: T) {
        *self.0.value.borrow_mut() = Rc::new(value);
        self.0.emitter.trigger_subscribers();
    }
}

impl<'a, T> Deref for Signal<'a, T> {
    type Target = ReadSignal<'a, T>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Type-erased signal, so that a [`Scope`] can own signals of any type.
pub(crate) trait AnySignal<'a> {}

impl<'a, T> AnySignal<'a> for Signal<'a, T> {}
