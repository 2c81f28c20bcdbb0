//! Reactive primitives for the likes counter.
//!
//! State lives in [`Signal`]s owned by a [`Scope`]. Effects created with
//! [`Scope::create_effect`] re-run whenever a signal they read is set.

pub mod effect;
pub mod reducer;
pub mod signal;

use std::cell::RefCell;
use std::rc::Rc;

pub use indexmap::IndexMap;

pub use effect::*;
pub use signal::*;

/// A reactive scope.
///
/// A [`Scope`] is only ever handed out behind a reference ([`ScopeRef`]). Everything created
/// through it (signals, effects, cleanup callbacks) lives until the scope is disposed.
///
/// Use [`create_scope`] to get one.
pub struct Scope<'a> {
    effects: RefCell<Vec<Rc<RefCell<Option<EffectState<'a>>>>>>,
    cleanups: RefCell<Vec<Box<dyn FnOnce() + 'a>>>,
    // Owned. Freed in `dispose`.
    signals: RefCell<Vec<*mut (dyn AnySignal<'a> + 'a)>>,
}

impl<'a> Scope<'a> {
    /// Not `pub`: a [`Scope`] must never be reachable by value on the stack.
    fn new() -> Self {
        Self {
            effects: Default::default(),
            cleanups: Default::default(),
            signals: Default::default(),
        }
    }
}

/// A reference to a [`Scope`].
pub type ScopeRef<'a> = &'a Scope<'a>;

/// Creates a reactive scope and runs `f` inside it.
///
/// Returns a [`ScopeDisposer`] which releases everything owned by the scope. Dropping the
/// disposer without calling [`dispose`](ScopeDisposer::dispose) leaks the scope, which is what a
/// root that lives as long as the page wants.
///
/// # Examples
///
/// ```
/// # use likes_reactive::*;
/// let disposer = create_scope(|ctx| {
///     let count = ctx.create_signal(0);
///     count.set(1);
/// });
/// disposer.dispose();
/// ```
pub fn create_scope(f: impl FnOnce(ScopeRef<'_>)) -> ScopeDisposer {
    let ptr = Box::into_raw(Box::new(Scope::new()));
    // SAFETY: heap allocated, so the address is stable until the disposer frees it.
    f(unsafe { &*ptr });
    ScopeDisposer { scope: ptr }
}

/// Creates a reactive scope, runs `f`, and disposes the scope right away.
pub fn create_scope_immediate(f: impl FnOnce(ScopeRef<'_>)) {
    create_scope(f).dispose();
}

/// Owns a root [`Scope`] created by [`create_scope`].
#[must_use = "not calling `dispose` will leak the scope"]
pub struct ScopeDisposer {
    // Nothing stored in a root scope can borrow from outside of it, so 'static is accurate.
    scope: *mut Scope<'static>,
}

impl ScopeDisposer {
    /// Disposes the scope: drops its effects, runs its cleanups, then frees its signals.
    pub fn dispose(self) {
        // SAFETY: the pointer came from Box::into_raw in create_scope and `self` is consumed.
        let scope = unsafe { Box::from_raw(self.scope) };
        scope.dispose();
    }
}

impl<'a> Scope<'a> {
    /// Creates a [`Signal`] owned by this scope.
    ///
    /// The returned reference is valid for as long as the scope.
    pub fn create_signal<T: 'a>(&'a self, value: T) -> &'a Signal<'a, T> {
        let ptr = Box::into_raw(Box::new(Signal::new(value)));
        self.signals.borrow_mut().push(ptr);
        // SAFETY: `signals` is append only and only drained in `dispose`, so the allocation
        // outlives every `&'a` handed out here.
        unsafe { &*ptr }
    }

    /// Registers `f` to run when the scope is disposed.
    ///
    /// Cleanups run after the effects have been dropped and before any signal is freed, in the
    /// order they were registered.
    pub fn on_cleanup(&self, f: impl FnOnce() + 'a) {
        self.cleanups.borrow_mut().push(Box::new(f));
    }

    /// Releases everything owned by the scope. Calling it twice is a no-op.
    fn dispose(&self) {
        drop(self.effects.take());
        for cb in self.cleanups.take() {
            cb();
        }
        for ptr in self.signals.take() {
            // SAFETY: allocated in create_signal and never freed anywhere else.
            unsafe {
                drop(Box::from_raw(ptr));
            }
        }
    }
}

impl Drop for Scope<'_> {
    fn drop(&mut self) {
        self.dispose();
    }
}
