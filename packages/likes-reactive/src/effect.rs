//! Side effects that re-run when their dependencies change.

use std::collections::HashSet;

use crate::signal::SignalEmitter;
use crate::*;

thread_local! {
    /// Stack of the effects that are currently executing, innermost last.
    ///
    /// The `'static` lifetime is a lie: an [`EffectState`] is only valid while it is on this
    /// stack, which is exactly the duration of its callback.
    pub(crate) static EFFECTS: RefCell<Vec<*mut EffectState<'static>>> = Default::default();
}

pub(crate) struct EffectState<'a> {
    /// Re-executes the effect.
    cb: Rc<RefCell<dyn FnMut() + 'a>>,
    dependencies: HashSet<EffectDependency<'a>>,
}

/// Compares [`SignalEmitter`]s by address.
pub(crate) struct EffectDependency<'a>(&'a SignalEmitter<'a>);

impl<'a> PartialEq for EffectDependency<'a> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.0, other.0)
    }
}

impl<'a> Eq for EffectDependency<'a> {}

impl<'a> std::hash::Hash for EffectDependency<'a> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        (self.0 as *const SignalEmitter<'a>).hash(state);
    }
}

impl<'a> EffectState<'a> {
    /// Drops every dependency along with the matching backlink in the signal.
    fn clear_dependencies(&mut self) {
        for dependency in &self.dependencies {
            dependency.0.unsubscribe(Rc::as_ptr(&self.cb));
        }
        self.dependencies.clear();
    }

    pub(crate) fn add_dependency(&mut self, emitter: &'a SignalEmitter<'a>) {
        self.dependencies.insert(EffectDependency(emitter));
    }
}

impl<'a> Scope<'a> {
    /// Runs `f` now, then again every time one of the signals it read is set.
    ///
    /// The set of dependencies is rebuilt on every run, so branches that stop reading a signal
    /// also stop reacting to it.
    ///
    /// # Example
    /// ```
    /// # use likes_reactive::*;
    /// # create_scope_immediate(|ctx| {
    /// let count = ctx.create_signal(0);
    /// let doubled = ctx.create_signal(0);
    /// ctx.create_effect(move || doubled.set(*count.get() * 2));
    ///
    /// count.set(21);
    /// assert_eq!(*doubled.get(), 42);
    /// # });
    /// ```
    pub fn create_effect(&'a self, f: impl FnMut() + 'a) {
        let f = Rc::new(RefCell::new(f));
        let effect = Rc::new(RefCell::new(None::<EffectState<'a>>));

        let cb: Rc<RefCell<dyn FnMut() + 'a>> = Rc::new(RefCell::new({
            let effect = Rc::downgrade(&effect);
            move || {
                EFFECTS.with(|effects| {
                    let initial_depth = effects.borrow().len();
                    // The scope owns the effect for as long as this callback can be reached.
                    let effect_ref = match effect.upgrade() {
                        Some(effect_ref) => effect_ref,
                        None => return,
                    };
                    let mut state = match effect_ref.take() {
                        Some(state) => state,
                        None => return,
                    };
                    state.clear_dependencies();

                    let ptr: *mut EffectState<'a> = Box::into_raw(Box::new(state));
                    effects
                        .borrow_mut()
                        .push(ptr as *mut () as *mut EffectState<'static>);
                    (*f.borrow_mut())();
                    effects.borrow_mut().pop();

                    // SAFETY: popped from EFFECTS, so this is the only pointer left.
                    let state = unsafe { Box::from_raw(ptr) };
                    // Backlinks, so that setting a dependency re-runs this effect.
                    for dependency in &state.dependencies {
                        dependency.0.subscribe(Rc::downgrade(&state.cb));
                    }
                    *effect_ref.borrow_mut() = Some(*state);

                    debug_assert_eq!(effects.borrow().len(), initial_depth);
                });
            }
        }));

        *effect.borrow_mut() = Some(EffectState {
            cb: cb.clone(),
            dependencies: HashSet::new(),
        });

        (*cb.borrow_mut())();

        self.effects.borrow_mut().push(effect);
    }
}

/// Runs `f` without tracking any signal it reads in the surrounding effect.
///
/// # Example
/// ```
/// # use likes_reactive::*;
/// # create_scope_immediate(|ctx| {
/// let tracked = ctx.create_signal(0);
/// let untracked = ctx.create_signal(0);
/// let sum = ctx.create_signal(0);
/// ctx.create_effect(move || {
///     sum.set(*tracked.get() + *untrack(|| untracked.get()));
/// });
///
/// untracked.set(1);
/// assert_eq!(*sum.get(), 0);
/// tracked.set(1);
/// assert_eq!(*sum.get(), 2);
/// # });
/// ```
pub fn untrack<T>(f: impl FnOnce() -> T) -> T {
    let outer = EFFECTS.with(|effects| effects.take());
    let ret = f();
    EFFECTS.with(|effects| *effects.borrow_mut() = outer);
    ret
}
