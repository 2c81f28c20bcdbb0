use crate::*;

impl<'a> Scope<'a> {
    /// Creates state that is only updated by dispatching messages to a reducer.
    ///
    /// `reduce` takes the current value and a message and returns the next value. Returns the
    /// state as a [`ReadSignal`] together with the dispatch function.
    ///
    /// # Example
    /// ```
    /// # use likes_reactive::*;
    /// # create_scope_immediate(|ctx| {
    /// let (count, add) = ctx.create_reducer(0, |count, delta: i32| count + delta);
    ///
    /// add(5);
    /// add(-2);
    /// assert_eq!(*count.get(), 3);
    /// # });
    /// ```
    pub fn create_reducer<U: 'a, Msg>(
        &'a self,
        initial: U,
        reduce: impl Fn(&U, Msg) -> U + 'a,
    ) -> (&'a ReadSignal<'a, U>, Rc<impl Fn(Msg) + 'a>) {
        let state = self.create_signal(initial);

        let dispatch = move |msg| {
            state.set(reduce(&state.get_untracked(), msg));
        };

        (&**state, Rc::new(dispatch))
    }
}
