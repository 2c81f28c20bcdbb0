//! Component instantiation.

use crate::generic_node::GenericNode;
use crate::reactive::*;
use crate::view::View;

/// Instantiates a component.
///
/// The component body runs untracked: if it is created inside an effect, reads made while
/// building it do not make that effect depend on the component's state.
#[inline(always)]
pub fn instantiate<'a, G: GenericNode, Props>(
    f: impl FnOnce(ScopeRef<'a>, Props) -> View<G>,
    ctx: ScopeRef<'a>,
    props: Props,
) -> View<G> {
    untrack(|| f(ctx, props))
}
