//! A like/dislike counter widget.

use likes_view::component;
use likes_view::prelude::*;
pub use likes_view::MountError;

/// Props for [`ActionButton`].
pub struct ActionButtonProps<'a> {
    /// The label.
    pub text: &'static str,
    /// Called once per activation.
    pub on_action: Box<dyn Fn() + 'a>,
}

/// A button that calls `on_action` when clicked.
#[component]
pub fn ActionButton<'a, G: Html>(ctx: ScopeRef<'a>, props: ActionButtonProps<'a>) -> View<G> {
    let ActionButtonProps { text, on_action } = props;
    h(ctx, "button")
        .class("ActionButton")
        .c(h(ctx, "span").t(text).view())
        .on("click", move |_| on_action())
        .view()
}

/// Props for [`LikesCounter`].
pub struct LikesCounterProps {
    pub initial_count: i64,
}

/// Shows the number of likes with a button to add one and a button to take one away.
#[component]
pub fn LikesCounter<'a, G: Html>(ctx: ScopeRef<'a>, props: LikesCounterProps) -> View<G> {
    let (count, add_to_count) = ctx.create_reducer(props.initial_count, |count, delta: i64| {
        let next = count.saturating_add(delta);
        log::debug!("likes {} -> {}", count, next);
        next
    });

    let like = ActionButtonProps {
        text: "Like! (+1)",
        on_action: Box::new({
            let add_to_count = add_to_count.clone();
            move || add_to_count(1)
        }),
    };
    let dislike = ActionButtonProps {
        text: "Dislike! (-1)",
        on_action: Box::new(move || add_to_count(-1)),
    };

    h(ctx, "div")
        .class("likes-panel")
        .c(h(ctx, "h3")
            .t("Likes: ")
            .dyn_t(move || count.get().to_string())
            .view())
        .c(h(ctx, "div")
            .class("action-buttons")
            .c(component::instantiate(ActionButton, ctx, like))
            .c(component::instantiate(ActionButton, ctx, dislike))
            .view())
        .view()
}

/// Where and how to mount the counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountConfig {
    /// Id of the host element the counter is rendered into.
    pub target_id: String,
    pub initial_count: i64,
}

impl Default for MountConfig {
    fn default() -> Self {
        Self {
            target_id: "application".to_string(),
            initial_count: 0,
        }
    }
}

/// Mounts the counter into the host document. The counter lives as long as the page.
pub fn mount(config: &MountConfig) -> Result<(), MountError> {
    let initial_count = config.initial_count;
    likes_view::render_to_id(&config.target_id, |ctx| {
        component::instantiate(LikesCounter, ctx, LikesCounterProps { initial_count })
    })?;
    log::info!(
        "likes counter mounted on #{} with {} like(s)",
        config.target_id,
        initial_count
    );
    Ok(())
}

/// Renders the counter to static HTML.
pub fn render_to_string(config: &MountConfig) -> String {
    let initial_count = config.initial_count;
    likes_view::render_to_string(|ctx| {
        component::instantiate(LikesCounter, ctx, LikesCounterProps { initial_count })
    })
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use likes_view::SsrNode;

    use super::*;

    const LIKE: &str = "Like! (+1)";
    const DISLIKE: &str = "Dislike! (-1)";

    fn mount_headless(initial_count: i64) -> (SsrNode, ScopeDisposer) {
        let mut root = None;
        let disposer = create_scope(|ctx| {
            let props = LikesCounterProps { initial_count };
            let view: View<SsrNode> = component::instantiate(LikesCounter, ctx, props);
            root = view.as_node().cloned();
        });
        (root.expect("LikesCounter renders a single root"), disposer)
    }

    fn displayed_count(root: &SsrNode) -> i64 {
        let heading = root.descendants_by_tag("h3").remove(0);
        let text = heading.text_content();
        text.strip_prefix("Likes: ")
            .and_then(|count| count.parse().ok())
            .unwrap_or_else(|| panic!("unexpected heading {:?}", text))
    }

    fn button(root: &SsrNode, label: &str) -> SsrNode {
        root.descendants_by_tag("button")
            .into_iter()
            .find(|button| button.text_content() == label)
            .unwrap_or_else(|| panic!("no button labelled {:?}", label))
    }

    fn activate(root: &SsrNode, delta: i64) {
        match delta {
            1 => button(root, LIKE).click(),
            -1 => button(root, DISLIKE).click(),
            _ => unreachable!("buttons only apply +1 or -1"),
        }
    }

    #[test]
    fn displays_initial_count() {
        for n in [0, 1, -1, 42, -1000, i64::from(i32::MAX), i64::MAX, i64::MIN] {
            let (root, disposer) = mount_headless(n);
            assert_eq!(displayed_count(&root), n);
            disposer.dispose();
        }
    }

    #[test]
    fn displays_initial_count_plus_activations() {
        // Small deterministic pseudo-random walks.
        let mut seed = 0x2545_f491_u32;
        for n in [-7, 0, 3, 1_000] {
            let (root, disposer) = mount_headless(n);
            let mut expected = n;
            for _ in 0..50 {
                seed ^= seed << 13;
                seed ^= seed >> 17;
                seed ^= seed << 5;
                let delta = if seed % 2 == 0 { 1 } else { -1 };
                activate(&root, delta);
                expected += delta;
            }
            assert_eq!(displayed_count(&root), expected);
            disposer.dispose();
        }
    }

    #[test]
    fn rendering_twice_is_stable() {
        let (root, disposer) = mount_headless(9);
        assert_eq!(root.to_string(), root.to_string());
        activate(&root, 1);
        let first = root.to_string();
        let second = root.to_string();
        assert_eq!(first, second);
        disposer.dispose();
    }

    #[test]
    fn like_once_from_zero() {
        let (root, disposer) = mount_headless(0);
        button(&root, LIKE).click();
        assert_eq!(displayed_count(&root), 1);
        disposer.dispose();
    }

    #[test]
    fn dislike_three_times_from_five() {
        let (root, disposer) = mount_headless(5);
        let dislike = button(&root, DISLIKE);
        dislike.click();
        dislike.click();
        dislike.click();
        assert_eq!(displayed_count(&root), 2);
        disposer.dispose();
    }

    #[test]
    fn intermediate_renders_follow_running_sum() {
        let (root, disposer) = mount_headless(0);
        let mut seen = Vec::new();
        for delta in [1, 1, -1, 1] {
            activate(&root, delta);
            seen.push(displayed_count(&root));
        }
        assert_eq!(seen, [1, 2, 1, 2]);
        disposer.dispose();
    }

    #[test]
    fn labels_do_not_depend_on_count() {
        let (root, disposer) = mount_headless(-3);
        for delta in [1, 1, 1, 1, -1] {
            let labels: Vec<_> = root
                .descendants_by_tag("button")
                .iter()
                .map(SsrNode::text_content)
                .collect();
            assert_eq!(labels, [LIKE, DISLIKE]);
            activate(&root, delta);
        }
        disposer.dispose();
    }

    #[test]
    fn only_the_count_text_is_updated() {
        let (root, disposer) = mount_headless(0);
        let like = button(&root, LIKE);
        let heading = root.descendants_by_tag("h3").remove(0);
        like.click();
        assert_eq!(button(&root, LIKE), like);
        assert_eq!(root.descendants_by_tag("h3")[0], heading);
        assert_eq!(heading.children().len(), 2);
        disposer.dispose();
    }

    #[test]
    fn count_goes_past_the_32_bit_range() {
        let (root, disposer) = mount_headless(i64::from(i32::MAX));
        activate(&root, 1);
        assert_eq!(root.descendants_by_tag("h3")[0].text_content(), "Likes: 2147483648");

        let (low, low_disposer) = mount_headless(i64::from(i32::MIN));
        activate(&low, -1);
        assert_eq!(displayed_count(&low), -2_147_483_649);
        disposer.dispose();
        low_disposer.dispose();
    }

    #[test]
    fn count_saturates_at_the_far_limits() {
        let (root, disposer) = mount_headless(i64::MAX);
        activate(&root, 1);
        assert_eq!(displayed_count(&root), i64::MAX);
        activate(&root, -1);
        assert_eq!(displayed_count(&root), i64::MAX - 1);
        disposer.dispose();

        let (root, disposer) = mount_headless(i64::MIN);
        activate(&root, -1);
        assert_eq!(displayed_count(&root), i64::MIN);
        disposer.dispose();
    }

    #[test]
    fn clicks_after_unmount_are_ignored() {
        let (root, disposer) = mount_headless(4);
        let like = button(&root, LIKE);
        disposer.dispose();
        like.click();
        assert_eq!(displayed_count(&root), 4);
    }

    #[test]
    fn action_button_calls_back_once_per_click() {
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let mut rendered = None;
        let disposer = create_scope(|ctx| {
            let props = ActionButtonProps {
                text: "Press",
                on_action: Box::new(move || counter.set(counter.get() + 1)),
            };
            let view: View<SsrNode> = component::instantiate(ActionButton, ctx, props);
            rendered = view.as_node().cloned();
        });
        let button = rendered.expect("ActionButton renders a single root");

        assert_eq!(
            button.to_string(),
            r#"<button class="ActionButton"><span>Press</span></button>"#
        );
        assert_eq!(calls.get(), 0);
        button.click();
        assert_eq!(calls.get(), 1);
        button.click();
        assert_eq!(calls.get(), 2);
        disposer.dispose();
    }

    #[test]
    fn default_mount_config() {
        let config = MountConfig::default();
        assert_eq!(config.target_id, "application");
        assert_eq!(config.initial_count, 0);
    }
}
