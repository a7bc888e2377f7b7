//! End-to-end tests driving the engine through its public facade.

use pretty_assertions::assert_eq;

use tinsel::error::Error;
use tinsel::geometry::Rect;
use tinsel::surface::{Color, RecordingSurface};
use tinsel::testing::Harness;
use tinsel::timer::TickCtx;
use tinsel::dirty::DirtyTracker;
use tinsel::tree::{NodeId, Payload, Tree};
use tinsel::widgets::{Button, Label, Panel, Slider};
use tinsel::{Ui, UiConfig};

// ---------------------------------------------------------------------------
// Dirty tracking
// ---------------------------------------------------------------------------

#[test]
fn dirty_list_is_exactly_the_marked_node() {
    let mut ui = Ui::new(UiConfig::default());
    let win = ui
        .create_window("main", Rect::new(0, 0, 800, 400), Color::BLACK)
        .unwrap();
    let a = Button::new("a").mount(&mut ui, win, Rect::new(10, 10, 100, 30)).unwrap();
    let b = Button::new("b").mount(&mut ui, win, Rect::new(10, 50, 100, 30)).unwrap();
    let c = Button::new("c").mount(&mut ui, win, Rect::new(10, 90, 100, 30)).unwrap();

    // Drain construction invalidations with one frame.
    let mut surface = RecordingSurface::new();
    assert!(ui.render_frame(&mut surface));
    assert!(ui.dirty().dirty_list().is_empty());

    ui.invalidate(b);
    assert_eq!(ui.dirty().dirty_list(), &[b]);
    assert!(!ui.dirty().dirty_list().contains(&a));
    assert!(!ui.dirty().dirty_list().contains(&c));

    assert!(ui.render_frame(&mut surface));
    assert!(ui.dirty().dirty_list().is_empty());
}

#[test]
fn repeated_invalidations_batch_into_one_frame() {
    let mut h = Harness::new(200, 100);
    let root = h.root();
    let label = Label::new("x").mount(h.ui_mut(), root, Rect::new(5, 5, 40, 10)).unwrap();
    h.render();

    for _ in 0..10 {
        h.ui_mut().invalidate(label);
    }
    assert!(h.render());
    assert!(!h.render()); // batched: exactly one frame
}

#[test]
fn idle_loop_produces_no_frames() {
    let mut h = Harness::new(200, 100);
    h.render();
    for _ in 0..100 {
        assert!(!h.render());
    }
    assert_eq!(h.surface().frames, 1);
}

// ---------------------------------------------------------------------------
// Arena & identity
// ---------------------------------------------------------------------------

#[test]
fn arena_exhaustion_is_recoverable() {
    // Capacity 3: window + two widgets fills the arena.
    let mut ui = Ui::new(UiConfig::new().arena_capacity(3));
    let win = ui
        .create_window("small", Rect::new(0, 0, 100, 100), Color::BLACK)
        .unwrap();
    let a = Label::new("a").mount(&mut ui, win, Rect::new(0, 0, 10, 10)).unwrap();
    Label::new("b").mount(&mut ui, win, Rect::new(0, 10, 10, 10)).unwrap();

    let err = Label::new("c")
        .mount(&mut ui, win, Rect::new(0, 20, 10, 10))
        .unwrap_err();
    assert_eq!(err, Error::ArenaFull);

    // The engine is untouched and usable: free a slot, retry succeeds.
    ui.destroy_node(a);
    assert!(Label::new("c").mount(&mut ui, win, Rect::new(0, 20, 10, 10)).is_ok());
}

#[test]
fn stale_id_is_rejected_even_after_slot_reuse() {
    let mut ui = Ui::new(UiConfig::new().arena_capacity(2));
    let win = ui
        .create_window("w", Rect::new(0, 0, 100, 100), Color::BLACK)
        .unwrap();
    let old = Label::new("old").mount(&mut ui, win, Rect::new(0, 0, 10, 10)).unwrap();
    ui.destroy_node(old);
    let new = Label::new("new").mount(&mut ui, win, Rect::new(0, 0, 10, 10)).unwrap();

    // Same slot, different generation.
    assert_ne!(old, new);
    assert!(!ui.tree().contains(old));
    assert_eq!(ui.set_label_text(old, "nope"), Err(Error::NodeGone));
    ui.destroy_node(old); // no-op, must not hit the new occupant
    assert!(ui.tree().contains(new));
}

#[test]
fn destroying_a_subtree_reclaims_everything() {
    let mut h = Harness::new(200, 100);
    let root = h.root();
    let panel = Panel::new().mount(h.ui_mut(), root, Rect::new(10, 10, 100, 80)).unwrap();
    let a = Label::new("a").mount(h.ui_mut(), panel, Rect::new(0, 0, 10, 10)).unwrap();
    let b = Label::new("b").mount(h.ui_mut(), panel, Rect::new(0, 10, 10, 10)).unwrap();

    let before = h.ui().tree().len();
    h.ui_mut().destroy_node(panel);
    assert_eq!(h.ui().tree().len(), before - 3);
    assert!(!h.ui().tree().contains(a));
    assert!(!h.ui().tree().contains(b));
}

// ---------------------------------------------------------------------------
// Timers
// ---------------------------------------------------------------------------

#[test]
fn one_shot_timer_lifecycle() {
    use std::cell::Cell;
    use std::rc::Rc;

    let mut h = Harness::new(100, 100);
    let fired = Rc::new(Cell::new(0));
    let counter = Rc::clone(&fired);
    h.ui_mut()
        .set_timer(100, false, Box::new(move |_ctx: &mut TickCtx<'_>| {
            counter.set(counter.get() + 1);
        }))
        .unwrap();

    // First tick anchors the deadline at now + period.
    assert_eq!(h.advance(50), 0); // now = 50, deadline = 150
    assert_eq!(fired.get(), 0);
    assert_eq!(h.advance(100), 1); // now = 150: fires exactly once
    assert_eq!(fired.get(), 1);
    assert_eq!(h.advance(150), 0); // now = 300: slot already freed
    assert_eq!(fired.get(), 1);
    assert_eq!(h.ui().active_timers(), 0);
}

#[test]
fn repeating_timer_drives_frames() {
    let mut h = Harness::new(100, 100);
    let root = h.root();
    let label = Label::new("0").mount(h.ui_mut(), root, Rect::new(5, 5, 20, 10)).unwrap();
    h.render();

    h.ui_mut()
        .set_timer(16, true, Box::new(move |ctx: &mut TickCtx<'_>| {
            ctx.dirty.mark_dirty(label);
            ctx.dirty.request_redraw();
        }))
        .unwrap();

    h.advance(1); // anchor
    assert!(!h.render());
    h.advance(16);
    assert!(h.render());
    h.advance(16);
    assert!(h.render());
}

#[test]
fn timer_can_cancel_itself_from_its_callback() {
    use std::cell::Cell;
    use std::rc::Rc;

    let mut h = Harness::new(100, 100);
    let fired = Rc::new(Cell::new(0));
    let id_cell: Rc<Cell<Option<tinsel::timer::TimerId>>> = Rc::new(Cell::new(None));

    let counter = Rc::clone(&fired);
    let id_for_cb = Rc::clone(&id_cell);
    let id = h
        .ui_mut()
        .set_timer(10, true, Box::new(move |ctx: &mut TickCtx<'_>| {
            counter.set(counter.get() + 1);
            if let Some(id) = id_for_cb.get() {
                ctx.cancel(id);
            }
        }))
        .unwrap();
    id_cell.set(Some(id));

    h.advance(1); // anchor
    assert_eq!(h.advance(10), 1);
    // Cancelled itself: never fires again.
    assert_eq!(h.advance(1000), 0);
    assert_eq!(fired.get(), 1);
    assert_eq!(h.ui().active_timers(), 0);
}

#[test]
fn timer_table_exhaustion_is_recoverable() {
    let mut h = Harness::with_config(100, 100, UiConfig::new().timer_capacity(2));
    let a = h.ui_mut().set_timer(10, true, Box::new(|_| {})).unwrap();
    h.ui_mut().set_timer(10, true, Box::new(|_| {})).unwrap();
    assert_eq!(
        h.ui_mut().set_timer(10, true, Box::new(|_| {})).unwrap_err(),
        Error::TimerTableFull
    );

    h.ui_mut().cancel_timer(a);
    assert!(h.ui_mut().set_timer(10, true, Box::new(|_| {})).is_ok());
}

// ---------------------------------------------------------------------------
// Event routing
// ---------------------------------------------------------------------------

#[test]
fn click_activates_button_and_fires_on_change() {
    fn relabel(tree: &mut Tree, dirty: &mut DirtyTracker, id: NodeId) {
        if let Some(node) = tree.node_mut(id) {
            if let Payload::Button { label, .. } = &mut node.payload {
                *label = "clicked".to_owned();
            }
        }
        dirty.mark_dirty(id);
        dirty.request_redraw();
    }

    let mut h = Harness::new(200, 100);
    let root = h.root();
    let button = Button::new("ok")
        .on_change(relabel)
        .mount(h.ui_mut(), root, Rect::new(10, 10, 50, 20))
        .unwrap();
    h.render();

    // Press arms the button and requests a frame.
    assert_eq!(h.press(20, 15), Some(button));
    assert!(h.render());
    assert!(h.surface().contains("\"ok\""));

    // Release activates.
    assert_eq!(h.release(20, 15), Some(button));
    h.reset_transcript();
    assert!(h.render());
    assert!(h.surface().contains("\"clicked\""));
}

#[test]
fn overlapping_widgets_route_to_topmost() {
    let mut h = Harness::new(200, 100);
    let root = h.root();
    let under = Button::new("under").mount(h.ui_mut(), root, Rect::new(10, 10, 60, 40)).unwrap();
    let over = Button::new("over").mount(h.ui_mut(), root, Rect::new(40, 30, 60, 40)).unwrap();

    // Overlap region goes to the later-mounted (topmost) sibling.
    assert_eq!(h.click(50, 35), Some(over));
    // Exclusive region of the earlier sibling still works.
    assert_eq!(h.click(15, 15), Some(under));
}

#[test]
fn hidden_subtree_is_skipped_by_routing_and_rendering() {
    let mut h = Harness::new(200, 100);
    let root = h.root();
    let panel = Panel::new().mount(h.ui_mut(), root, Rect::new(10, 10, 100, 60)).unwrap();
    let button = Button::new("hideme").mount(h.ui_mut(), panel, Rect::new(5, 5, 50, 20)).unwrap();
    h.render();

    assert_eq!(h.click(20, 20), Some(button));

    h.ui_mut().set_hidden(panel, true).unwrap();
    // The button's own flag is untouched, but it is effectively hidden.
    assert!(!h.ui().tree().node(button).unwrap().hidden);
    assert!(h.ui().is_hidden(button));

    // Events fall through to the window and go unconsumed.
    assert_eq!(h.click(20, 20), None);

    // And nothing in the subtree is painted.
    h.reset_transcript();
    h.render();
    assert!(!h.surface().contains("hideme"));

    // Showing the panel restores both.
    h.ui_mut().set_hidden(panel, false).unwrap();
    assert_eq!(h.click(20, 20), Some(button));
}

#[test]
fn unconsumed_event_bubbles_and_falls_through() {
    let mut h = Harness::new(200, 100);
    let root = h.root();
    // A bare label has no on_event; a click on it bubbles to the window,
    // which has none either.
    Label::new("text").mount(h.ui_mut(), root, Rect::new(10, 10, 40, 10)).unwrap();
    assert_eq!(h.click(15, 15), None);
}

#[test]
fn slider_press_and_drag_update_value() {
    use std::cell::Cell;

    thread_local! {
        static CHANGES: Cell<u32> = const { Cell::new(0) };
    }
    fn count_change(_: &mut Tree, _: &mut DirtyTracker, _: NodeId) {
        CHANGES.with(|c| c.set(c.get() + 1));
    }

    let mut h = Harness::new(200, 100);
    let root = h.root();
    // Track columns x=10..=110 (width 101), range 0..100: one unit per column.
    let slider = Slider::new(0.0, 100.0)
        .on_change(count_change)
        .mount(h.ui_mut(), root, Rect::new(10, 40, 101, 8))
        .unwrap();

    CHANGES.with(|c| c.set(0));
    assert_eq!(h.press(60, 44), Some(slider));
    let value = |h: &Harness| match h.ui().tree().node(slider).unwrap().payload {
        Payload::Slider { value, .. } => value,
        _ => unreachable!(),
    };
    assert_eq!(value(&h), 50.0);

    h.drag(110, 44);
    assert_eq!(value(&h), 100.0);

    // Dragging past the end clamps; the pointer stays captured by the
    // slider even though the position left its rect.
    h.drag(500, 44);
    assert_eq!(value(&h), 100.0);
    h.release(500, 44);

    // Two distinct value changes; the clamped repeat doesn't count.
    CHANGES.with(|c| assert_eq!(c.get(), 2));
}

#[test]
fn slider_max_is_reachable_by_pointer() {
    let mut h = Harness::new(200, 100);
    let root = h.root();
    // Track columns x=10..=109: the last column inside the rect must map
    // to the maximum value.
    let slider = Slider::new(0.0, 100.0)
        .mount(h.ui_mut(), root, Rect::new(10, 40, 100, 8))
        .unwrap();

    assert_eq!(h.press(109, 44), Some(slider));
    match h.ui().tree().node(slider).unwrap().payload {
        Payload::Slider { value, .. } => assert_eq!(value, 100.0),
        _ => unreachable!(),
    }
    h.release(109, 44);

    // And the minimum at the first column.
    h.press(10, 44);
    match h.ui().tree().node(slider).unwrap().payload {
        Payload::Slider { value, .. } => assert_eq!(value, 0.0),
        _ => unreachable!(),
    }
    h.release(10, 44);
}

#[test]
fn release_outside_button_disarms_without_activating() {
    fn relabel(tree: &mut Tree, _dirty: &mut DirtyTracker, id: NodeId) {
        if let Some(node) = tree.node_mut(id) {
            if let Payload::Button { label, .. } = &mut node.payload {
                *label = "activated".to_owned();
            }
        }
    }

    let mut h = Harness::new(200, 100);
    let root = h.root();
    let button = Button::new("ok")
        .on_change(relabel)
        .mount(h.ui_mut(), root, Rect::new(10, 10, 50, 20))
        .unwrap();
    h.render();

    // Press arms; the release lands far outside the button but is still
    // routed to it through pointer capture.
    assert_eq!(h.press(20, 15), Some(button));
    assert_eq!(h.release(150, 90), Some(button));

    match &h.ui().tree().node(button).unwrap().payload {
        Payload::Button { label, pressed } => {
            // Disarmed, not activated.
            assert!(!pressed);
            assert_eq!(label, "ok");
        }
        _ => unreachable!(),
    }

    // The disarm repaints the button in its released face.
    h.reset_transcript();
    assert!(h.render());
    assert!(h.surface().contains("fill 10,10 50x20 #808080"));
}

// ---------------------------------------------------------------------------
// Destroyed nodes vs. pending dirt
// ---------------------------------------------------------------------------

#[test]
fn render_survives_dirty_entries_for_destroyed_nodes() {
    let mut h = Harness::new(200, 100);
    let root = h.root();
    let label = Label::new("gone").mount(h.ui_mut(), root, Rect::new(5, 5, 40, 10)).unwrap();

    // Mark dirty, then destroy before the frame happens.
    h.ui_mut().invalidate(label);
    h.ui_mut().destroy_node(label);

    assert!(h.render());
    assert!(!h.surface().contains("gone"));
}
