use std::cell::RefCell;
use std::rc::Rc;

use crossterm::event::{Event, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use term_tabs::components::{Component, ComponentContext, Hosted, LabelComponent};
use term_tabs::tabs::{FixedDensity, HostState, StripOutcome, TabSizing};
use term_tabs::ui::UiFrame;
use term_tabs::{PageId, TabError, TabHost, TabPage, TabStrip, WidgetError};

fn host() -> TabHost {
    let mut h = TabHost::new();
    h.resize(Rect::new(0, 0, 80, 24));
    h
}

fn label_page(text: &str) -> TabPage {
    TabPage::new(text).with_component(LabelComponent::new(format!("{text} body")))
}

fn mouse_down(column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }
}

fn left_click(column: u16, row: u16) -> Event {
    Event::Mouse(mouse_down(column, row))
}

fn visible(h: &TabHost, id: PageId) -> bool {
    h.tab_page_by_id(id)
        .and_then(TabPage::child)
        .is_some_and(|c| c.is_visible())
}

#[test]
fn scenario_add_add_remove() {
    let mut h = host();
    assert_eq!(h.tab_count(), 0);
    assert_eq!(h.state(), HostState::Empty);

    let a = h.add_tab_page(TabPage::new("A"));
    assert_eq!(h.tab_count(), 1);
    assert_eq!(h.selected_index(), Some(0));

    let b = h.add_tab_page(TabPage::new("B"));
    assert_eq!(h.tab_count(), 2);
    assert_eq!(h.tab_page(0).text(), "B");
    assert_eq!(h.tab_page(1).text(), "A");
    assert_eq!(h.selected_tab_id(), Some(a));

    assert!(h.remove_tab_page(a).unwrap());
    assert_eq!(h.tab_count(), 1);
    assert_eq!(h.tab_page(0).id(), b);
    assert_eq!(h.selected_tab_id(), None);
    assert_eq!(h.state(), HostState::HasTabsNoneSelected);
}

#[test]
fn count_tracks_adds_and_newest_is_first() {
    let mut h = host();
    let mut last = None;
    for i in 0..12 {
        last = Some(h.add_tab_page(TabPage::new(format!("t{i}"))));
    }
    assert_eq!(h.tab_count(), 12);
    assert_eq!(Some(h.tab_page(0).id()), last);
    assert_eq!(h.strip().placements().len(), 12);
}

#[test]
fn removal_is_by_identity_not_text() {
    let mut h = host();
    let first = h.add_tab_page(TabPage::new("same"));
    let second = h.add_tab_page(TabPage::new("same"));
    let third = h.add_tab_page(TabPage::new("same"));
    assert!(h.remove_tab_page(second).unwrap());
    let remaining: Vec<PageId> = (0..h.tab_count()).map(|i| h.tab_page(i).id()).collect();
    assert_eq!(remaining, vec![third, first]);
}

#[test]
fn invalid_indices_are_noops() {
    let mut h = host();
    h.add_tab_page(TabPage::new("A"));
    h.add_tab_page(TabPage::new("B"));
    let before = h.selected_tab_id();
    h.set_selected_index(2);
    h.set_selected_index(usize::MAX);
    assert_eq!(h.selected_tab_id(), before);
    assert!(!h.remove_tab_page_at(2).unwrap());
    assert_eq!(h.tab_count(), 2);
    assert!(h.get_tab_page(2).is_none());
}

#[test]
fn selecting_a_then_b_swaps_visible_child() {
    let mut h = host();
    let a = h.add_tab_page(label_page("A"));
    let b = h.add_tab_page(label_page("B"));
    assert!(visible(&h, a));
    h.set_selected_tab(Some(a));
    h.set_selected_tab(Some(b));
    assert!(!visible(&h, a));
    assert!(visible(&h, b));

    let region = h.region().bounds();
    let child = h.tab_page_by_id(b).and_then(TabPage::child).unwrap();
    assert_eq!(child.bounds().width, region.width - 6);
    assert_eq!(child.bounds().height, region.height - 6);
}

#[test]
fn close_glyph_and_body_clicks_are_exclusive() {
    let mut strip = TabStrip::new().with_density(&FixedDensity(2.0));
    strip.set_bounds(Rect::new(0, 0, 120, 3));
    strip.set_height(3);
    strip.add_page(TabPage::new("caption"));
    let handle = strip.handle(0).unwrap();
    let close = handle.close_glyph_rect();
    for y in 0..handle.height() {
        for x in 0..handle.width() {
            let in_glyph = x >= close.x
                && x < close.x + close.width
                && y >= close.y
                && y < close.y + close.height;
            assert_eq!(handle.hit_test_close_glyph((x, y)), in_glyph, "({x},{y})");
        }
    }
}

#[test]
fn strip_click_yields_one_outcome_per_click() {
    let mut strip = TabStrip::new();
    strip.set_bounds(Rect::new(0, 0, 40, 1));
    let id = strip.add_page(TabPage::new("abc"));
    let selections = Rc::new(RefCell::new(0));
    let counter = selections.clone();
    strip.on_any_tab_selected(move |_| *counter.borrow_mut() += 1);

    let body = mouse_down(0, 0);
    assert_eq!(strip.handle_mouse(&body).unwrap(), Some(StripOutcome::Selected(id)));
    assert_eq!(strip.handle_mouse(&body).unwrap(), Some(StripOutcome::Selected(id)));
    assert_eq!(*selections.borrow(), 2);
    assert_eq!(strip.selected_page(), Some(id));

    let glyph = strip.close_glyph_rect(0).unwrap();
    let close = mouse_down(glyph.x, glyph.y);
    assert_eq!(strip.handle_mouse(&close).unwrap(), Some(StripOutcome::Closed(id)));
    assert!(strip.is_empty());
    assert_eq!(strip.selected_page(), None);
    assert_eq!(*selections.borrow(), 2);

    // Nothing is left under the glyph.
    assert_eq!(strip.handle_mouse(&close).unwrap(), None);
}

#[test]
fn close_glyph_closes_tab_at_half_density() {
    let strip = TabStrip::new().with_density(&FixedDensity(0.5));
    let mut h = TabHost::with_strip(strip);
    h.resize(Rect::new(0, 0, 80, 24));
    let files = h.add_tab_page(label_page("Files"));
    let glyph = h.strip().close_glyph_rect(0).unwrap();
    assert!(glyph.width > 0 && glyph.height > 0);
    assert!(h.handle_event(&left_click(glyph.x, glyph.y)).unwrap());
    assert_eq!(h.tab_count(), 0);
    assert!(h.tab_page_by_id(files).is_none());
}

#[test]
fn clicking_close_on_selected_tab_leaves_gap() {
    let mut h = host();
    let a = h.add_tab_page(label_page("A"));
    let b = h.add_tab_page(label_page("B"));
    let closed = Rc::new(RefCell::new(Vec::new()));
    let log = closed.clone();
    h.on_tab_closed(move |page| log.borrow_mut().push(page.id()));

    // "A" sits second, after "B".
    let glyph = h.strip().close_glyph_rect(1).unwrap();
    assert!(h.handle_event(&left_click(glyph.x, glyph.y)).unwrap());
    assert_eq!(*closed.borrow(), vec![a]);
    assert_eq!(h.tab_count(), 1);
    assert_eq!(h.selected_tab_id(), None);
    assert!(!visible(&h, b));
}

#[test]
fn disposal_failure_surfaces_from_close_click() {
    struct Stuck;
    impl Component for Stuck {
        fn render(&mut self, _: &mut UiFrame<'_>, _: Rect, _: &ComponentContext) {}
    }
    let mut h = host();
    h.add_tab_page(TabPage::new("stuck").with_child(Box::new(
        Hosted::new(Stuck).with_release(|_| Err(WidgetError::Release("busy".into()))),
    )));
    let glyph = h.strip().close_glyph_rect(0).unwrap();
    let err = h.handle_event(&left_click(glyph.x, glyph.y)).unwrap_err();
    assert!(matches!(err, TabError::Dispose { ref text, .. } if text == "stuck"));
    assert_eq!(h.state(), HostState::Empty);
}

#[test]
fn unknown_sizing_mode_fails_fast() {
    assert!(matches!(
        "wide".parse::<TabSizing>(),
        Err(TabError::UnknownSizingMode(mode)) if mode == "wide"
    ));
}

#[test]
fn rendering_overflowing_strip_does_not_panic() {
    let mut h = TabHost::new();
    for i in 0..30 {
        h.add_tab_page(label_page(&format!("long caption {i}")));
    }
    let area = Rect::new(0, 0, 40, 10);
    let mut buf = Buffer::empty(area);
    {
        let mut frame = UiFrame::from_parts(area, &mut buf);
        h.render(&mut frame, area);
    }
    assert!(h.strip().placements().iter().any(|p| p.visible.width == 0));
    assert_eq!(buf[(1, 0)].symbol(), "l");
}

#[test]
fn dropping_host_disposes_remaining_pages() {
    let released = Rc::new(RefCell::new(0));
    {
        let mut h = host();
        for _ in 0..3 {
            let counter = released.clone();
            h.add_tab_page(TabPage::new("p").with_child(Box::new(
                Hosted::new(LabelComponent::new("x")).with_release(move |_| {
                    *counter.borrow_mut() += 1;
                    Ok(())
                }),
            )));
        }
    }
    assert_eq!(*released.borrow(), 3);
}
