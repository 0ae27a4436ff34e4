use crossterm::event::{Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, List, ListItem};

use super::ComponentContext;
use crate::layout::to_local;
use crate::ui::UiFrame;

/// Scrollable single-selection list, driven by arrow keys and the mouse.
pub struct ListComponent {
    items: Vec<String>,
    selected: usize,
    title: String,
    offset: usize,
    /// Inner area of the last render, used to map clicks to rows.
    inner: Rect,
}

impl ListComponent {
    pub fn new<T: Into<String>>(title: T) -> Self {
        Self {
            items: Vec::new(),
            selected: 0,
            title: title.into(),
            offset: 0,
            inner: Rect::default(),
        }
    }

    pub fn with_items<I, T>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.set_items(items.into_iter().map(Into::into).collect());
        self
    }

    pub fn set_items(&mut self, items: Vec<String>) {
        self.items = items;
        if self.selected >= self.items.len() {
            self.selected = self.items.len().saturating_sub(1);
        }
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_item(&self) -> Option<&str> {
        self.items.get(self.selected).map(String::as_str)
    }

    pub fn set_selected(&mut self, selected: usize) {
        self.selected = selected.min(self.items.len().saturating_sub(1));
    }

    pub fn scroll_offset(&self) -> usize {
        self.offset
    }

    pub fn move_selection(&mut self, delta: isize) {
        if self.items.is_empty() {
            self.selected = 0;
            return;
        }
        if delta.is_negative() {
            self.selected = self.selected.saturating_sub(delta.unsigned_abs());
        } else {
            self.selected = (self.selected + delta as usize).min(self.items.len() - 1);
        }
    }

    fn keep_selected_in_view(&mut self, view: usize) {
        if view == 0 || self.items.is_empty() {
            self.offset = 0;
            return;
        }
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + view {
            self.offset = self.selected + 1 - view;
        }
    }

    fn block(&self, focused: bool) -> Block<'_> {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(self.title.as_str());
        if focused {
            block.border_style(Style::default().fg(crate::theme::accent()))
        } else {
            block
        }
    }
}

impl super::Component for ListComponent {
    fn resize(&mut self, area: Rect, _ctx: &ComponentContext) {
        let inner = self.block(false).inner(area);
        self.inner = inner;
        self.keep_selected_in_view(self.inner.height as usize);
    }

    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        let block = self.block(ctx.focused());
        let inner = block.inner(area);
        frame.render_widget(block, area);
        self.inner = inner;
        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let view = inner.height as usize;
        self.keep_selected_in_view(view);
        let items = self
            .items
            .iter()
            .enumerate()
            .skip(self.offset)
            .take(view)
            .map(|(i, item)| {
                let item = ListItem::new(item.clone());
                if i == self.selected {
                    item.style(Style::default().add_modifier(Modifier::REVERSED))
                } else {
                    item
                }
            })
            .collect::<Vec<_>>();
        frame.render_widget(List::new(items), inner);
    }

    fn handle_event(&mut self, event: &Event, _ctx: &ComponentContext) -> bool {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Up | KeyCode::Char('k') => {
                    self.move_selection(-1);
                    true
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    self.move_selection(1);
                    true
                }
                KeyCode::PageUp => {
                    self.move_selection(-5);
                    true
                }
                KeyCode::PageDown => {
                    self.move_selection(5);
                    true
                }
                KeyCode::Home => {
                    self.selected = 0;
                    true
                }
                KeyCode::End => {
                    if !self.items.is_empty() {
                        self.selected = self.items.len() - 1;
                    }
                    true
                }
                _ => false,
            },
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollUp => {
                    self.move_selection(-1);
                    true
                }
                MouseEventKind::ScrollDown => {
                    self.move_selection(1);
                    true
                }
                MouseEventKind::Down(MouseButton::Left) => {
                    let Some((_, row)) = to_local(self.inner, mouse.column, mouse.row) else {
                        return false;
                    };
                    let index = self.offset + row as usize;
                    if index < self.items.len() {
                        self.selected = index;
                    }
                    true
                }
                _ => false,
            },
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Component;
    use crossterm::event::{KeyEvent, KeyModifiers, MouseEvent};

    fn key_event(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctx() -> ComponentContext {
        ComponentContext::new(true)
    }

    #[test]
    fn selection_moves_with_keys() {
        let mut list = ListComponent::new("t").with_items(["a", "b", "c"]);
        let _ = list.handle_event(&key_event(KeyCode::Down), &ctx());
        assert_eq!(list.selected(), 1);
        let _ = list.handle_event(&key_event(KeyCode::Up), &ctx());
        assert_eq!(list.selected(), 0);
    }

    #[test]
    fn home_and_end_keys() {
        let mut list = ListComponent::new("t").with_items(["a", "b", "c", "d"]);
        let _ = list.handle_event(&key_event(KeyCode::End), &ctx());
        assert_eq!(list.selected(), 3);
        let _ = list.handle_event(&key_event(KeyCode::Home), &ctx());
        assert_eq!(list.selected(), 0);
    }

    #[test]
    fn page_keys_move_more() {
        let mut list = ListComponent::new("t").with_items((0..20).map(|i| i.to_string()));
        let _ = list.handle_event(&key_event(KeyCode::PageDown), &ctx());
        assert_eq!(list.selected(), 5);
        let _ = list.handle_event(&key_event(KeyCode::PageUp), &ctx());
        assert_eq!(list.selected(), 0);
    }

    #[test]
    fn resize_scrolls_selection_into_view() {
        let mut list = ListComponent::new("t").with_items((0..20).map(|i| i.to_string()));
        list.set_selected(15);
        list.resize(Rect::new(0, 0, 10, 7), &ctx());
        assert_eq!(list.scroll_offset(), 11);
    }

    #[test]
    fn click_selects_row() {
        let mut list = ListComponent::new("t").with_items(["a", "b", "c"]);
        list.resize(Rect::new(4, 4, 10, 6), &ctx());
        let click = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 6,
            row: 7,
            modifiers: KeyModifiers::NONE,
        });
        assert!(list.handle_event(&click, &ctx()));
        assert_eq!(list.selected_item(), Some("c"));
    }
}
