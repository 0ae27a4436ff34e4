use crossterm::event::{Event, KeyCode, KeyEventKind, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Text;
use ratatui::widgets::{Paragraph, Wrap};

use super::ComponentContext;
use crate::ui::UiFrame;

/// Wrapped block of read-only text. Up/Down and the mouse wheel scroll it.
pub struct LabelComponent {
    text: String,
    style: Style,
    scroll: u16,
}

impl LabelComponent {
    pub fn new<T: Into<String>>(text: T) -> Self {
        Self {
            text: text.into(),
            style: Style::default(),
            scroll: 0,
        }
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text<T: Into<String>>(&mut self, text: T) {
        self.text = text.into();
        self.scroll = 0;
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    fn line_count(&self) -> u16 {
        u16::try_from(self.text.lines().count()).unwrap_or(u16::MAX)
    }

    fn scroll_by(&mut self, delta: i32) {
        let max = self.line_count().saturating_sub(1) as i32;
        self.scroll = (self.scroll as i32 + delta).clamp(0, max) as u16;
    }
}

impl super::Component for LabelComponent {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, _ctx: &ComponentContext) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let paragraph = Paragraph::new(Text::raw(self.text.as_str()))
            .style(self.style)
            .wrap(Wrap { trim: false })
            .scroll((self.scroll, 0));
        frame.render_widget(paragraph, area);
    }

    fn handle_event(&mut self, event: &Event, _ctx: &ComponentContext) -> bool {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Up => {
                    self.scroll_by(-1);
                    true
                }
                KeyCode::Down => {
                    self.scroll_by(1);
                    true
                }
                _ => false,
            },
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollUp => {
                    self.scroll_by(-1);
                    true
                }
                MouseEventKind::ScrollDown => {
                    self.scroll_by(1);
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
    use crossterm::event::{KeyEvent, KeyModifiers};
    use ratatui::buffer::Buffer;

    #[test]
    fn renders_text_at_area_origin() {
        let mut label = LabelComponent::new("hi there");
        let area = Rect::new(0, 0, 12, 2);
        let mut buf = Buffer::empty(area);
        {
            let mut frame = UiFrame::from_parts(area, &mut buf);
            label.render(&mut frame, Rect::new(2, 1, 10, 1), &ComponentContext::default());
        }
        assert_eq!(buf[(2, 1)].symbol(), "h");
        assert_eq!(buf[(0, 0)].symbol(), " ");
    }

    #[test]
    fn scrolling_is_clamped_to_content() {
        let mut label = LabelComponent::new("one\ntwo");
        let down = Event::Key(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE));
        let up = Event::Key(KeyEvent::new(KeyCode::Up, KeyModifiers::NONE));
        let ctx = ComponentContext::default();
        assert!(label.handle_event(&down, &ctx));
        assert!(label.handle_event(&down, &ctx));
        assert_eq!(label.scroll(), 1);
        assert!(label.handle_event(&up, &ctx));
        assert!(label.handle_event(&up, &ctx));
        assert_eq!(label.scroll(), 0);
    }
}
