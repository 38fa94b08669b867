//! LetterBar — the 28-bucket index strip above the artist table.
//!
//! Selecting a bucket narrows the current artist page client-side; selecting
//! the active bucket again clears the filter. Album/Track levels render the
//! strip dimmed and ignore it.

use ratatui::crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthChar;

use stax_proto::cursor::Level;
use stax_proto::letters::Bucket;

use crate::action::{Action, ComponentId};
use crate::app_state::AppState;
use crate::component::Component;
use crate::theme::{
    style_focused_border, style_muted, style_secondary, style_unfocused_border, C_BUCKET,
};

pub struct LetterBar {
    buckets: Vec<Bucket>,
    highlighted: usize,
    active: Option<Bucket>,
    /// Column span of each label in the last draw, for click hit-testing.
    label_spans: Vec<(u16, u16)>,
}

impl LetterBar {
    pub fn new() -> Self {
        Self {
            buckets: Bucket::all().collect(),
            highlighted: 0,
            active: None,
            label_spans: Vec::new(),
        }
    }

    /// Clear filter and highlight — called on every level change.
    pub fn reset(&mut self) {
        self.highlighted = 0;
        self.active = None;
    }

    pub fn active(&self) -> Option<Bucket> {
        self.active
    }

    fn toggle(&mut self, bucket: Bucket) -> Action {
        if self.active == Some(bucket) {
            Action::SetBucket(None)
        } else {
            Action::SetBucket(Some(bucket))
        }
    }
}

impl Component for LetterBar {
    fn id(&self) -> ComponentId {
        ComponentId::LetterBar
    }

    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if state.session.level() != Level::Artist {
            return Vec::new();
        }
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => {
                self.highlighted = self.highlighted.saturating_sub(1);
                Vec::new()
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.highlighted = (self.highlighted + 1).min(self.buckets.len() - 1);
                Vec::new()
            }
            KeyCode::Home => {
                self.highlighted = 0;
                Vec::new()
            }
            KeyCode::End => {
                self.highlighted = self.buckets.len() - 1;
                Vec::new()
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                vec![self.toggle(self.buckets[self.highlighted])]
            }
            KeyCode::Esc => vec![Action::SetBucket(None)],
            _ => Vec::new(),
        }
    }

    fn handle_mouse(&mut self, event: MouseEvent, area: Rect, state: &AppState) -> Vec<Action> {
        if state.session.level() != Level::Artist {
            return Vec::new();
        }
        if let MouseEventKind::Down(MouseButton::Left) = event.kind {
            let x = event.column.saturating_sub(area.x);
            for (i, &(start, end)) in self.label_spans.iter().enumerate() {
                if x >= start && x < end {
                    self.highlighted = i;
                    return vec![self.toggle(self.buckets[i])];
                }
            }
        }
        Vec::new()
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        if let Action::SetBucket(bucket) = action {
            self.active = *bucket;
        }
        Vec::new()
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let border_style = if focused {
            style_focused_border()
        } else {
            style_unfocused_border()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" index ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let at_artist = state.session.level() == Level::Artist;
        self.label_spans.clear();

        let mut spans = Vec::with_capacity(self.buckets.len() * 2);
        // Column cursor relative to `area`, starting past the left border.
        let mut x: u16 = inner.x - area.x;
        for (i, bucket) in self.buckets.iter().enumerate() {
            let label = bucket.label();
            let width = label.width().unwrap_or(1) as u16;
            let style = if !at_artist {
                style_muted()
            } else if self.active == Some(*bucket) {
                Style::default()
                    .fg(C_BUCKET)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else if focused && i == self.highlighted {
                style_secondary().add_modifier(Modifier::UNDERLINED | Modifier::BOLD)
            } else {
                style_secondary()
            };
            spans.push(Span::styled(label.to_string(), style));
            spans.push(Span::raw(" "));
            self.label_spans.push((x, x + width));
            x += width + 1;
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), inner);
    }
}

impl Default for LetterBar {
    fn default() -> Self {
        Self::new()
    }
}
