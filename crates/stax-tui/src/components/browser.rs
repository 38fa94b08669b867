//! Browser — the folder table, one hierarchy level at a time.
//!
//! Shows the current page of the listing with the column set for the level,
//! a paginator footer, and (at the artist level) the letter-bucket filter
//! applied client-side.

use std::time::{Duration, Instant};

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use stax_proto::cursor::Level;
use stax_proto::folder::Folder;
use stax_proto::letters::Bucket;
use stax_proto::pagination::PageSize;

use crate::action::{Action, ComponentId};
use crate::app_state::AppState;
use crate::columns::columns_for;
use crate::component::Component;
use crate::theme::{
    style_default, style_focused_border, style_muted, style_secondary, style_selected,
    style_unfocused_border,
};

const DOUBLE_CLICK: Duration = Duration::from_millis(400);

pub struct Browser {
    selected: usize,
    bucket: Option<Bucket>,
    table_state: TableState,
    /// Track last click (row index, time) for double-click detection.
    last_click: Option<(usize, Instant)>,
}

impl Browser {
    pub fn new() -> Self {
        Self {
            selected: 0,
            bucket: None,
            table_state: TableState::default(),
            last_click: None,
        }
    }

    /// Forget selection, scroll, and bucket filter — called on every level
    /// change so stale view state never survives a transition.
    pub fn reset_view(&mut self) {
        self.selected = 0;
        self.bucket = None;
        self.table_state = TableState::default();
        self.last_click = None;
    }

    /// The rows currently on screen: the pagination window, narrowed by the
    /// active bucket at the artist level.
    fn rows<'a>(&self, state: &'a AppState) -> Vec<&'a Folder> {
        let visible = state.session.visible();
        match (state.session.level(), self.bucket) {
            (Level::Artist, Some(bucket)) => visible
                .iter()
                .filter(|f| bucket.matches(&f.title))
                .collect(),
            _ => visible.iter().collect(),
        }
    }

    fn clamp_selection(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    fn open_selected(&self, state: &AppState) -> Vec<Action> {
        // Tracks are leaves — there is nothing below them to open.
        if state.session.level() == Level::Track {
            return Vec::new();
        }
        match self.rows(state).get(self.selected) {
            Some(folder) => vec![Action::Open((*folder).clone())],
            None => Vec::new(),
        }
    }

    fn title(level: Level) -> &'static str {
        match level {
            Level::Artist => " Artists ",
            Level::Album => " Albums ",
            Level::Track => " Tracks ",
        }
    }
}

impl Component for Browser {
    fn id(&self) -> ComponentId {
        ComponentId::Browser
    }

    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => vec![Action::SelectUp(1)],
            KeyCode::Down | KeyCode::Char('j') => vec![Action::SelectDown(1)],
            KeyCode::Home | KeyCode::Char('g') => vec![Action::SelectFirst],
            KeyCode::End | KeyCode::Char('G') => vec![Action::SelectLast],
            KeyCode::Enter | KeyCode::Char('l') => self.open_selected(state),
            KeyCode::Backspace | KeyCode::Char('h') | KeyCode::Esc => vec![Action::Back],
            KeyCode::PageDown | KeyCode::Char('n') => vec![Action::NextPage],
            KeyCode::PageUp | KeyCode::Char('p') => vec![Action::PrevPage],
            KeyCode::Char('<') => vec![Action::FirstPage],
            KeyCode::Char('>') => vec![Action::LastPage],
            KeyCode::Char('r') => vec![Action::CyclePageSize],
            // 1..4 pick a rung of the rows-per-page ladder directly.
            KeyCode::Char(c @ '1'..='4') => {
                let idx = c as usize - '1' as usize;
                vec![Action::SetPageSize(PageSize::ALL[idx])]
            }
            _ => Vec::new(),
        }
    }

    fn handle_mouse(&mut self, event: MouseEvent, area: Rect, state: &AppState) -> Vec<Action> {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                // Border row + header row sit above the first data row.
                let data_top = area.y + 2;
                if event.row < data_top {
                    return Vec::new();
                }
                let row = self.table_state.offset() + (event.row - data_top) as usize;
                let len = self.rows(state).len();
                if row >= len {
                    return Vec::new();
                }

                let now = Instant::now();
                let is_double = matches!(
                    self.last_click,
                    Some((r, t)) if r == row && now.duration_since(t) < DOUBLE_CLICK
                );
                self.last_click = Some((row, now));
                self.selected = row;
                if is_double {
                    self.open_selected(state)
                } else {
                    Vec::new()
                }
            }
            MouseEventKind::ScrollUp => vec![Action::SelectUp(3)],
            MouseEventKind::ScrollDown => vec![Action::SelectDown(3)],
            _ => Vec::new(),
        }
    }

    fn on_action(&mut self, action: &Action, state: &AppState) -> Vec<Action> {
        let len = self.rows(state).len();
        match action {
            Action::SelectUp(n) => {
                self.selected = self.selected.saturating_sub(*n);
            }
            Action::SelectDown(n) => {
                self.selected = (self.selected + n).min(len.saturating_sub(1));
            }
            Action::SelectFirst => self.selected = 0,
            Action::SelectLast => self.selected = len.saturating_sub(1),
            Action::SetBucket(bucket) => {
                self.bucket = *bucket;
                self.selected = 0;
            }
            Action::NextPage | Action::PrevPage | Action::FirstPage | Action::LastPage
            | Action::CyclePageSize | Action::SetPageSize(_) => {
                self.selected = 0;
            }
            _ => {}
        }
        Vec::new()
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let border_style = if focused {
            style_focused_border()
        } else {
            style_unfocused_border()
        };
        let level = state.session.level();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(Self::title(level));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [table_area, footer_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(inner);

        let rows = self.rows(state);
        self.clamp_selection(rows.len());

        if rows.is_empty() {
            let notice = if state.session.loading() {
                "loading…"
            } else {
                "no entries"
            };
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(notice, style_muted()))),
                table_area,
            );
        } else {
            let columns = columns_for(level);
            let header = Row::new(
                columns
                    .iter()
                    .map(|c| Cell::from(Span::styled(c.header, style_secondary()))),
            );
            let body = rows.iter().map(|folder| {
                Row::new(
                    columns
                        .iter()
                        .map(|c| Cell::from(Span::styled((c.cell)(folder), style_default()))),
                )
            });
            let widths: Vec<Constraint> = columns.iter().map(|c| c.width).collect();
            let table = Table::new(body, widths)
                .header(header)
                .row_highlight_style(style_selected());

            self.table_state.select(Some(self.selected));
            frame.render_stateful_widget(table, table_area, &mut self.table_state);
        }

        // Paginator footer.
        let pagination = state.session.pagination();
        let mut footer = format!(
            " page {}/{} · {} rows · {} records",
            pagination.page(),
            pagination.page_count().max(1),
            pagination.size().rows(),
            pagination.total(),
        );
        if let Some(bucket) = self.bucket {
            footer.push_str(&format!(" · bucket {}", bucket.label()));
        }
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(footer, style_secondary()),
                Span::styled("   n/p page · r rows", style_muted()),
            ])),
            footer_area,
        );
    }
}

impl Default for Browser {
    fn default() -> Self {
        Self::new()
    }
}
