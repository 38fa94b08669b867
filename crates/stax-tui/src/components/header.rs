//! Header — app title, session token, and the breadcrumb trail.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use stax_proto::cursor::AudioSource;
use stax_proto::title::parse_album_title;

use crate::app_state::AppState;
use crate::theme::{style_default, style_muted, style_secondary, C_ACCENT};

/// Not focusable — draws from shared state only.
pub struct Header;

impl Header {
    pub fn new() -> Self {
        Header
    }

    pub fn draw(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        if area.height == 0 {
            return;
        }

        // Line 1: title, loading marker, session token.
        let mut spans = vec![
            Span::styled(
                " stax ",
                Style::default().fg(C_ACCENT).add_modifier(Modifier::BOLD),
            ),
            Span::styled("· music shelf", style_muted()),
        ];
        if state.session.loading() {
            spans.push(Span::styled("  loading…", style_secondary()));
        }
        let sid = if state.sid.is_empty() {
            "sid: —".to_string()
        } else {
            format!("sid: {}", state.sid)
        };
        let pad = (area.width as usize)
            .saturating_sub(spans.iter().map(|s| s.content.chars().count()).sum::<usize>())
            .saturating_sub(sid.chars().count() + 1);
        spans.push(Span::raw(" ".repeat(pad)));
        spans.push(Span::styled(sid, style_muted()));
        frame.render_widget(Paragraph::new(Line::from(spans)), Rect { height: 1, ..area });

        if area.height < 2 {
            return;
        }

        // Line 2: breadcrumb. Nothing at the root; the raw artist title one
        // level down; artist plus the parsed album name at the track level.
        let crumb = match state.session.cursor() {
            AudioSource::Artist => Line::from(Span::styled(" Artists", style_secondary())),
            AudioSource::Album { artist } => Line::from(vec![
                Span::styled(" ❯ ", style_secondary()),
                Span::styled(artist.title.clone(), style_default()),
            ]),
            AudioSource::Track { artist, album } => Line::from(vec![
                Span::styled(" ❯ ", style_secondary()),
                Span::styled(artist.title.clone(), style_default()),
                Span::styled(" ❯ ", style_secondary()),
                Span::styled(parse_album_title(&album.title).album, style_default()),
            ]),
        };
        let crumb_area = Rect {
            y: area.y + 1,
            height: 1,
            ..area
        };
        frame.render_widget(Paragraph::new(crumb), crumb_area);
    }
}

impl Default for Header {
    fn default() -> Self {
        Self::new()
    }
}
