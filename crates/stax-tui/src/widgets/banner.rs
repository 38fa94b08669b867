//! Transient status banners — auto-hiding messages in the top-right corner.
//!
//! Expiry is driven by the app loop's tick; the manager is owned by the App
//! and dropped with it on teardown, so no banner ever fires against a
//! torn-down terminal.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame,
};

use crate::theme::{C_BANNER_ERROR, C_BANNER_INFO};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Severity {
    Info,
    Error,
}

struct Banner {
    message: String,
    severity: Severity,
    expires: Instant,
}

pub struct BannerManager {
    banners: VecDeque<Banner>,
    max_visible: usize,
}

impl BannerManager {
    pub fn new() -> Self {
        Self {
            banners: VecDeque::new(),
            max_visible: 3,
        }
    }

    pub fn push(&mut self, message: impl Into<String>, severity: Severity, duration: Duration) {
        let msg = message.into();
        // Same message again just restarts the clock.
        self.banners.retain(|b| b.message != msg);
        self.banners.push_back(Banner {
            message: msg,
            severity,
            expires: Instant::now() + duration,
        });
        while self.banners.len() > self.max_visible * 2 {
            self.banners.pop_front();
        }
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(message, Severity::Info, Duration::from_secs(3));
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(message, Severity::Error, Duration::from_secs(5));
    }

    /// Drop expired banners. Call each tick.
    pub fn tick(&mut self) {
        let now = Instant::now();
        self.banners.retain(|b| b.expires > now);
    }

    pub fn is_empty(&self) -> bool {
        self.banners.is_empty()
    }

    /// Render banners stacked in the top-right corner of `area`.
    pub fn draw(&self, frame: &mut Frame, area: Rect) {
        if self.is_empty() {
            return;
        }
        let max_width = (area.width / 2).clamp(30, 60);
        let mut y = area.y + 1;

        for banner in self.banners.iter().rev().take(self.max_visible) {
            let msg_len = banner.message.chars().count() as u16;
            let w = (msg_len + 4).min(max_width);
            let x = area.x + area.width.saturating_sub(w + 1);

            let (color, icon) = match banner.severity {
                Severity::Info => (C_BANNER_INFO, "·"),
                Severity::Error => (C_BANNER_ERROR, "✗"),
            };

            let banner_area = Rect {
                x,
                y,
                width: w,
                height: 1,
            };
            frame.render_widget(Clear, banner_area);
            let paragraph = Paragraph::new(Line::from(vec![Span::styled(
                format!(" {} {} ", icon, &banner.message),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )]));
            frame.render_widget(paragraph, banner_area);

            y += 1;
            if y >= area.y + area.height {
                break;
            }
        }
    }
}

impl Default for BannerManager {
    fn default() -> Self {
        Self::new()
    }
}
