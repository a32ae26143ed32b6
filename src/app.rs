use crate::input::{handle_key, Action};
use crate::monitor::{RowSet, RowSink};
use crate::shutdown::StopFlag;
use crate::ui::table;
use crate::ui::theme::{Theme, ThemeVariant};
use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind, MouseEventKind};
use ratatui::backend::Backend;
use ratatui::widgets::TableState;
use ratatui::Terminal;
use std::time::{Duration, Instant};

const POLL_TIMEOUT: Duration = Duration::from_millis(150);
const PAGE: usize = 10;

/// Full-screen table view. Keeps the last row set so scrolling, resizing
/// and theme changes redraw without waiting for the next poll.
pub struct App<B: Backend> {
    terminal:          Terminal<B>,
    pub theme:         Theme,
    pub theme_variant: ThemeVariant,
    pub table_state:   TableState,
    last:              Option<RowSet>,
}

impl<B: Backend> App<B> {
    pub fn new(terminal: Terminal<B>, theme_variant: ThemeVariant) -> Self {
        Self {
            terminal,
            theme: Theme::for_variant(theme_variant),
            theme_variant,
            table_state: TableState::default(),
            last: None,
        }
    }

    pub fn draw(&mut self) -> Result<()> {
        let Self { terminal, theme, table_state, last, .. } = self;
        terminal.draw(|f| table::render(f, last.as_ref(), table_state, theme))?;
        Ok(())
    }

    fn row_count(&self) -> usize {
        self.last.as_ref().map_or(0, |s| s.rows.len())
    }

    fn select_delta(&mut self, delta: isize) {
        let len = self.row_count();
        if len == 0 {
            self.table_state.select(None);
            return;
        }
        let cur = self.table_state.selected().unwrap_or(0) as isize;
        let next = (cur + delta).clamp(0, len as isize - 1);
        self.table_state.select(Some(next as usize));
    }

    /// Apply one input action. Returns true when the screen needs a redraw.
    pub fn handle_action(&mut self, action: Action, stop: &StopFlag) -> bool {
        match action {
            Action::Quit => { stop.request(); false }
            Action::SelectUp   => { self.select_delta(-1); true }
            Action::SelectDown => { self.select_delta(1); true }
            Action::PageUp     => { self.select_delta(-(PAGE as isize)); true }
            Action::PageDown   => { self.select_delta(PAGE as isize); true }
            Action::JumpTop    => { self.select_delta(isize::MIN / 2); true }
            Action::JumpBottom => { self.select_delta(isize::MAX / 2); true }
            Action::CycleTheme => {
                self.theme_variant = self.theme_variant.next();
                self.theme = Theme::for_variant(self.theme_variant);
                true
            }
            Action::None => false,
        }
    }

    #[cfg(test)]
    pub fn into_terminal(self) -> Terminal<B> {
        self.terminal
    }
}

impl<B: Backend> RowSink for App<B> {
    fn emit(&mut self, set: &RowSet) -> Result<()> {
        self.last = Some(set.clone());
        // Rows may have disappeared under the selection.
        if let Some(sel) = self.table_state.selected() {
            let len = self.row_count();
            self.table_state.select(if len == 0 { None } else { Some(sel.min(len - 1)) });
        }
        self.draw()
    }

    /// Keep the keyboard responsive while waiting for the next poll.
    fn wait_until(&mut self, deadline: Instant, stop: &StopFlag) -> Result<()> {
        while !stop.is_requested() {
            let now = Instant::now();
            if now >= deadline { break; }
            if !event::poll((deadline - now).min(POLL_TIMEOUT))? { continue; }

            let redraw = match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    self.handle_action(handle_key(key), stop)
                }
                Event::Mouse(me) => match me.kind {
                    MouseEventKind::ScrollDown => self.handle_action(Action::SelectDown, stop),
                    MouseEventKind::ScrollUp   => self.handle_action(Action::SelectUp, stop),
                    _ => false,
                },
                Event::Resize(_, _) => true,
                _ => false,
            };
            if redraw { self.draw()?; }
        }
        Ok(())
    }
}
