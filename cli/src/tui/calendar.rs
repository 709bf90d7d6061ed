// SPDX-FileCopyrightText: 2026 Koyomi contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::{cell::RefCell, rc::Rc};

use chrono::{Datelike, NaiveDate};
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;

use koyomi_core::{Direction, ViewMode, date_key};

use crate::tui::component::{Component, Message};
use crate::tui::dispatcher::{Action, Dispatcher};
use crate::tui::store::CalendarStore;
use crate::util::{month_title, truncate_to_width, week_title};

const DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// The calendar grid page: title, weekday header, rows of seven day cells
/// and a key-hint line. Rows come from chunking the computed view, so the
/// month height follows the month instead of a fixed cell count.
pub struct CalendarPage;

impl CalendarPage {
    pub fn new() -> Self {
        Self
    }

    fn render_cell(store: &CalendarStore, day: NaiveDate, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let anchor = store.session.anchor();
        let in_anchor_month = day.month() == anchor.month() && day.year() == anchor.year();
        let is_cursor = day == store.cursor;

        let mut number = Span::from(format!(" {:>2}", day.day())).bold();
        if !in_anchor_month {
            number = number.dark_gray();
        }
        if day == store.session.today() {
            number = number.blue();
        }
        if is_cursor {
            number = number.reversed();
        }
        Line::from(number).render(Rect { height: 1, ..area }, buf);

        let body = Rect {
            y: area.y + 1,
            height: area.height.saturating_sub(1),
            ..area
        };
        let key = date_key(day);
        let events: Vec<_> = store.session.events.by_date(&key).collect();

        let visible = body.height as usize;
        let shown = if events.len() > visible {
            visible.saturating_sub(1)
        } else {
            events.len()
        };

        for (i, (_, event)) in events.iter().take(shown).enumerate() {
            let title = truncate_to_width(&event.title, usize::from(area.width.saturating_sub(1)));
            let mut chip = Span::from(format!(" {title}")).green();
            if is_cursor && i == store.slot {
                chip = chip.reversed();
            }
            let row = Rect {
                y: body.y + i as u16,
                height: 1,
                ..body
            };
            Line::from(chip).render(row, buf);
        }

        if events.len() > shown && visible > 0 {
            let row = Rect {
                y: body.y + shown as u16,
                height: 1,
                ..body
            };
            Line::from(Span::from(format!(" +{} more", events.len() - shown)).dark_gray())
                .render(row, buf);
        }
    }

    fn hints() -> Line<'static> {
        Line::from(vec![
            " Move ".into(),
            "<Arrows>".blue().bold(),
            " Prev/Next ".into(),
            "<p/n>".blue().bold(),
            " Today ".into(),
            "<t>".blue().bold(),
            " Month/Week ".into(),
            "<m/w>".blue().bold(),
            " Add ".into(),
            "<a>".blue().bold(),
            " Chip ".into(),
            "<Tab>".blue().bold(),
            " Edit ".into(),
            "<e>".blue().bold(),
            " Quit ".into(),
            "<q> ".blue().bold(),
        ])
    }
}

impl Component<CalendarStore> for CalendarPage {
    fn render(&self, store: &Rc<RefCell<CalendarStore>>, area: Rect, buf: &mut Buffer) {
        let store = store.borrow();
        let [title_area, header_area, grid_area, hints_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(area);

        let days = store.days();
        let title = match store.session.mode() {
            ViewMode::Month => month_title(store.session.anchor()),
            ViewMode::Week => week_title(days[0], days[days.len() - 1]),
        };
        let mode_label = match store.session.mode() {
            ViewMode::Month => "month",
            ViewMode::Week => "week",
        };
        Line::from(vec![
            Span::from(title).bold(),
            Span::from(format!("  ({mode_label})")).dark_gray(),
        ])
        .centered()
        .render(title_area, buf);

        let header_cols: [Rect; 7] = Layout::horizontal([Constraint::Fill(1); 7]).areas(header_area);
        for (name, col) in DAY_NAMES.iter().zip(header_cols.iter()) {
            Line::from(Span::from(*name).bold()).centered().render(*col, buf);
        }

        let rows: Vec<_> = days.chunks(7).collect();
        let row_areas =
            Layout::vertical(rows.iter().map(|_| Constraint::Fill(1))).split(grid_area);
        for (row, row_area) in rows.iter().zip(row_areas.iter()) {
            let cells: [Rect; 7] = Layout::horizontal([Constraint::Fill(1); 7]).areas(*row_area);
            for (day, cell) in row.iter().zip(cells.iter()) {
                Self::render_cell(&store, *day, *cell, buf);
            }
        }

        Self::hints().centered().render(hints_area, buf);
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        _store: &Rc<RefCell<CalendarStore>>,
        _area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        use KeyCode::*;

        if event.code == Char('c') && event.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(Message::Exit);
        }

        let action = match event.code {
            Left | Char('h') => Action::MoveCursor(-1),
            Right | Char('l') => Action::MoveCursor(1),
            Up | Char('k') => Action::MoveCursor(-7),
            Down | Char('j') => Action::MoveCursor(7),
            Char('p') => Action::Navigate(Direction::Prev),
            Char('n') => Action::Navigate(Direction::Next),
            Char('t') => Action::JumpToday,
            Char('m') => Action::SetMode(ViewMode::Month),
            Char('w') => Action::SetMode(ViewMode::Week),
            Char('a') | Enter => Action::OpenCreate,
            Tab => Action::CycleEvent,
            Char('e') => Action::OpenEdit,
            Char('q') | Esc => return Some(Message::Exit),
            _ => return None,
        };
        dispatcher.dispatch(&action);
        Some(Message::Handled)
    }
}
