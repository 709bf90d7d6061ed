// SPDX-FileCopyrightText: 2026 Koyomi contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::{cell::RefCell, rc::Rc};

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Margin;
use ratatui::prelude::*;
use ratatui::symbols::border;
use ratatui::widgets::{Block, Clear};

use crate::tui::component::{Component, Message};
use crate::tui::dispatcher::{Action, Dispatcher};
use crate::tui::store::CalendarStore;
use crate::util::{byte_range_of_grapheme_at, unicode_width_of_slice};

const S_STEP_ACTIVE: &str = "◆";
const S_STEP_INACTIVE: &str = "◇";
const S_SIDER_CONNECTOR: &str = "│";
const S_SIDER_BOTTOM: &str = "└";

const MODAL_WIDTH: u16 = 44;
const MODAL_HEIGHT: u16 = 9;

/// The event modal: a centered overlay with a date field, a title field and
/// the rejection notice. The draft itself lives in the editor state; this
/// component only owns cursor and focus positions.
pub struct EditorModal {
    date: TextField,
    title: TextField,
    field_index: usize,
}

impl EditorModal {
    pub fn new() -> Self {
        Self {
            date: TextField::new("Date (YYYY-MM-DD)"),
            title: TextField::new("Title"),
            field_index: 1,
        }
    }

    fn modal_area(area: Rect) -> Rect {
        let width = area.width.min(MODAL_WIDTH);
        let height = area.height.min(MODAL_HEIGHT);
        Rect {
            x: area.x + (area.width.saturating_sub(width)) / 2,
            y: area.y + (area.height.saturating_sub(height)) / 2,
            width,
            height,
        }
    }

    fn field_areas(modal: Rect) -> [Rect; 3] {
        let inner = modal.inner(Margin::new(1, 1));
        Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .areas(inner)
    }

    fn focus(&mut self, store: &Rc<RefCell<CalendarStore>>, index: usize) {
        self.field_index = index;
        let store = store.borrow();
        if let Some(draft) = store.session.editor.draft() {
            match index {
                0 => self.date.reset(&draft.date),
                _ => self.title.reset(&draft.title),
            }
        }
    }

    fn instructions(editing: bool) -> Line<'static> {
        let mut spans: Vec<Span<'static>> = vec![
            " Save ".into(),
            "<Enter>".blue().bold(),
            " Field ".into(),
            "<Tab>".blue().bold(),
        ];
        if editing {
            spans.push(" Delete ".into());
            spans.push("<C-d>".blue().bold());
        }
        spans.push(" Cancel ".into());
        spans.push("<Esc> ".blue().bold());
        Line::from(spans)
    }
}

impl Component<CalendarStore> for EditorModal {
    fn render(&self, store: &Rc<RefCell<CalendarStore>>, area: Rect, buf: &mut Buffer) {
        let store = store.borrow();
        let Some(draft) = store.session.editor.draft() else {
            return;
        };

        let editing = store.session.editor.is_editing();
        let modal = Self::modal_area(area);
        Clear.render(modal, buf);

        let heading = if editing { " Edit Event " } else { " New Event " };
        let block = Block::bordered()
            .border_set(border::ROUNDED)
            .title(Line::from(heading.bold()).centered())
            .title_bottom(Self::instructions(editing).centered());
        block.render(modal, buf);

        let [date_area, title_area, notice_area] = Self::field_areas(modal);
        self.date
            .render(&draft.date, self.field_index == 0, false, date_area, buf);
        self.title
            .render(&draft.title, self.field_index == 1, true, title_area, buf);

        if let Some(notice) = &store.notice {
            Line::from(Span::from(notice.clone()).red().bold()).render(notice_area, buf);
        }
    }

    fn get_cursor_position(
        &self,
        store: &Rc<RefCell<CalendarStore>>,
        area: Rect,
    ) -> Option<(u16, u16)> {
        let store = store.borrow();
        let draft = store.session.editor.draft()?;

        let [date_area, title_area, _] = Self::field_areas(Self::modal_area(area));
        let (field, value, field_area) = match self.field_index {
            0 => (&self.date, &draft.date, date_area),
            _ => (&self.title, &draft.title, title_area),
        };
        Some((field_area.x + 2 + field.cursor_x(value), field_area.y + 1))
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &Rc<RefCell<CalendarStore>>,
        _area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        use KeyCode::*;

        // chords first, so Ctrl-d never lands in a text field
        if event.modifiers.contains(KeyModifiers::CONTROL) {
            return match event.code {
                Char('d') => {
                    if store.borrow().session.editor.is_editing() {
                        dispatcher.dispatch(&Action::DeleteEvent);
                    }
                    Some(Message::Handled)
                }
                Char('c') => Some(Message::Exit),
                _ => None,
            };
        }

        let value = {
            let store = store.borrow();
            let draft = store.session.editor.draft()?;
            match self.field_index {
                0 => draft.date.clone(),
                _ => draft.title.clone(),
            }
        };
        let field = match self.field_index {
            0 => &mut self.date,
            _ => &mut self.title,
        };
        if let Some(change) = field.on_key(&value, event) {
            if let FieldChange::Edited(v) = change {
                let action = match self.field_index {
                    0 => Action::UpdateDraftDate(v),
                    _ => Action::UpdateDraftTitle(v),
                };
                dispatcher.dispatch(&action);
            }
            return Some(Message::CursorUpdated);
        }

        match event.code {
            // two fields, so next and previous coincide
            Tab | BackTab | Up | Down => {
                let next = (self.field_index + 1) % 2;
                self.focus(store, next);
                Some(Message::CursorUpdated)
            }
            Enter => {
                dispatcher.dispatch(&Action::CommitDraft);
                Some(Message::Handled)
            }
            Esc => {
                dispatcher.dispatch(&Action::CancelEditor);
                Some(Message::Handled)
            }
            _ => None,
        }
    }

    fn activate(&mut self, _dispatcher: &mut Dispatcher, store: &Rc<RefCell<CalendarStore>>) {
        // the date is prefilled from the day cell, so start on the title
        self.field_index = 1;
        let store = store.borrow();
        if let Some(draft) = store.session.editor.draft() {
            self.date.reset(&draft.date);
            self.title.reset(&draft.title);
        }
    }
}

/// A single-line text input. The value itself lives in the draft; the field
/// only tracks its label and cursor position.
struct TextField {
    label: &'static str,
    character_index: usize,
}

enum FieldChange {
    Edited(String),
    Moved,
}

impl TextField {
    fn new(label: &'static str) -> Self {
        Self {
            label,
            character_index: 0,
        }
    }

    /// Puts the cursor at the end of `value`.
    fn reset(&mut self, value: &str) {
        self.character_index = value.chars().count();
    }

    fn cursor_x(&self, value: &str) -> u16 {
        unicode_width_of_slice(value, self.character_index) as u16
    }

    fn render(&self, value: &str, active: bool, is_last: bool, area: Rect, buf: &mut Buffer) {
        let color = if active { Color::Blue } else { Color::Gray };
        let marker = if active { S_STEP_ACTIVE } else { S_STEP_INACTIVE };

        Line::from(vec![
            Span::from(marker).fg(color),
            Span::from(" "),
            Span::from(self.label).bold().fg(color),
        ])
        .render(Rect { height: 1, ..area }, buf);

        Line::from(vec![
            Span::from(S_SIDER_CONNECTOR).fg(color),
            Span::from(" "),
            Span::from(value.to_string()),
        ])
        .render(
            Rect {
                y: area.y + 1,
                height: 1,
                ..area
            },
            buf,
        );

        let sider = if is_last {
            S_SIDER_BOTTOM
        } else {
            S_SIDER_CONNECTOR
        };
        Line::from(Span::from(sider).fg(color)).render(
            Rect {
                y: area.y + 2,
                height: 1,
                ..area
            },
            buf,
        );
    }

    fn on_key(&mut self, value: &str, event: KeyEvent) -> Option<FieldChange> {
        use KeyCode::*;
        match event.code {
            Left if self.character_index > 0 => {
                self.character_index -= 1;
                Some(FieldChange::Moved)
            }
            Right if self.character_index < value.chars().count() => {
                self.character_index += 1;
                Some(FieldChange::Moved)
            }
            Backspace if self.character_index > 0 => {
                let mut v = value.to_string();
                let range = byte_range_of_grapheme_at(&v, self.character_index - 1)?;
                v.replace_range(range, "");
                self.character_index -= 1;
                Some(FieldChange::Edited(v))
            }
            Char(c) => {
                let mut v = value.to_string();
                let byte_index = v
                    .char_indices()
                    .nth(self.character_index)
                    .map(|(i, _)| i)
                    .unwrap_or(v.len());
                v.insert(byte_index, c);
                self.character_index += 1;
                Some(FieldChange::Edited(v))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_field_inserts_at_the_cursor() {
        let mut field = TextField::new("Title");
        field.reset("Meting");
        for _ in 0..4 {
            field.on_key("Meting", key(KeyCode::Left));
        }

        match field.on_key("Meting", key(KeyCode::Char('e'))) {
            Some(FieldChange::Edited(v)) => assert_eq!(v, "Meeting"),
            _ => panic!("expected an edit"),
        }
    }

    #[test]
    fn test_field_backspace_removes_a_grapheme() {
        let mut field = TextField::new("Title");
        field.reset("a中b");

        match field.on_key("a中b", key(KeyCode::Backspace)) {
            Some(FieldChange::Edited(v)) => assert_eq!(v, "a中"),
            _ => panic!("expected an edit"),
        }
    }

    #[test]
    fn test_field_cursor_stops_at_both_ends() {
        let mut field = TextField::new("Title");
        field.reset("ab");

        assert!(field.on_key("ab", key(KeyCode::Right)).is_none());
        field.on_key("ab", key(KeyCode::Left));
        field.on_key("ab", key(KeyCode::Left));
        assert!(field.on_key("ab", key(KeyCode::Left)).is_none());
        assert!(field.on_key("ab", key(KeyCode::Backspace)).is_none());
    }
}
