// SPDX-FileCopyrightText: 2026 Koyomi contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::{cell::RefCell, rc::Rc};

use chrono::{NaiveDate, TimeDelta};
use koyomi_core::{Event, Session, date_key};

use crate::tui::dispatcher::{Action, Dispatcher};

/// View state wrapped around the core [`Session`].
///
/// The session owns the calendar state proper; the extra fields here are
/// purely presentational: where the keyboard cursor sits, which chip
/// within that day is selected, and the last refusal notice.
#[derive(Debug)]
pub struct CalendarStore {
    pub session: Session,

    /// The day the keyboard cursor sits on. Always inside the visible
    /// window, padding cells included.
    pub cursor: NaiveDate,

    /// Selected chip position within the cursor day.
    pub slot: usize,

    /// Surfaced text of the last refused commit, shown in the modal.
    pub notice: Option<String>,
}

impl CalendarStore {
    pub fn new(session: Session) -> Self {
        Self {
            cursor: session.anchor(),
            session,
            slot: 0,
            notice: None,
        }
    }

    pub fn into_session(self) -> Session {
        self.session
    }

    pub fn days(&self) -> Vec<NaiveDate> {
        self.session.days_in_view()
    }

    pub fn cursor_key(&self) -> String {
        date_key(self.cursor)
    }

    /// Events of the cursor day with their store indices, cloned for the
    /// renderer so no borrow outlives the frame.
    pub fn cursor_events(&self) -> Vec<(usize, Event)> {
        let key = self.cursor_key();
        self.session
            .events
            .by_date(&key)
            .map(|(index, event)| (index, event.clone()))
            .collect()
    }

    pub fn register_to(that: Rc<RefCell<Self>>, dispatcher: &mut Dispatcher) {
        let callback = Rc::new(RefCell::new(move |action: &Action| {
            that.borrow_mut().apply(action);
        }));
        dispatcher.register(callback);
    }

    fn apply(&mut self, action: &Action) {
        match action {
            Action::Navigate(direction) => {
                self.session.navigate(*direction);
                self.snap_cursor();
            }
            Action::JumpToday => {
                self.session.jump_to_today();
                self.cursor = self.session.today();
                self.slot = 0;
            }
            Action::SetMode(mode) => {
                self.session.set_mode(*mode);
                self.snap_cursor();
            }
            Action::MoveCursor(days) => {
                if let Some(candidate) = self.cursor.checked_add_signed(TimeDelta::days(*days))
                    && self.days().contains(&candidate)
                {
                    self.cursor = candidate;
                    self.slot = 0;
                }
            }
            Action::CycleEvent => {
                let count = self.cursor_events().len();
                if count > 0 {
                    self.slot = (self.slot + 1) % count;
                }
            }
            Action::OpenCreate => {
                self.notice = None;
                let key = self.cursor_key();
                self.session.editor.open_create(key);
            }
            Action::OpenEdit => {
                if let Some((index, event)) = self.cursor_events().get(self.slot).cloned() {
                    self.notice = None;
                    self.session
                        .editor
                        .open_edit(event.date, index, event.title);
                }
            }
            Action::UpdateDraftTitle(title) => {
                self.notice = None;
                self.session.editor.edit_title(title);
            }
            Action::UpdateDraftDate(date) => {
                self.notice = None;
                self.session.editor.edit_date(date);
            }
            Action::CommitDraft => match self.session.commit_draft() {
                Ok(()) => {
                    self.notice = None;
                    self.slot = 0;
                }
                Err(rejection) => {
                    tracing::debug!(%rejection, "commit refused");
                    self.notice = Some(rejection.to_string());
                }
            },
            Action::DeleteEvent => {
                self.session.delete_draft_target();
                self.notice = None;
                self.slot = 0;
            }
            Action::CancelEditor => {
                self.session.editor.cancel();
                self.notice = None;
            }
        }
    }

    /// Keeps the cursor inside the window after the view changed under it.
    fn snap_cursor(&mut self) {
        if !self.days().contains(&self.cursor) {
            self.cursor = self.session.anchor();
        }
        self.slot = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use koyomi_core::{Direction, ViewMode};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn store() -> CalendarStore {
        CalendarStore::new(Session::new(ymd(2024, 6, 15), ViewMode::Month))
    }

    #[test]
    fn test_create_flow_through_actions() {
        let mut store = store();

        store.apply(&Action::OpenCreate);
        store.apply(&Action::UpdateDraftTitle("Meeting".to_string()));
        store.apply(&Action::CommitDraft);

        assert_eq!(store.session.events.len(), 1);
        assert_eq!(
            store.session.events.get(0),
            Some(&Event::new("Meeting", "2024-06-15"))
        );
        assert!(!store.session.editor.is_open());
        assert_eq!(store.notice, None);
    }

    #[test]
    fn test_refused_commit_sets_the_notice_and_keeps_the_modal() {
        let mut store = store();

        store.apply(&Action::OpenCreate);
        store.apply(&Action::CommitDraft);

        assert!(store.session.editor.is_open());
        assert!(store.session.events.is_empty());
        assert_eq!(store.notice.as_deref(), Some("the title must not be empty"));

        // the next keystroke clears the notice
        store.apply(&Action::UpdateDraftTitle("M".to_string()));
        assert_eq!(store.notice, None);
    }

    #[test]
    fn test_cursor_stays_inside_the_window() {
        let mut store = store();
        // 2024-05-26 is the first visible cell of June 2024
        store.cursor = ymd(2024, 5, 26);

        store.apply(&Action::MoveCursor(-1));
        assert_eq!(store.cursor, ymd(2024, 5, 26));

        store.apply(&Action::MoveCursor(1));
        assert_eq!(store.cursor, ymd(2024, 5, 27));
    }

    #[test]
    fn test_cursor_snaps_back_after_navigation() {
        let mut store = store();
        store.apply(&Action::MoveCursor(7));
        assert_eq!(store.cursor, ymd(2024, 6, 22));

        store.apply(&Action::Navigate(Direction::Next));
        // June 22 is not visible in July, so the cursor follows the anchor
        assert_eq!(store.cursor, ymd(2024, 7, 15));
    }

    #[test]
    fn test_cycle_selects_chips_in_store_order() {
        let mut store = store();
        for title in ["One", "Two"] {
            store.apply(&Action::OpenCreate);
            store.apply(&Action::UpdateDraftTitle(title.to_string()));
            store.apply(&Action::CommitDraft);
        }
        store
            .session
            .events
            .add(Event::new("Elsewhere", "2024-06-16"));

        assert_eq!(store.slot, 0);
        store.apply(&Action::CycleEvent);
        assert_eq!(store.slot, 1);
        store.apply(&Action::CycleEvent);
        assert_eq!(store.slot, 0);
    }

    #[test]
    fn test_open_edit_targets_the_selected_slot() {
        let mut store = store();
        for title in ["One", "Two"] {
            store.apply(&Action::OpenCreate);
            store.apply(&Action::UpdateDraftTitle(title.to_string()));
            store.apply(&Action::CommitDraft);
        }

        store.apply(&Action::CycleEvent);
        store.apply(&Action::OpenEdit);
        store.apply(&Action::UpdateDraftTitle("Two (edited)".to_string()));
        store.apply(&Action::CommitDraft);

        assert_eq!(store.session.events.get(1).unwrap().title, "Two (edited)");
        assert_eq!(store.session.events.get(0).unwrap().title, "One");
    }

    #[test]
    fn test_open_edit_without_events_is_a_no_op() {
        let mut store = store();
        store.apply(&Action::OpenEdit);
        assert!(!store.session.editor.is_open());
    }

    #[test]
    fn test_delete_through_the_modal() {
        let mut store = store();
        for title in ["One", "Two"] {
            store.apply(&Action::OpenCreate);
            store.apply(&Action::UpdateDraftTitle(title.to_string()));
            store.apply(&Action::CommitDraft);
        }

        store.apply(&Action::OpenEdit);
        store.apply(&Action::DeleteEvent);

        assert_eq!(store.session.events.len(), 1);
        assert_eq!(store.session.events.get(0).unwrap().title, "Two");
        assert!(!store.session.editor.is_open());
    }

    #[test]
    fn test_jump_today_moves_cursor_and_anchor() {
        let mut store = store();
        store.apply(&Action::Navigate(Direction::Prev));
        store.apply(&Action::Navigate(Direction::Prev));

        store.apply(&Action::JumpToday);
        assert_eq!(store.session.anchor(), ymd(2024, 6, 15));
        assert_eq!(store.cursor, ymd(2024, 6, 15));
    }
}
