// SPDX-FileCopyrightText: 2026 Koyomi contributors
//
// SPDX-License-Identifier: Apache-2.0

use chrono::NaiveDate;

use crate::editor::{EditorState, Rejection};
use crate::event::EventStore;
use crate::grid::{Direction, ViewMode, compute_view, navigate};

/// The whole of the mutable calendar state: the anchor date, the active
/// view mode, the event store and the editor.
///
/// Every user interaction funnels into one of the methods below and runs
/// to completion before the next is processed; there is no other mutation
/// path and no hidden global state.
#[derive(Debug)]
pub struct Session {
    today: NaiveDate,
    anchor: NaiveDate,
    mode: ViewMode,
    pub events: EventStore,
    pub editor: EditorState,
}

impl Session {
    /// Starts a session anchored on `today`.
    pub fn new(today: NaiveDate, mode: ViewMode) -> Self {
        Self {
            today,
            anchor: today,
            mode,
            events: EventStore::new(),
            editor: EditorState::default(),
        }
    }

    /// Starts a session anchored on an arbitrary date, keeping `today`
    /// separate so the current day can still be highlighted and jumped to.
    pub fn with_anchor(today: NaiveDate, anchor: NaiveDate, mode: ViewMode) -> Self {
        Self {
            anchor,
            ..Self::new(today, mode)
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn anchor(&self) -> NaiveDate {
        self.anchor
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// The ordered cell dates currently visible.
    pub fn days_in_view(&self) -> Vec<NaiveDate> {
        compute_view(self.anchor, self.mode)
    }

    /// Shifts the window one month or one week in `direction`.
    pub fn navigate(&mut self, direction: Direction) {
        self.anchor = navigate(self.anchor, self.mode, direction);
        tracing::debug!(anchor = %self.anchor, ?direction, "navigated");
    }

    /// Sets the anchor straight back to the current date.
    pub fn jump_to_today(&mut self) {
        self.anchor = self.today;
        tracing::debug!(anchor = %self.anchor, "jumped to today");
    }

    /// Switches the windowing strategy, keeping the anchor.
    pub fn set_mode(&mut self, mode: ViewMode) {
        self.mode = mode;
        tracing::debug!(?mode, "switched view mode");
    }

    /// Saves the open draft, appending or rewriting per editor state.
    pub fn commit_draft(&mut self) -> Result<(), Rejection> {
        let Session { editor, events, .. } = self;
        if editor.is_editing() {
            editor.commit_update(events)
        } else {
            editor.commit_create(events)
        }
    }

    /// Deletes the event targeted by the open edit modal.
    pub fn delete_draft_target(&mut self) {
        let Session { editor, events, .. } = self;
        editor.commit_delete(events);
    }
}
