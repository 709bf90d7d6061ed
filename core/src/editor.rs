// SPDX-FileCopyrightText: 2026 Koyomi contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use crate::event::{Event, EventStore};
use crate::grid::parse_date_key;

/// The in-progress, uncommitted title and date held while the modal is open.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Draft {
    pub date: String,
    pub title: String,
}

/// The modal editor state machine.
///
/// Closed -> Create -> Closed and Closed -> Edit -> Closed are the only
/// paths; a closed editor holds no draft at all. Commits are the only
/// transitions that touch the store, and a refused commit leaves the state
/// untouched so the user can fix the input.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum EditorState {
    #[default]
    Closed,

    /// Drafting a brand-new event for a day cell.
    Create(Draft),

    /// Rewriting the event at `index`. The store must keep that index valid
    /// while the modal is open; the single-threaded event loop guarantees it.
    Edit { index: usize, draft: Draft },
}

/// Why a commit was refused. The modal stays open when one is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    EmptyTitle,
    BadDate,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::EmptyTitle => write!(f, "the title must not be empty"),
            Rejection::BadDate => write!(f, "the date must be a YYYY-MM-DD day"),
        }
    }
}

impl EditorState {
    pub fn is_open(&self) -> bool {
        !matches!(self, EditorState::Closed)
    }

    /// Whether the open modal targets an existing event.
    pub fn is_editing(&self) -> bool {
        matches!(self, EditorState::Edit { .. })
    }

    pub fn draft(&self) -> Option<&Draft> {
        match self {
            EditorState::Closed => None,
            EditorState::Create(draft) | EditorState::Edit { draft, .. } => Some(draft),
        }
    }

    fn draft_mut(&mut self) -> Option<&mut Draft> {
        match self {
            EditorState::Closed => None,
            EditorState::Create(draft) | EditorState::Edit { draft, .. } => Some(draft),
        }
    }

    /// Opens the modal to create a new event on `date` with an empty title.
    pub fn open_create(&mut self, date: impl Into<String>) {
        *self = EditorState::Create(Draft {
            date: date.into(),
            title: String::new(),
        });
    }

    /// Opens the modal on the existing event at `index`, seeding the draft
    /// with its current title and date.
    pub fn open_edit(&mut self, date: impl Into<String>, index: usize, title: impl Into<String>) {
        *self = EditorState::Edit {
            index,
            draft: Draft {
                date: date.into(),
                title: title.into(),
            },
        };
    }

    /// Replaces the draft title. A no-op while the modal is closed.
    pub fn edit_title(&mut self, title: &str) {
        if let Some(draft) = self.draft_mut() {
            draft.title = title.to_string();
        }
    }

    /// Replaces the draft date. A no-op while the modal is closed.
    pub fn edit_date(&mut self, date: &str) {
        if let Some(draft) = self.draft_mut() {
            draft.date = date.to_string();
        }
    }

    /// Appends the draft to the store and closes the modal.
    ///
    /// Legal only while creating; refuses without side effects when the
    /// title is blank or the date is not a well-formed day.
    pub fn commit_create(&mut self, store: &mut EventStore) -> Result<(), Rejection> {
        let EditorState::Create(draft) = self else {
            return Ok(());
        };
        validate(draft)?;
        store.add(Event::new(draft.title.clone(), draft.date.clone()));
        *self = EditorState::Closed;
        Ok(())
    }

    /// Rewrites the targeted event in place and closes the modal.
    pub fn commit_update(&mut self, store: &mut EventStore) -> Result<(), Rejection> {
        let EditorState::Edit { index, draft } = self else {
            return Ok(());
        };
        validate(draft)?;
        store.update(*index, draft.title.clone(), draft.date.clone());
        *self = EditorState::Closed;
        Ok(())
    }

    /// Removes the targeted event and closes the modal unconditionally.
    /// Later events shift down one index, which is why the modal never
    /// stays open across a delete.
    pub fn commit_delete(&mut self, store: &mut EventStore) {
        if let EditorState::Edit { index, .. } = self {
            store.remove(*index);
            *self = EditorState::Closed;
        }
    }

    /// Discards the draft without touching the store. Always safe, and a
    /// no-op when already closed.
    pub fn cancel(&mut self) {
        *self = EditorState::Closed;
    }
}

fn validate(draft: &Draft) -> Result<(), Rejection> {
    if draft.title.trim().is_empty() {
        return Err(Rejection::EmptyTitle);
    }
    if parse_date_key(&draft.date).is_none() {
        return Err(Rejection::BadDate);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_flow() {
        let mut store = EventStore::new();
        let mut editor = EditorState::default();

        editor.open_create("2024-06-15");
        editor.edit_title("Meeting");
        editor.commit_create(&mut store).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(0), Some(&Event::new("Meeting", "2024-06-15")));
        assert_eq!(editor, EditorState::Closed);
    }

    #[test]
    fn test_commit_with_empty_title_is_refused() {
        let mut store = EventStore::new();
        let mut editor = EditorState::default();

        editor.open_create("2024-06-15");
        editor.edit_title("   ");
        let refused = editor.commit_create(&mut store);

        assert_eq!(refused, Err(Rejection::EmptyTitle));
        assert!(store.is_empty());
        assert!(editor.is_open());
        // the draft survives the refusal untouched
        assert_eq!(editor.draft().unwrap().date, "2024-06-15");
    }

    #[test]
    fn test_commit_with_malformed_date_is_refused() {
        let mut store = EventStore::new();
        let mut editor = EditorState::default();

        editor.open_create("");
        editor.edit_title("Meeting");
        assert_eq!(editor.commit_create(&mut store), Err(Rejection::BadDate));

        editor.edit_date("2024-06-32");
        assert_eq!(editor.commit_create(&mut store), Err(Rejection::BadDate));

        assert!(store.is_empty());
        assert!(editor.is_open());
    }

    #[test]
    fn test_edit_flow() {
        let mut store = EventStore::new();
        store.add(Event::new("Meeting", "2024-06-15"));
        let mut editor = EditorState::default();

        editor.open_edit("2024-06-15", 0, "Meeting");
        editor.edit_title("Lunch");
        editor.commit_update(&mut store).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(0), Some(&Event::new("Lunch", "2024-06-15")));
        assert_eq!(editor, EditorState::Closed);
    }

    #[test]
    fn test_edit_can_move_the_event_to_another_day() {
        let mut store = EventStore::new();
        store.add(Event::new("Meeting", "2024-06-15"));
        let mut editor = EditorState::default();

        editor.open_edit("2024-06-15", 0, "Meeting");
        editor.edit_date("2024-06-20");
        editor.commit_update(&mut store).unwrap();

        assert_eq!(store.get(0), Some(&Event::new("Meeting", "2024-06-20")));
    }

    #[test]
    fn test_delete_closes_and_shifts_remaining_events() {
        let mut store = EventStore::new();
        store.add(Event::new("Meeting", "2024-06-15"));
        store.add(Event::new("Lunch", "2024-06-16"));
        let mut editor = EditorState::default();

        editor.open_edit("2024-06-15", 0, "Meeting");
        editor.commit_delete(&mut store);

        assert_eq!(editor, EditorState::Closed);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(0), Some(&Event::new("Lunch", "2024-06-16")));
    }

    #[test]
    fn test_delete_works_with_a_blank_draft() {
        // delete is unconditional; validation applies to saves only
        let mut store = EventStore::new();
        store.add(Event::new("Meeting", "2024-06-15"));
        let mut editor = EditorState::default();

        editor.open_edit("2024-06-15", 0, "Meeting");
        editor.edit_title("");
        editor.commit_delete(&mut store);

        assert!(store.is_empty());
        assert_eq!(editor, EditorState::Closed);
    }

    #[test]
    fn test_cancel_discards_the_draft() {
        let mut store = EventStore::new();
        let mut editor = EditorState::default();

        editor.open_create("2024-06-15");
        editor.edit_title("Meeting");
        editor.cancel();

        assert!(store.is_empty());
        assert_eq!(editor, EditorState::Closed);
        assert_eq!(editor.draft(), None);
    }

    #[test]
    fn test_cancel_twice_from_closed_is_a_no_op() {
        let mut editor = EditorState::default();
        editor.cancel();
        assert_eq!(editor, EditorState::Closed);
        editor.cancel();
        assert_eq!(editor, EditorState::Closed);
    }

    #[test]
    fn test_transitions_are_no_ops_while_closed() {
        let mut store = EventStore::new();
        store.add(Event::new("Meeting", "2024-06-15"));
        let mut editor = EditorState::default();

        editor.edit_title("ignored");
        editor.edit_date("2024-01-01");
        editor.commit_create(&mut store).unwrap();
        editor.commit_update(&mut store).unwrap();
        editor.commit_delete(&mut store);

        assert_eq!(editor, EditorState::Closed);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(0), Some(&Event::new("Meeting", "2024-06-15")));
    }

    #[test]
    fn test_reopening_for_create_starts_from_a_blank_title() {
        let mut editor = EditorState::default();
        editor.open_edit("2024-06-15", 0, "Meeting");
        editor.open_create("2024-06-16");

        let draft = editor.draft().unwrap();
        assert_eq!(draft.title, "");
        assert_eq!(draft.date, "2024-06-16");
        assert!(!editor.is_editing());
    }
}
