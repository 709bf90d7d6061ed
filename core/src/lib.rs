// SPDX-FileCopyrightText: 2026 Koyomi contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Koyomi core: the pure calendar domain.
//!
//! Everything here is synchronous and free of I/O. The crate computes the
//! visible date grid, moves the anchor date, keeps the in-memory event
//! collection, and runs the modal editor state machine. Rendering and key
//! handling live in the `koyomi-cli` crate.

mod editor;
mod event;
mod grid;
mod session;

pub use crate::{
    editor::{Draft, EditorState, Rejection},
    event::{Event, EventStore},
    grid::{DATE_FORMAT, Direction, ViewMode, compute_view, date_key, navigate, parse_date_key},
    session::Session,
};

/// The canonical application name, shared by the CLI and config discovery.
pub const APP_NAME: &str = "koyomi";
