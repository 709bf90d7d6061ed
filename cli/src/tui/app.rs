// SPDX-FileCopyrightText: 2026 Koyomi contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::{cell::RefCell, error::Error, rc::Rc};

use ratatui::DefaultTerminal;
use ratatui::crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use ratatui::prelude::*;

use koyomi_core::Session;

use crate::tui::calendar::CalendarPage;
use crate::tui::component::{Component, Message};
use crate::tui::dispatcher::Dispatcher;
use crate::tui::editor::EditorModal;
use crate::tui::store::CalendarStore;

/// Runs the interactive calendar until the user quits, returning the final
/// session state.
pub fn run_calendar(session: Session) -> Result<Session, Box<dyn Error>> {
    let store = Rc::new(RefCell::new(CalendarStore::new(session)));

    let mut terminal = ratatui::init();
    let result = event_loop(&store, &mut terminal);
    ratatui::restore();
    result?;

    let store = Rc::try_unwrap(store)
        .map_err(|_| "store still has references")?
        .into_inner();
    Ok(store.into_session())
}

fn event_loop(
    store: &Rc<RefCell<CalendarStore>>,
    terminal: &mut DefaultTerminal,
) -> Result<(), Box<dyn Error>> {
    // the dispatcher owns a clone of the store; it must drop before the
    // caller unwraps the Rc
    let mut dispatcher = Dispatcher::new();
    CalendarStore::register_to(store.clone(), &mut dispatcher);

    let mut root = Root::new();
    loop {
        root.sync_modal(&mut dispatcher, store);
        root.draw(store, terminal)?;
        if let Some(Message::Exit) = root.read_event(&mut dispatcher, store)? {
            break Ok(());
        }
    }
}

/// Composes the calendar page with the modal overlay and routes key events
/// to whichever is active. While the modal is open it owns every key, so an
/// open-edit press can never fall through to the page's create trigger.
struct Root {
    page: CalendarPage,
    modal: EditorModal,
    modal_active: bool,
    area: Rect,
}

impl Root {
    fn new() -> Self {
        Self {
            page: CalendarPage::new(),
            modal: EditorModal::new(),
            modal_active: false,
            area: Rect::default(),
        }
    }

    /// Activates or deactivates the modal when the last action flipped the
    /// editor state.
    fn sync_modal(&mut self, dispatcher: &mut Dispatcher, store: &Rc<RefCell<CalendarStore>>) {
        let open = store.borrow().session.editor.is_open();
        if open != self.modal_active {
            self.modal_active = open;
            if open {
                self.modal.activate(dispatcher, store);
            } else {
                self.modal.deactivate(dispatcher, store);
            }
        }
    }

    fn draw(
        &mut self,
        store: &Rc<RefCell<CalendarStore>>,
        terminal: &mut DefaultTerminal,
    ) -> Result<(), Box<dyn Error>> {
        terminal.draw(|frame| {
            self.area = frame.area();
            self.page.render(store, self.area, frame.buffer_mut());
            if self.modal_active {
                self.modal.render(store, self.area, frame.buffer_mut());
                if let Some(position) = self.modal.get_cursor_position(store, self.area) {
                    frame.set_cursor_position(position);
                }
            }
        })?;
        Ok(())
    }

    fn read_event(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &Rc<RefCell<CalendarStore>>,
    ) -> Result<Option<Message>, Box<dyn Error>> {
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                Ok(self.on_key(dispatcher, store, key))
            }
            _ => Ok(None),
        }
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &Rc<RefCell<CalendarStore>>,
        key: KeyEvent,
    ) -> Option<Message> {
        if self.modal_active {
            self.modal.on_key(dispatcher, store, self.area, key)
        } else {
            self.page.on_key(dispatcher, store, self.area, key)
        }
    }
}
