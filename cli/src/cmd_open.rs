// SPDX-FileCopyrightText: 2026 Koyomi contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use chrono::{Local, NaiveDate};
use clap::{Arg, ArgMatches, Command, arg, value_parser};
use colored::Colorize;

use koyomi_core::{Session, ViewMode};

use crate::config::Config;
use crate::tui;
use crate::util::parse_date_arg;

/// Opens the interactive calendar. This is the default command.
#[derive(Debug, Default, Clone, Copy)]
pub struct CmdOpen {
    pub date: Option<NaiveDate>,
    pub mode: Option<ViewMode>,
}

impl CmdOpen {
    pub const NAME: &str = "open";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Open the interactive calendar")
            .arg(arg_date())
            .arg(
                arg!(-m --mode [MODE] "Initial view mode, overriding the config")
                    .value_parser(value_parser!(ViewMode)),
            )
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            date: matches.get_one::<NaiveDate>("date").copied(),
            mode: matches.get_one::<ViewMode>("mode").copied(),
        }
    }

    pub fn run(self, config: &Config) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "opening the calendar...");
        let today = Local::now().date_naive();
        let anchor = self.date.unwrap_or(today);
        let mode = self.mode.unwrap_or(config.default_view);

        let session = tui::run_calendar(Session::with_anchor(today, anchor, mode))?;

        let count = session.events.len();
        if count > 0 {
            // events live in memory only; say so instead of losing them silently
            let plural = if count == 1 { "event" } else { "events" };
            println!(
                "{}",
                format!("{count} {plural} discarded on exit (koyomi keeps no storage)").dimmed()
            );
        }
        Ok(())
    }
}

fn arg_date() -> Arg {
    arg!(-d --date [DATE] "Initial anchor date: YYYY-MM-DD, today, tomorrow or yesterday")
        .value_parser(parse_date_arg)
}
