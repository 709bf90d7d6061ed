// SPDX-FileCopyrightText: 2026 Koyomi contributors
//
// SPDX-License-Identifier: Apache-2.0

mod cli;
mod cmd_generate_completion;
mod cmd_open;
mod config;
mod tui;
mod util;

pub use crate::{
    cli::{Cli, Commands, run},
    config::Config,
};
