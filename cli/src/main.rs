// SPDX-FileCopyrightText: 2026 Koyomi contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Koyomi - a month and week calendar with quick event capture

use std::error::Error;

use koyomi_cli::run;

fn main() -> Result<(), Box<dyn Error>> {
    run()
}
