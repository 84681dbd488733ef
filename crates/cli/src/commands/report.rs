// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `fanout report`: render the Markdown report and save it beside the ledger.

use anyhow::{Context, Result};
use fanout_engine::generate_report;
use fanout_storage::write_atomic;

use crate::commands::BatchArg;
use crate::project::Project;

pub fn handle(project: &Project, args: BatchArg) -> Result<()> {
    let paths = project.batch(&args.batch)?;
    let report = generate_report(paths.dir())?;
    let path = paths.report();
    write_atomic(&path, report.as_bytes()).with_context(|| format!("writing {}", path.display()))?;
    print!("{report}");
    eprintln!("Report written to {}", path.display());
    Ok(())
}
