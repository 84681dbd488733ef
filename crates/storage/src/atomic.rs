// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Write-to-temporary-then-rename file replacement.
//!
//! The temporary file lives next to the target so the rename stays on one
//! filesystem. Readers see either the previous document or the new one,
//! never a partial write.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Sibling temporary path for `path`: `dir/ledger.json` → `dir/.ledger.json.tmp`.
pub fn tmp_path_for(path: &Path) -> PathBuf {
    let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
    path.with_file_name(format!(".{name}.tmp"))
}

/// Atomically replace `path` with `bytes`.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    StagedWrite::stage(path, bytes)?.commit()
}

/// A fully written and synced temporary file awaiting its rename.
///
/// Dropping an uncommitted write removes the temporary file; the target is
/// left exactly as it was.
#[derive(Debug)]
pub struct StagedWrite {
    target: PathBuf,
    tmp: PathBuf,
    committed: bool,
}

impl StagedWrite {
    pub fn stage(path: &Path, bytes: &[u8]) -> io::Result<Self> {
        let staged = Self { target: path.to_path_buf(), tmp: tmp_path_for(path), committed: false };
        let mut file = File::create(&staged.tmp)?;
        file.write_all(bytes)?;
        file.sync_all()?;
        Ok(staged)
    }

    pub fn tmp_path(&self) -> &Path {
        &self.tmp
    }

    /// Rename the temporary file over the target.
    pub fn commit(mut self) -> io::Result<()> {
        fs::rename(&self.tmp, &self.target)?;
        self.committed = true;
        Ok(())
    }
}

impl Drop for StagedWrite {
    fn drop(&mut self) {
        if !self.committed {
            let _ = fs::remove_file(&self.tmp);
        }
    }
}
