use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use fs2::FileExt;

pub(crate) fn profile_lock_path(profile_dir: &Path) -> PathBuf {
    profile_dir.join("tabspaces.lock")
}

/// Exclusive lock on the profile, released when the returned file is dropped.
pub(crate) fn acquire_profile_lock(profile_dir: &Path) -> Result<fs::File> {
    let path = profile_lock_path(profile_dir);
    fs::create_dir_all(profile_dir)
        .with_context(|| format!("failed to create profile dir: {}", profile_dir.display()))?;

    let file = fs::OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .read(true)
        .open(&path)
        .with_context(|| format!("failed to open profile lock: {}", path.display()))?;

    tracing::debug!(path = %path.display(), "acquiring profile lock");
    file.lock_exclusive()
        .with_context(|| format!("failed to acquire profile lock at {}", path.display()))?;
    tracing::debug!("profile lock acquired");
    Ok(file)
}
