// Author: Dustin Pilgrim
// License: MIT

use std::fs;
use std::io::{self, Write};
use std::os::unix::net::{UnixListener, UnixStream};
use std::path::{Path, PathBuf};

// ---------------- log file ----------------

/// `$XDG_CACHE_HOME/restwatch/restwatch.log`, or under /tmp without a cache dir.
pub fn default_log_path() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join("restwatch")
        .join("restwatch.log")
}

/// Marks the start of a run in the shared log file. Runs after the first are
/// separated from the previous one by a blank line.
pub fn append_run_header(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let has_previous_run = fs::metadata(path).map(|m| m.len() > 0).unwrap_or(false);

    let mut file = fs::OpenOptions::new().create(true).append(true).open(path)?;
    if has_previous_run {
        writeln!(file)?;
    }
    writeln!(
        file,
        "---- restwatch {} started, pid {} ----",
        env!("CARGO_PKG_VERSION"),
        std::process::id()
    )
}

// ---------------- single-instance lock ----------------

fn lock_path(runtime_dir: Option<PathBuf>) -> io::Result<PathBuf> {
    let dir = runtime_dir.ok_or_else(|| {
        io::Error::other("XDG_RUNTIME_DIR is not set (cannot create instance lock)")
    })?;
    Ok(dir.join("restwatch").join("restwatch.lock"))
}

/// Held for the process lifetime; dropping it releases the lock.
pub struct InstanceLock {
    _listener: UnixListener,
    path: PathBuf,
}

impl Drop for InstanceLock {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}

/// `AlreadyExists` means another instance is running; any other kind is an
/// environment problem.
pub fn acquire_single_instance_lock() -> io::Result<InstanceLock> {
    let runtime_dir = std::env::var_os("XDG_RUNTIME_DIR").map(PathBuf::from);
    acquire_lock_at(&lock_path(runtime_dir)?)
}

/// A socket that accepts connections means a live instance; one that refuses
/// them is left over from a crash and is replaced.
pub fn acquire_lock_at(path: &Path) -> io::Result<InstanceLock> {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }

    let bind_failed = |e: io::Error| {
        io::Error::new(
            e.kind(),
            format!("failed to bind instance lock {}: {e}", path.display()),
        )
    };

    let listener = match UnixListener::bind(path) {
        Ok(l) => l,
        Err(e) if e.kind() == io::ErrorKind::AddrInUse => match UnixStream::connect(path) {
            Ok(_) => {
                return Err(io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    format!("already running (another instance holds {})", path.display()),
                ));
            }
            Err(_) => {
                let _ = fs::remove_file(path);
                UnixListener::bind(path).map_err(bind_failed)?
            }
        },
        Err(e) => return Err(bind_failed(e)),
    };

    Ok(InstanceLock {
        _listener: listener,
        path: path.to_path_buf(),
    })
}
