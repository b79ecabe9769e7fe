//! Shared environment and filesystem guards for integration tests.

use std::env;
use std::ffi::OsString;
use std::sync::{Mutex, MutexGuard, OnceLock};

use camino::Utf8PathBuf;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use uuid::Uuid;

static ENV_MUTEX: OnceLock<Mutex<()>> = OnceLock::new();

/// Guard that applies a scoped environment variable update.
pub struct EnvVarGuard {
    previous: Vec<(OsString, Option<OsString>)>,
    _lock: MutexGuard<'static, ()>,
}

impl EnvVarGuard {
    /// Sets or clears each variable for the guard lifetime.
    pub fn set_many(changes: &[(&str, Option<&str>)]) -> Self {
        let lock = env_lock();
        let mut previous = Vec::with_capacity(changes.len());

        for (key, value) in changes {
            previous.push((OsString::from(key), env::var_os(key)));
            unsafe {
                // SAFETY: the global mutex serializes environment mutations in tests.
                match value {
                    Some(new_value) => env::set_var(key, new_value),
                    None => env::remove_var(key),
                }
            }
        }

        Self {
            previous,
            _lock: lock,
        }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        for (key, value) in self.previous.drain(..) {
            unsafe {
                // SAFETY: the global mutex serializes environment mutations in tests.
                match value {
                    Some(previous) => env::set_var(&key, &previous),
                    None => env::remove_var(&key),
                }
            }
        }
    }
}

fn env_lock() -> MutexGuard<'static, ()> {
    ENV_MUTEX
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// Uniquely named directory under the system temp dir, removed on drop.
pub struct ScratchDir {
    parent: Dir,
    name: String,
    path: Utf8PathBuf,
}

impl ScratchDir {
    /// Reserves a fresh directory name; the directory itself is not created.
    pub fn new() -> Self {
        let parent_path =
            Utf8PathBuf::try_from(env::temp_dir()).expect("temp dir is valid UTF-8");
        let parent =
            Dir::open_ambient_dir(&parent_path, ambient_authority()).expect("open temp dir");
        let name = format!("taskboard-it-{}", Uuid::new_v4());
        let path = parent_path.join(&name);
        Self { parent, name, path }
    }

    /// Absolute path of the scratch directory.
    pub fn path(&self) -> &Utf8PathBuf {
        &self.path
    }

    /// Returns `true` when `file` exists inside the scratch directory.
    pub fn contains(&self, file: &str) -> bool {
        self.parent
            .open_dir(&self.name)
            .is_ok_and(|dir| dir.is_file(file))
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let _ = self.parent.remove_dir_all(&self.name);
    }
}
