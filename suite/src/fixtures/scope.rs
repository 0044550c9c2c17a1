//! Lazily initialised, cached fixture values.

use std::sync::{Mutex, PoisonError};

/// A value created on first use and reused for the rest of its scope.
///
/// Declare one as a `static` to get per-binary (module or session) scope:
///
/// ```rust,ignore
/// static MODULE_TOKEN: Scoped<String> = Scoped::new();
/// let token = MODULE_TOKEN.get_or_try_init(|| session.create_user_get_token())?;
/// ```
///
/// Failed initialisation is not cached, so the next caller retries.
#[derive(Debug)]
pub struct Scoped<T> {
    slot: Mutex<Option<T>>,
}

impl<T: Clone> Scoped<T> {
    /// An empty scope.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }

    /// Returns the cached value, creating it with `init` on first use.
    ///
    /// Concurrent callers wait for the first initialisation to finish.
    ///
    /// # Errors
    ///
    /// Returns whatever `init` returns on failure.
    pub fn get_or_try_init<E>(&self, init: impl FnOnce() -> Result<T, E>) -> Result<T, E> {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(value) = slot.as_ref() {
            return Ok(value.clone());
        }
        let value = init()?;
        *slot = Some(value.clone());
        Ok(value)
    }

    /// Returns the cached value without initialising it.
    #[must_use]
    pub fn get(&self) -> Option<T> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl<T: Clone> Default for Scoped<T> {
    fn default() -> Self {
        Self::new()
    }
}
