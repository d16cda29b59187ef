//! Runtime log level changes

use crate::filter::fixed_filter;
use crate::init::LoggingError;
use farmrpc_core::LogLevel;
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use tracing_subscriber::{EnvFilter, Registry, reload};

type FilterHandle = reload::Handle<EnvFilter, Registry>;

/// Handle for swapping the active filter after initialization
pub struct ReloadHandle {
    inner: Mutex<Option<(FilterHandle, LogLevel)>>,
}

impl ReloadHandle {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(None),
        }
    }

    /// The handle installed by [`crate::init_logging`]
    pub fn global() -> &'static ReloadHandle {
        static INSTANCE: OnceCell<ReloadHandle> = OnceCell::new();
        INSTANCE.get_or_init(ReloadHandle::new)
    }

    pub(crate) fn set_handle(&self, handle: FilterHandle, level: LogLevel) {
        *self.inner.lock() = Some((handle, level));
    }

    pub fn is_initialized(&self) -> bool {
        self.inner.lock().is_some()
    }

    /// Level most recently applied, if initialized
    pub fn current_level(&self) -> Option<LogLevel> {
        self.inner.lock().as_ref().map(|(_, level)| *level)
    }

    /// Replace the filter with one enabling `level` for every target
    pub fn reload_level(&self, level: LogLevel) -> Result<(), LoggingError> {
        let mut guard = self.inner.lock();
        let (handle, current) = guard.as_mut().ok_or(LoggingError::NotInitialized)?;
        handle
            .reload(fixed_filter(level))
            .map_err(|e| LoggingError::Reload(e.to_string()))?;
        *current = level;
        Ok(())
    }
}

impl Default for ReloadHandle {
    fn default() -> Self {
        Self::new()
    }
}
