//! Construct-once registry for shared services.
//!
//! Long-lived services (validators, the process-wide database handle) are
//! built exactly once and live until process exit. `Singleton` wraps
//! `once_cell::sync::OnceCell`: the initializer runs once even under
//! concurrent first access, and reads after initialization are lock-free.

use once_cell::sync::OnceCell;

/// One-time container for a shared service.
///
/// `const`-constructible so it can back a `static`:
///
/// ```
/// use admission_core::Singleton;
///
/// static GREETING: Singleton<String> = Singleton::new();
/// let s = GREETING.get_or_init(|| "hello".to_owned());
/// assert_eq!(s, GREETING.get_or_init(|| unreachable!()));
/// ```
pub struct Singleton<T> {
    cell: OnceCell<T>,
}

impl<T> Singleton<T> {
    pub const fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    /// Return the shared instance, constructing it on first call.
    ///
    /// Concurrent first calls block until one initializer completes; all
    /// callers then observe the same instance.
    pub fn get_or_init(&self, init: impl FnOnce() -> T) -> &T {
        self.cell.get_or_init(init)
    }

    /// Return the instance if it has been constructed.
    pub fn get(&self) -> Option<&T> {
        self.cell.get()
    }

    /// Store an explicitly constructed value, failing if one exists.
    ///
    /// Lets a composition root own construction instead of deferring to
    /// first use.
    pub fn set(&self, value: T) -> Result<(), T> {
        self.cell.set(value)
    }
}

impl<T> Default for Singleton<T> {
    fn default() -> Self {
        Self::new()
    }
}
