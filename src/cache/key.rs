//! Typed Cache Keys
//!
//! Ties a string key to the type stored under it, so screens sharing one
//! cache agree on what `"productsList"` or `"customer_<id>"` holds.

use std::fmt;
use std::marker::PhantomData;

// == Cache Key ==
/// A cache key tagged with the type of the value stored under it.
pub struct CacheKey<T> {
    key: String,
    _value: PhantomData<fn() -> T>,
}

impl<T> CacheKey<T> {
    /// Creates a key for a whole collection, e.g. `"productsList"`.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            _value: PhantomData,
        }
    }

    /// Creates a key for a single document, formatted as `"<namespace>_<id>"`.
    pub fn scoped(namespace: &str, id: impl fmt::Display) -> Self {
        Self::new(format!("{}_{}", namespace, id))
    }

    pub fn as_str(&self) -> &str {
        &self.key
    }
}

impl<T> Clone for CacheKey<T> {
    fn clone(&self) -> Self {
        Self::new(self.key.clone())
    }
}

impl<T> fmt::Debug for CacheKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CacheKey").field(&self.key).finish()
    }
}

impl<T> fmt::Display for CacheKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

impl<T> AsRef<str> for CacheKey<T> {
    fn as_ref(&self) -> &str {
        &self.key
    }
}
