//! Typed reads on top of [`Store::get`].
//!
//! Two families live here:
//!
//! - Lenient getters (`get_int`, `get_string`, `get_long_list`, ...) run the
//!   value through [`crate::value::coerce`] and fall back to a fixed default
//!   instead of failing.
//! - Strict getters (`get_as`, `get_or`, `require_as`) use the exact
//!   `TryFrom<&Value>` conversions and never reinterpret a value.

use super::{Store, StoreError};
use crate::{
    Result,
    value::{
        Value,
        coerce::{Coerce, Scalar},
    },
};

impl Store {
    fn coerced<T: Coerce>(&self, key: impl AsRef<str>) -> Option<T> {
        T::coerce(Scalar::from(&self.get(key)?))
    }

    /// Reads an `i32`, widening or parsing as needed. Returns 0 otherwise.
    pub fn get_int(&self, key: impl AsRef<str>) -> i32 {
        self.coerced(key).unwrap_or(0)
    }

    /// Reads an `i64`, widening or parsing as needed. Returns 0 otherwise.
    pub fn get_long(&self, key: impl AsRef<str>) -> i64 {
        self.coerced(key).unwrap_or(0)
    }

    /// Reads an `f64`, widening or parsing as needed. Returns 0.0 otherwise.
    pub fn get_double(&self, key: impl AsRef<str>) -> f64 {
        self.coerced(key).unwrap_or(0.0)
    }

    /// Reads a boolean, accepting `"true"`/`"false"` text. Returns false otherwise.
    pub fn get_boolean(&self, key: impl AsRef<str>) -> bool {
        self.coerced(key).unwrap_or(false)
    }

    /// Reads text. Returns `None` when absent or not text.
    pub fn get_string(&self, key: impl AsRef<str>) -> Option<String> {
        self.coerced(key)
    }

    /// Returns the list stored at `key` as is, or an empty Vec.
    pub fn get_list(&self, key: impl AsRef<str>) -> Vec<Value> {
        match self.get(key) {
            Some(Value::List(items)) => items,
            _ => Vec::new(),
        }
    }

    /// Returns the elements of the list at `key` that coerce to `T`.
    ///
    /// Nulls and elements that do not coerce are skipped silently.
    ///
    /// ```
    /// # use nestkv::{Store, Value};
    /// let store = Store::new();
    /// store.set("ports", vec![Value::Int(80), Value::Null, Value::from("443"), Value::from("x")]);
    ///
    /// assert_eq!(store.get_list_of::<i64>("ports"), vec![80, 443]);
    /// assert!(store.get_list_of::<i64>("missing").is_empty());
    /// ```
    pub fn get_list_of<T: Coerce>(&self, key: impl AsRef<str>) -> Vec<T> {
        self.get_list(key)
            .iter()
            .filter_map(|item| T::coerce(Scalar::from(item)))
            .collect()
    }

    /// Text elements of the list at `key`.
    pub fn get_string_list(&self, key: impl AsRef<str>) -> Vec<String> {
        self.get_list_of(key)
    }

    /// `i32` elements of the list at `key`.
    pub fn get_int_list(&self, key: impl AsRef<str>) -> Vec<i32> {
        self.get_list_of(key)
    }

    /// `i64` elements of the list at `key`.
    pub fn get_long_list(&self, key: impl AsRef<str>) -> Vec<i64> {
        self.get_list_of(key)
    }

    /// Gets a value with an exact `TryFrom` conversion.
    ///
    /// Returns `None` if the key is absent or the value has another type.
    pub fn get_as<T>(&self, key: impl AsRef<str>) -> Option<T>
    where
        T: for<'a> TryFrom<&'a Value>,
    {
        T::try_from(&self.get(key)?).ok()
    }

    /// Gets a value with an exact conversion, or returns `default`.
    ///
    /// A mismatched type is treated the same as a missing key.
    ///
    /// ```
    /// # use nestkv::Store;
    /// let store = Store::new();
    /// store.set("name", "Alice");
    ///
    /// assert_eq!(store.get_or("name", String::new()), "Alice");
    /// assert_eq!(store.get_or("name", 7i64), 7);
    /// assert_eq!(store.get_or("missing", true), true);
    /// ```
    pub fn get_or<T>(&self, key: impl AsRef<str>, default: T) -> T
    where
        T: for<'a> TryFrom<&'a Value>,
    {
        self.get_as(key).unwrap_or(default)
    }

    /// Gets a value with an exact conversion, reporting why it failed.
    pub fn require_as<T>(&self, key: impl AsRef<str>) -> Result<T>
    where
        T: for<'a> TryFrom<&'a Value, Error = StoreError>,
    {
        let value = self.require(key)?;
        Ok(T::try_from(&value)?)
    }

    /// Stores `value` at `key` only if nothing is stored there yet.
    ///
    /// Returns true if the value was written. Two concurrent calls for the same
    /// absent key may both write; the last one wins.
    pub fn add_default(&self, key: impl AsRef<str>, value: impl Into<Value>) -> bool {
        let key = key.as_ref();
        if self.contains(key) {
            return false;
        }
        self.set(key, value);
        true
    }
}
