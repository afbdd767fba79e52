//! Parsed command arguments

use std::any::{Any, TypeId};
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

use super::gate::{check_permission, Commander};
use super::CommandError;

/// Typed key for a command argument
///
/// The type parameter fixes what a value stored under this key is, so reads
/// never need a cast:
///
/// ```ignore
/// const TARGET: ArgKey<String> = ArgKey::new("target");
/// let name: Option<&String> = args.get_one(&TARGET);
/// ```
pub struct ArgKey<T> {
    name: Cow<'static, str>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> ArgKey<T> {
    /// Create a key with a static name
    pub const fn new(name: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
            _marker: PhantomData,
        }
    }

    /// Create a key with a name only known at runtime
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Cow::Owned(name.into()),
            _marker: PhantomData,
        }
    }

    /// Argument name
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<T> Clone for ArgKey<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for ArgKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ArgKey").field(&self.name).finish()
    }
}

/// Storage slot: argument name plus value type
type Slot = (Cow<'static, str>, TypeId);

/// Arguments parsed for one command invocation
///
/// A key may hold several values; values under the same key keep their
/// insertion order. Reads never fail for unknown keys.
pub struct ArgumentStore {
    /// Command alias that was invoked
    command: String,

    /// Full input as typed by the caller
    raw_input: String,

    /// Values per (name, type)
    values: HashMap<Slot, Vec<Box<dyn Any + Send + Sync>>>,
}

impl ArgumentStore {
    /// Create an empty store for an invocation of `command`
    pub fn new(command: impl Into<String>, raw_input: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            raw_input: raw_input.into(),
            values: HashMap::new(),
        }
    }

    /// Command alias that was invoked
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Full raw input
    pub fn raw_input(&self) -> &str {
        &self.raw_input
    }

    /// Append a value under `key`
    pub fn put<T: Any + Send + Sync>(&mut self, key: &ArgKey<T>, value: T) {
        self.values
            .entry(slot(key))
            .or_default()
            .push(Box::new(value));
    }

    /// Append a value that may be missing
    ///
    /// Fails with [`CommandError::InvalidArgument`] for `None`, leaving the
    /// store unchanged.
    pub fn try_put<T: Any + Send + Sync>(
        &mut self,
        key: &ArgKey<T>,
        value: Option<T>,
    ) -> Result<(), CommandError> {
        let value = value.ok_or_else(|| CommandError::InvalidArgument(key.name().to_string()))?;
        self.put(key, value);
        Ok(())
    }

    /// All values under `key` in insertion order, empty if none
    pub fn get_all<T: Any>(&self, key: &ArgKey<T>) -> Vec<&T> {
        self.values
            .get(&slot(key))
            .map(|values| {
                values
                    .iter()
                    .filter_map(|value| value.downcast_ref::<T>())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The value under `key` if there is exactly one
    ///
    /// Returns `None` both for a missing key and for a key with several values.
    pub fn get_one<T: Any>(&self, key: &ArgKey<T>) -> Option<&T> {
        match self.values.get(&slot(key)).map(Vec::as_slice) {
            Some([value]) => value.downcast_ref::<T>(),
            _ => None,
        }
    }

    /// Check if `key` has at least one value
    pub fn has_any<T: Any>(&self, key: &ArgKey<T>) -> bool {
        self.values
            .get(&slot(key))
            .is_some_and(|values| !values.is_empty())
    }

    /// Fail with [`CommandError::PermissionDenied`] unless `commander` holds `permission`
    pub fn check_permission(
        &self,
        commander: &dyn Commander,
        permission: &str,
    ) -> Result<(), CommandError> {
        check_permission(commander, permission)
    }
}

impl fmt::Debug for ArgumentStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArgumentStore")
            .field("command", &self.command)
            .field("raw_input", &self.raw_input)
            .field("keys", &self.values.len())
            .finish()
    }
}

fn slot<T: Any>(key: &ArgKey<T>) -> Slot {
    (key.name.clone(), TypeId::of::<T>())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::MockCommander;

    const TARGET: ArgKey<String> = ArgKey::new("target");
    const AMOUNT: ArgKey<i32> = ArgKey::new("amount");

    fn store() -> ArgumentStore {
        ArgumentStore::new("give", "give zml 5")
    }

    #[test]
    fn test_unknown_key_is_empty() {
        let args = store();
        assert!(!args.has_any(&TARGET));
        assert!(args.get_all(&TARGET).is_empty());
        assert!(args.get_one(&TARGET).is_none());
    }

    #[test]
    fn test_single_value() {
        let mut args = store();
        args.put(&TARGET, "zml".to_string());

        assert!(args.has_any(&TARGET));
        assert_eq!(args.get_one(&TARGET).map(String::as_str), Some("zml"));
        assert_eq!(args.get_all(&TARGET), vec!["zml"]);
    }

    #[test]
    fn test_multiple_values_keep_order() {
        let mut args = store();
        args.put(&TARGET, "first".to_string());
        args.put(&TARGET, "second".to_string());

        assert_eq!(args.get_all(&TARGET), vec!["first", "second"]);
        // Ambiguous, so no single answer
        assert!(args.get_one(&TARGET).is_none());
        assert!(args.has_any(&TARGET));
    }

    #[test]
    fn test_try_put_none_leaves_store_unchanged() {
        let mut args = store();
        args.put(&AMOUNT, 5);

        let err = args.try_put(&AMOUNT, None).unwrap_err();
        assert_eq!(err, CommandError::InvalidArgument("amount".to_string()));
        assert_eq!(args.get_all(&AMOUNT), vec![&5]);

        assert!(args.try_put(&TARGET, None).is_err());
        assert!(!args.has_any(&TARGET));

        args.try_put(&AMOUNT, Some(7)).unwrap();
        assert_eq!(args.get_all(&AMOUNT), vec![&5, &7]);
    }

    #[test]
    fn test_keys_are_typed() {
        let mut args = store();
        let as_text: ArgKey<String> = ArgKey::named("amount");
        args.put(&AMOUNT, 5);

        assert!(args.has_any(&AMOUNT));
        assert!(!args.has_any(&as_text));
        assert_eq!(args.get_one(&AMOUNT), Some(&5));
    }

    #[test]
    fn test_raw_input() {
        let args = store();
        assert_eq!(args.command(), "give");
        assert_eq!(args.raw_input(), "give zml 5");
    }

    #[test]
    fn test_check_permission() {
        let args = store();
        let guest = MockCommander::new("guest");
        let admin = MockCommander::new("admin").with_permission("economy.give");

        match args.check_permission(&guest, "economy.give") {
            Err(CommandError::PermissionDenied { permission, .. }) => {
                assert_eq!(permission, "economy.give")
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(args.check_permission(&admin, "economy.give").is_ok());
        assert!(guest.replies().is_empty());
    }
}
