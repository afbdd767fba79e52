//! Clickable callbacks
//!
//! Messages sent to a commander can carry a command line that runs a Rust
//! closure when clicked. Each callback belongs to the commander it was
//! registered for; nobody else can trigger it.
//!
//! # Example
//!
//! ```ignore
//! let line = controller.register_one_use_callback(&player, |src| {
//!     src.reply("Confirmed!");
//! });
//! player.reply(&format!("Click to confirm: {}", line));
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use dashmap::DashMap;
use uuid::Uuid;

use super::args::{ArgKey, ArgumentStore};
use super::gate::Commander;
use super::manager::CommandSpec;
use super::CommandError;

/// Argument holding the callback id for the `callback` command
pub const CALLBACK_ID: ArgKey<Uuid> = ArgKey::new("callback-id");

type CallbackFn = Arc<dyn Fn(&dyn Commander) + Send + Sync>;

#[derive(Clone)]
struct CachedCallback {
    func: CallbackFn,
    one_use: bool,
}

/// Per-commander callback storage
pub struct CallbackController {
    /// Command prefix used in generated command lines
    prefix: String,

    /// Owner key -> callback id -> callback
    callbacks: DashMap<String, HashMap<Uuid, CachedCallback>>,
}

impl CallbackController {
    /// Create a controller generating `/<prefix> cb <id>` command lines
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            callbacks: DashMap::new(),
        }
    }

    /// Register a reusable callback for `source`, returning the command line that runs it
    pub fn register_callback<F>(&self, source: &dyn Commander, func: F) -> String
    where
        F: Fn(&dyn Commander) + Send + Sync + 'static,
    {
        self.insert(source, Arc::new(func), false)
    }

    /// Register a callback that is removed the first time it runs
    pub fn register_one_use_callback<F>(&self, source: &dyn Commander, func: F) -> String
    where
        F: Fn(&dyn Commander) + Send + Sync + 'static,
    {
        self.insert(source, Arc::new(func), true)
    }

    fn insert(&self, source: &dyn Commander, func: CallbackFn, one_use: bool) -> String {
        let id = Uuid::new_v4();
        self.callbacks
            .entry(owner_key(source))
            .or_default()
            .insert(id, CachedCallback { func, one_use });
        format!("/{} cb {}", self.prefix, id)
    }

    /// Drop every callback owned by `name` (a commander name or subject identifier)
    pub fn clear_owned_by(&self, name: &str) {
        if let Some((owner, removed)) = self.callbacks.remove(&name.to_lowercase()) {
            tracing::debug!("Cleared {} callback(s) owned by {}", removed.len(), owner);
        }
    }

    /// Number of callbacks pending for `name`
    pub fn pending(&self, name: &str) -> usize {
        self.callbacks
            .get(&name.to_lowercase())
            .map(|owned| owned.len())
            .unwrap_or(0)
    }

    /// Run callback `id` on behalf of `commander`
    pub fn invoke(&self, commander: &dyn Commander, id: Uuid) -> Result<(), CommandError> {
        let key = owner_key(commander);

        // One-use callbacks are removed before running so they can't fire twice
        let callback = match self.callbacks.get_mut(&key) {
            Some(mut owned) => match owned.get(&id).map(|cb| cb.one_use) {
                Some(true) => owned.remove(&id),
                Some(false) => owned.get(&id).cloned(),
                None => None,
            },
            None => None,
        };

        match callback {
            Some(callback) => {
                if callback.one_use {
                    self.callbacks.remove_if(&key, |_, owned| owned.is_empty());
                }
                (callback.func)(commander);
                Ok(())
            }
            None if self.callbacks.iter().any(|owned| owned.contains_key(&id)) => {
                Err(CommandError::OnlyOwnCallbacks)
            }
            None => Err(CommandError::UnknownCallback(id.to_string())),
        }
    }

    /// Build the `callback` / `cb` command backed by this controller
    pub fn create_command(self: &Arc<Self>) -> CommandSpec {
        let controller = Arc::clone(self);
        CommandSpec::new(
            &["callback", "cb"],
            "Run a callback from a clicked message",
            move |src: &dyn Commander, args: &ArgumentStore| {
                let id = args
                    .get_one(&CALLBACK_ID)
                    .copied()
                    .ok_or_else(|| CommandError::MissingArgument(CALLBACK_ID.name().to_string()))?;
                controller.invoke(src, id)
            },
        )
    }
}

/// Callbacks are keyed by subject identifier when there is one, else by name
fn owner_key(commander: &dyn Commander) -> String {
    commander
        .subject()
        .map(|subject| subject.identifier())
        .unwrap_or_else(|| commander.name())
        .to_lowercase()
}
