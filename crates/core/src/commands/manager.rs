//! Command manager - registration and dispatch

use std::collections::HashMap;
use std::sync::Arc;

use slotmap::{new_key_type, SlotMap};

use super::args::ArgumentStore;
use super::gate::{check_permission, Commander};
use super::CommandError;

new_key_type! {
    /// Handle for a registered command
    pub struct CommandKey;
}

/// Type alias for command executors
///
/// Shared so a dispatcher can run it after releasing its lock on the table.
pub type CommandExecutor =
    Arc<dyn Fn(&dyn Commander, &ArgumentStore) -> Result<(), CommandError> + Send + Sync>;

/// Outcome of dispatching a command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommandResult {
    /// No command matched, let the host handle it
    #[default]
    Continue,
    /// A command ran (successfully or not)
    Handled,
}

/// A command definition
pub struct CommandSpec {
    /// Aliases, the first one is the primary name
    aliases: Vec<String>,
    /// Help text
    description: String,
    /// Permission checked before the executor runs
    permission: Option<String>,
    /// Executor
    executor: CommandExecutor,
}

impl CommandSpec {
    /// Create a command without a required permission
    pub fn new<F>(aliases: &[&str], description: &str, executor: F) -> Self
    where
        F: Fn(&dyn Commander, &ArgumentStore) -> Result<(), CommandError> + Send + Sync + 'static,
    {
        Self {
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
            description: description.to_string(),
            permission: None,
            executor: Arc::new(executor),
        }
    }

    /// Require `permission` before the executor runs
    pub fn with_permission(mut self, permission: &str) -> Self {
        self.permission = Some(permission.to_string());
        self
    }

    /// All aliases
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Primary alias
    pub fn name(&self) -> &str {
        self.aliases.first().map(String::as_str).unwrap_or("")
    }

    /// Help text
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Required permission
    pub fn permission(&self) -> Option<&str> {
        self.permission.as_deref()
    }
}

/// Registered commands, looked up by alias
pub struct CommandManager {
    /// Commands indexed by key
    commands: SlotMap<CommandKey, CommandSpec>,

    /// Lookup by alias (case-insensitive, lowercase)
    by_alias: HashMap<String, CommandKey>,
}

impl Default for CommandManager {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandManager {
    /// Create an empty manager
    pub fn new() -> Self {
        Self {
            commands: SlotMap::with_key(),
            by_alias: HashMap::new(),
        }
    }

    /// Register a command
    ///
    /// Fails (returns `None`) if the command has no aliases or any alias is
    /// already taken.
    pub fn register(&mut self, spec: CommandSpec) -> Option<CommandKey> {
        if spec.aliases.is_empty() {
            tracing::warn!("Refusing to register a command without aliases");
            return None;
        }

        let aliases: Vec<String> = spec.aliases.iter().map(|a| a.to_lowercase()).collect();
        if let Some(taken) = aliases.iter().find(|a| self.by_alias.contains_key(*a)) {
            tracing::warn!("Command alias '{}' already registered", taken);
            return None;
        }

        let name = spec.name().to_string();
        let key = self.commands.insert(spec);
        for alias in aliases {
            self.by_alias.insert(alias, key);
        }

        tracing::debug!("Registered command: {}", name);
        Some(key)
    }

    /// Unregister a command by key
    pub fn unregister(&mut self, key: CommandKey) -> bool {
        if let Some(spec) = self.commands.remove(key) {
            for alias in &spec.aliases {
                self.by_alias.remove(&alias.to_lowercase());
            }
            tracing::debug!("Unregistered command: {}", spec.name());
            true
        } else {
            false
        }
    }

    /// Find command by any alias
    pub fn find(&self, alias: &str) -> Option<CommandKey> {
        self.by_alias.get(&alias.to_lowercase()).copied()
    }

    /// Get a command definition
    pub fn get(&self, key: CommandKey) -> Option<&CommandSpec> {
        self.commands.get(key)
    }

    /// Look up the command named by `args.command()` and check its permission
    ///
    /// Returns the executor without running it, so callers holding the
    /// manager behind a lock can release it first.
    pub fn prepare(
        &self,
        commander: &dyn Commander,
        args: &ArgumentStore,
    ) -> Result<CommandExecutor, CommandError> {
        let spec = self
            .find(args.command())
            .and_then(|key| self.commands.get(key))
            .ok_or_else(|| CommandError::UnknownCommand(args.command().to_string()))?;

        if let Some(permission) = spec.permission() {
            check_permission(commander, permission)?;
        }

        Ok(Arc::clone(&spec.executor))
    }

    /// Run the command named by `args.command()`
    ///
    /// The command's required permission is checked first; the executor
    /// only runs if the check passes.
    pub fn execute(&self, commander: &dyn Commander, args: &ArgumentStore) -> Result<(), CommandError> {
        let executor = self.prepare(commander, args)?;
        executor(commander, args)
    }

    /// Run a command and report any failure back to the commander
    pub fn dispatch(&self, commander: &dyn Commander, args: &ArgumentStore) -> CommandResult {
        Self::report(commander, args, self.execute(commander, args))
    }

    /// Turn a command outcome into a [`CommandResult`], replying with any error
    pub fn report(
        commander: &dyn Commander,
        args: &ArgumentStore,
        outcome: Result<(), CommandError>,
    ) -> CommandResult {
        match outcome {
            Ok(()) => CommandResult::Handled,
            Err(CommandError::UnknownCommand(_)) => CommandResult::Continue,
            Err(e) => {
                tracing::debug!("Command '{}' from {} failed: {}", args.command(), commander.name(), e);
                commander.reply(&e.to_string());
                CommandResult::Handled
            }
        }
    }

    /// Iterate over all registered commands as (key, name, description)
    pub fn iter(&self) -> impl Iterator<Item = (CommandKey, &str, &str)> {
        self.commands
            .iter()
            .map(|(key, spec)| (key, spec.name(), spec.description()))
    }

    /// Get total number of registered commands
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Check if command manager has no registered commands
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
