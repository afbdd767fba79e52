//! Service lifecycle
//!
//! [`PermissionService`] owns every piece of process-wide state: the
//! permission registry, registered commands and pending callbacks. Dropping
//! it (or calling [`shutdown`](PermissionService::shutdown)) discards all of
//! it at once.

use std::sync::Arc;

use parking_lot::RwLock;
use permhub_sdk::OwnerRef;

use crate::commands::{
    ArgumentStore, CallbackController, CommandKey, CommandManager, CommandResult, CommandSpec,
    Commander,
};
use crate::config::CoreConfig;
use crate::permissions::{DescriptionBuilder, PermissionRegistry};
use crate::subjects::CollectionLoader;

/// The permission service
pub struct PermissionService {
    config: CoreConfig,
    registry: PermissionRegistry,
    commands: RwLock<CommandManager>,
    callbacks: Arc<CallbackController>,
}

impl PermissionService {
    /// Create a stopped service resolving subjects through `loader`
    pub fn new(config: CoreConfig, loader: Arc<dyn CollectionLoader>) -> Self {
        let callbacks = Arc::new(CallbackController::new(config.command_prefix.clone()));
        Self {
            config,
            registry: PermissionRegistry::new(loader),
            commands: RwLock::new(CommandManager::new()),
            callbacks,
        }
    }

    /// Install logging and register built-in commands
    pub fn start(&self) -> Option<CommandKey> {
        crate::logging::init(&self.config);
        tracing::info!("permhub starting...");

        let key = self.register_command(self.callbacks.create_command());
        if key.is_none() {
            tracing::warn!("Callback command could not be registered");
        }

        tracing::info!("permhub started");
        key
    }

    /// Active configuration
    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    /// Permission registry
    pub fn registry(&self) -> &PermissionRegistry {
        &self.registry
    }

    /// Permission registry, for defining ranks or installing a rank sink
    pub fn registry_mut(&mut self) -> &mut PermissionRegistry {
        &mut self.registry
    }

    /// Start building a permission description owned by `owner`
    pub fn builder(&mut self, owner: Option<OwnerRef>) -> DescriptionBuilder<'_> {
        self.registry.builder(owner)
    }

    /// Callback controller for clickable messages
    pub fn callbacks(&self) -> &Arc<CallbackController> {
        &self.callbacks
    }

    /// Register a command
    pub fn register_command(&self, spec: CommandSpec) -> Option<CommandKey> {
        self.commands.write().register(spec)
    }

    /// Unregister a command
    pub fn unregister_command(&self, key: CommandKey) -> bool {
        self.commands.write().unregister(key)
    }

    /// Dispatch a parsed command
    ///
    /// The command table is only locked for the lookup, so executors may
    /// register or unregister commands themselves.
    pub fn dispatch(&self, commander: &dyn Commander, args: &ArgumentStore) -> CommandResult {
        let prepared = self.commands.read().prepare(commander, args);
        let outcome = prepared.and_then(|executor| executor(commander, args));
        CommandManager::report(commander, args, outcome)
    }

    /// Shut the service down, discarding all registered state
    pub fn shutdown(self) {
        tracing::info!(
            "permhub shutting down ({} permission(s), {} command(s))",
            self.registry.len(),
            self.commands.read().len()
        );
    }
}
