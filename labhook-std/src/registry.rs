//! Listener Registry.
//!
//! Built once before serving and read-only afterwards, so dispatch calls share
//! it without locking.

use labhook_core::{Capabilities, Capability, Listener};
use std::{collections::HashMap, fmt, sync::Arc};
use tracing::debug;

/// Listeners indexed by the capabilities they declare.
///
/// Within a capability, listeners keep their registration order.
#[derive(Clone, Default)]
pub struct ListenerRegistry {
    by_capability: HashMap<Capability, Vec<Arc<dyn Listener>>>,
    listeners: Vec<Arc<dyn Listener>>,
}

impl ListenerRegistry {
    /// Start building a registry.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Listeners declaring `capability`, in registration order.
    pub fn listeners_for(&self, capability: Capability) -> &[Arc<dyn Listener>] {
        self.by_capability
            .get(&capability)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Every registered listener, including those declaring nothing.
    pub fn listeners(&self) -> &[Arc<dyn Listener>] {
        &self.listeners
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Capabilities observed by at least one listener.
    pub fn capabilities(&self) -> Capabilities {
        self.by_capability.keys().copied().collect()
    }

    /// Reopen the registry to append more listeners.
    pub fn into_builder(self) -> RegistryBuilder {
        RegistryBuilder { registry: self }
    }
}

impl fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for capability in Capability::ALL {
            let names: Vec<&str> = self
                .listeners_for(capability)
                .iter()
                .map(|listener| listener.name())
                .collect();
            if !names.is_empty() {
                map.entry(&capability.as_str(), &names);
            }
        }
        map.finish()
    }
}

/// Builder for constructing a [`ListenerRegistry`].
#[derive(Default)]
pub struct RegistryBuilder {
    registry: ListenerRegistry,
}

impl RegistryBuilder {
    /// Create a new empty registry builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener.
    pub fn register<L: Listener>(self, listener: L) -> Self {
        self.register_arc(Arc::new(listener))
    }

    /// Register a listener that is shared elsewhere.
    ///
    /// The listener is appended to every capability it declares. A listener
    /// declaring none is kept but never invoked.
    pub fn register_arc(mut self, listener: Arc<dyn Listener>) -> Self {
        let capabilities = listener.capabilities();
        if capabilities.is_empty() {
            debug!(
                listener = listener.name(),
                "listener declares no capabilities and will never be invoked"
            );
        } else {
            debug!(listener = listener.name(), %capabilities, "registered listener");
        }

        for capability in capabilities.capabilities() {
            self.registry
                .by_capability
                .entry(capability)
                .or_default()
                .push(Arc::clone(&listener));
        }
        self.registry.listeners.push(listener);
        self
    }

    /// Register several listeners, in order.
    pub fn register_all<I>(self, listeners: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn Listener>>,
    {
        listeners
            .into_iter()
            .fold(self, |builder, listener| builder.register_arc(listener))
    }

    /// Build the registry.
    pub fn build(self) -> ListenerRegistry {
        self.registry
    }
}
