//! Emitter registry for selecting emitters by output kind

use crate::java::JavaEmitter;
use crate::json::JsonEmitter;
use crate::traits::Emitter;
use aconfig_core::{GeneratorConfig, OutputKind};

/// Registry holding one configured emitter per output kind.
pub struct EmitterRegistry {
    java: JavaEmitter,
    json: JsonEmitter,
}

impl EmitterRegistry {
    /// Create a registry with default emitters.
    pub fn new() -> Self {
        Self {
            java: JavaEmitter::new(),
            json: JsonEmitter::new(),
        }
    }

    /// Create a registry configured from `config`.
    pub fn from_config(config: &GeneratorConfig) -> Self {
        let mut java = JavaEmitter::new().with_store_class(config.java.store_class.clone());
        if config.java.keys_dir.is_some() {
            java = java.with_keys_dir(config.keys_path());
        }
        Self {
            java,
            json: JsonEmitter::new(),
        }
    }

    /// Get the emitter for an output kind.
    pub fn get(&self, kind: OutputKind) -> &dyn Emitter {
        match kind {
            OutputKind::Java => &self.java,
            OutputKind::Json => &self.json,
        }
    }

    /// Emitters for `kinds`, in order, skipping repeats.
    pub fn select(&self, kinds: &[OutputKind]) -> Vec<&dyn Emitter> {
        let mut seen = Vec::new();
        kinds
            .iter()
            .filter(|kind| {
                if seen.contains(*kind) {
                    false
                } else {
                    seen.push(**kind);
                    true
                }
            })
            .map(|kind| self.get(*kind))
            .collect()
    }
}

impl Default for EmitterRegistry {
    fn default() -> Self {
        Self::new()
    }
}
