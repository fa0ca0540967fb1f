use bevy::prelude::*;
use std::collections::BTreeMap;

pub mod client_preference;
pub mod color;
pub mod player;
pub mod remote;
pub mod resolved;
pub mod server_policy;

#[cfg(test)]
mod integration_tests;
#[cfg(test)]
pub mod test_harness;

// ---------------------------------------------------------------------------
// Saveable trait + registry for the extension map save pattern
// ---------------------------------------------------------------------------

/// Trait for resources persisted through the host's extension map.
///
/// Each implementing resource owns its serialization, so adding a new
/// saveable setting requires no changes to any save system code -- the
/// feature plugin just registers itself in its `build()`.
pub trait Saveable: Resource + Default + Send + Sync + 'static {
    /// Unique key in the save file's extension map. Must stay stable across
    /// versions (used for deserialization lookup).
    const SAVE_KEY: &'static str;

    /// Serialize this resource to bytes. Return `None` to skip saving.
    fn save_to_bytes(&self) -> Option<Vec<u8>>;

    /// Deserialize from bytes, returning the restored resource.
    fn load_from_bytes(bytes: &[u8]) -> Self;
}

/// Decode bytes via `bitcode::decode`, logging a warning and returning
/// `Default` on failure.
pub fn decode_or_warn<T: bitcode::DecodeOwned + Default>(key: &str, bytes: &[u8]) -> T {
    match bitcode::decode(bytes) {
        Ok(value) => value,
        Err(e) => {
            warn!(
                "Saveable {}: failed to decode {} bytes, falling back to default: {}",
                key,
                bytes.len(),
                e
            );
            T::default()
        }
    }
}

/// Type alias for the save function stored in a `SaveableEntry`.
pub type SaveFn = Box<dyn Fn(&World) -> Option<Vec<u8>> + Send + Sync>;
/// Type alias for the load function stored in a `SaveableEntry`.
pub type LoadFn = Box<dyn Fn(&mut World, &[u8]) + Send + Sync>;
/// Type alias for the reset function stored in a `SaveableEntry`.
pub type ResetFn = Box<dyn Fn(&mut World) + Send + Sync>;

/// Type-erased save/load/reset operations for one registered resource.
pub struct SaveableEntry {
    pub key: String,
    pub save_fn: SaveFn,
    pub load_fn: LoadFn,
    pub reset_fn: ResetFn,
}

/// Registry of all saveable settings resources, populated during plugin
/// setup. Loading inserts a whole fresh resource value, which re-triggers
/// derivation through ordinary change detection.
#[derive(Resource, Default)]
pub struct SaveableRegistry {
    pub entries: Vec<SaveableEntry>,
}

impl SaveableRegistry {
    /// Register a resource type that implements `Saveable`.
    ///
    /// A duplicate `SAVE_KEY` is ignored (and panics in debug builds) so a
    /// second registration cannot silently shadow the first.
    pub fn register<T: Saveable>(&mut self) {
        let key = T::SAVE_KEY.to_string();
        if self.entries.iter().any(|e| e.key == key) {
            warn!("SaveableRegistry: duplicate key '{}' ignored", key);
            debug_assert!(false, "SaveableRegistry: duplicate key '{}'", key);
            return;
        }
        self.entries.push(SaveableEntry {
            key,
            save_fn: Box::new(|world: &World| {
                world.get_resource::<T>().and_then(|r| r.save_to_bytes())
            }),
            load_fn: Box::new(|world: &mut World, bytes: &[u8]| {
                let value = T::load_from_bytes(bytes);
                world.insert_resource(value);
            }),
            reset_fn: Box::new(|world: &mut World| {
                world.insert_resource(T::default());
            }),
        });
    }

    /// Save all registered resources into an extension map.
    pub fn save_all(&self, world: &World) -> BTreeMap<String, Vec<u8>> {
        let mut extensions = BTreeMap::new();
        for entry in &self.entries {
            if let Some(bytes) = (entry.save_fn)(world) {
                extensions.insert(entry.key.clone(), bytes);
            }
        }
        extensions
    }

    /// Load registered resources from an extension map. Resources whose key
    /// is absent keep their current value.
    pub fn load_all(&self, world: &mut World, extensions: &BTreeMap<String, Vec<u8>>) {
        for entry in &self.entries {
            if let Some(bytes) = extensions.get(&entry.key) {
                (entry.load_fn)(world, bytes);
            }
        }
    }

    /// Reset all registered resources to their defaults.
    pub fn reset_all(&self, world: &mut World) {
        for entry in &self.entries {
            (entry.reset_fn)(world);
        }
    }
}

// ---------------------------------------------------------------------------
// Update phases
// ---------------------------------------------------------------------------

/// Ordered phases for systems in the `Update` schedule, configured as a
/// chain: `Input` -> `Derive` -> `Apply`.
///
/// * **Input** -- settings edits and remote-change gating. Everything that
///   can mutate a configuration resource runs here.
/// * **Derive** -- recomputation of `ResolvedPlayerLight` from changed
///   configuration. Runs only on change detection, never unconditionally.
/// * **Apply** -- per-frame forwarding of the precomputed value into the
///   scene (player glow lights). Does no derivation.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum LightUpdateSet {
    /// Settings edits: panel input, keybinds, remote request gating.
    Input,
    /// Cache recomputation on configuration change.
    Derive,
    /// Per-frame application of the cached value.
    Apply,
}

// ---------------------------------------------------------------------------
// Plugin
// ---------------------------------------------------------------------------

/// Registers the configuration resources, the derived-value cache, and the
/// remote-change gate. Rendering and UI crates layer on top of this.
pub struct LightingPlugin;

impl Plugin for LightingPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (
                LightUpdateSet::Input,
                LightUpdateSet::Derive,
                LightUpdateSet::Apply,
            )
                .chain(),
        );

        app.add_plugins((
            server_policy::ServerPolicyPlugin,
            client_preference::ClientPreferencePlugin,
            resolved::ResolvedLightPlugin,
            remote::RemoteChangePlugin,
        ));
    }
}

// ---------------------------------------------------------------------------
// Registry tests
// ---------------------------------------------------------------------------
