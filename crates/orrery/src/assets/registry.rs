use std::collections::HashMap;

use serde::Serialize;
use thiserror::Error;

use crate::assets::manifest::{AssetManifest, PrototypeDescriptor};

/// Host-side handle of a loaded mesh. Opaque to the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct MeshHandle(pub u32);

/// A loaded prototype mesh, ready to be instanced.
#[derive(Debug, Clone, PartialEq)]
pub struct Prototype {
    pub name: String,
    pub mesh: MeshHandle,
    /// Bounding-sphere radius of the raw mesh, before `scale`.
    pub bounding_radius: f32,
    /// Uniform scale applied to the mesh before instancing.
    pub scale: f32,
}

/// Errors raised while collecting prototype meshes.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssetError {
    #[error("asset '{name}' failed to load: {reason}")]
    LoadFailed { name: String, reason: String },

    #[error("asset '{0}' is not listed in the manifest")]
    UnknownPrototype(String),

    #[error("manifest lists no prototypes")]
    NoPrototypes,

    #[error("prototype '{0}' is listed more than once in the manifest")]
    DuplicatePrototype(String),
}

/// Progress reported after each load notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Pending { remaining: usize },
    Ready,
}

/// Collects prototype loads reported by the host and releases them once,
/// when every manifest entry has arrived. Any failure is sticky.
#[derive(Debug)]
pub struct AssetLoadTracker {
    expected: Vec<PrototypeDescriptor>,
    loaded: HashMap<String, Prototype>,
    failure: Option<AssetError>,
    released: bool,
}

impl AssetLoadTracker {
    /// Build a tracker from a parsed AssetManifest.
    pub fn from_manifest(manifest: &AssetManifest) -> Result<Self, AssetError> {
        if manifest.prototypes.is_empty() {
            return Err(AssetError::NoPrototypes);
        }
        for (i, desc) in manifest.prototypes.iter().enumerate() {
            if manifest.prototypes[..i].iter().any(|d| d.name == desc.name) {
                return Err(AssetError::DuplicatePrototype(desc.name.clone()));
            }
        }
        Ok(Self {
            expected: manifest.prototypes.clone(),
            loaded: HashMap::with_capacity(manifest.prototypes.len()),
            failure: None,
            released: false,
        })
    }

    /// Record a finished load. Reporting the same name twice keeps the latest
    /// mesh; reports after the release are accepted and ignored.
    pub fn mark_loaded(
        &mut self,
        name: &str,
        mesh: MeshHandle,
        bounding_radius: f32,
    ) -> Result<LoadStatus, AssetError> {
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        let desc = self
            .expected
            .iter()
            .find(|d| d.name == name)
            .ok_or_else(|| AssetError::UnknownPrototype(name.to_string()))?;
        if self.released {
            return Ok(LoadStatus::Ready);
        }

        self.loaded.insert(
            name.to_string(),
            Prototype {
                name: name.to_string(),
                mesh,
                bounding_radius,
                scale: desc.scale,
            },
        );
        Ok(self.status())
    }

    /// Record a failed load. Composition will never start after this.
    pub fn mark_failed(&mut self, name: &str, reason: &str) -> AssetError {
        let err = AssetError::LoadFailed {
            name: name.to_string(),
            reason: reason.to_string(),
        };
        self.failure.get_or_insert(err).clone()
    }

    /// Stays `Ready` after the prototypes have been released.
    pub fn status(&self) -> LoadStatus {
        if self.released {
            return LoadStatus::Ready;
        }
        let remaining = self.expected.len() - self.loaded.len();
        if remaining == 0 {
            LoadStatus::Ready
        } else {
            LoadStatus::Pending { remaining }
        }
    }

    /// The "all loaded" signal: yields the prototypes in manifest order
    /// exactly once, after which it returns `Ok(None)` forever.
    pub fn take_ready(&mut self) -> Result<Option<Vec<Prototype>>, AssetError> {
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        if self.released || self.status() != LoadStatus::Ready {
            return Ok(None);
        }
        self.released = true;
        let prototypes = self
            .expected
            .iter()
            .filter_map(|d| self.loaded.remove(&d.name))
            .collect();
        Ok(Some(prototypes))
    }
}
