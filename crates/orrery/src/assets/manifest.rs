use serde::{Deserialize, Serialize};

/// Asset manifest describing the prototype meshes the scene waits for.
/// Loaded from a JSON file at runtime; the host loads each entry and
/// reports back through the load tracker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetManifest {
    /// Debris prototypes, in the order they claim belt sub-bands.
    pub prototypes: Vec<PrototypeDescriptor>,
}

/// Describes a single prototype mesh file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrototypeDescriptor {
    /// Name the host uses when reporting the load (e.g., "Rock1").
    pub name: String,
    /// Relative path to the mesh file (e.g., "rocks/Rock1.obj").
    pub path: String,
    /// Uniform scale applied to the mesh before instancing (default: 0.4).
    #[serde(default = "default_prototype_scale")]
    pub scale: f32,
}

fn default_prototype_scale() -> f32 {
    0.4
}

impl AssetManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Default for AssetManifest {
    fn default() -> Self {
        let prototypes = ["Rock1", "Rock2", "Rock3"]
            .iter()
            .map(|name| PrototypeDescriptor {
                name: (*name).to_string(),
                path: format!("rocks/{}.obj", name),
                scale: default_prototype_scale(),
            })
            .collect();
        Self { prototypes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_manifest_with_default_scale() {
        let json = r#"{
            "prototypes": [
                { "name": "Rock1", "path": "rocks/Rock1.obj" },
                { "name": "Pebble", "path": "rocks/Pebble.obj", "scale": 0.1 }
            ]
        }"#;
        let manifest = AssetManifest::from_json(json).unwrap();
        assert_eq!(manifest.prototypes.len(), 2);
        assert_eq!(manifest.prototypes[0].scale, 0.4);
        assert_eq!(manifest.prototypes[1].scale, 0.1);
        assert_eq!(manifest.prototypes[1].name, "Pebble");
    }

    #[test]
    fn default_manifest_lists_three_rocks() {
        let manifest = AssetManifest::default();
        let names: Vec<&str> = manifest.prototypes.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Rock1", "Rock2", "Rock3"]);
        assert_eq!(manifest.prototypes[2].path, "rocks/Rock3.obj");
    }

    #[test]
    fn missing_prototypes_field_is_an_error() {
        assert!(AssetManifest::from_json("{}").is_err());
    }
}
