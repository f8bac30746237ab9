//! Item and crafting descriptors handed to the host's renderer.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Free-form property bag forwarded to the host untouched.
pub type PropertyBag = serde_json::Map<String, serde_json::Value>;

/// The asset style family items are looked up under.
pub const DEFAULT_ASSET_STYLE: &str = "Female3DCG";

/// Default crafting difficulty when a spec does not carry one.
pub const DEFAULT_DIFFICULTY: i32 = 10;

#[derive(Debug, Error)]
pub enum ItemError {
    #[error("asset not found: {group}/{name}")]
    AssetNotFound { group: String, name: String },
}

/// Opaque handle into the host's asset database, keyed by
/// (style, group, name). The host resolves it back to a drawable asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRef {
    pub style: String,
    pub group: String,
    pub name: String,
}

/// The host's asset catalog seam. Returns `None` for unknown keys.
pub trait AssetCatalog {
    fn get(&self, style: &str, group: &str, name: &str) -> Option<AssetRef>;
}

/// Item color: either an explicit hex palette or the host's `"Default"`
/// sentinel (use the asset's own default colors).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemColor {
    Sentinel(String),
    Palette(Vec<String>),
}

impl Default for ItemColor {
    fn default() -> Self {
        ItemColor::Sentinel("Default".to_string())
    }
}

/// Wire-shape item record as mods exchange it: asset key plus overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ItemSpec {
    pub name: String,
    pub group: String,
    #[serde(default)]
    pub color: ItemColor,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub craft: Option<CraftingDescriptor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<PropertyBag>,
}

/// A fully assembled item record, ready for the host renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ItemDescriptor {
    pub asset: AssetRef,
    pub color: ItemColor,
    pub difficulty: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub craft: Option<CraftingDescriptor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<PropertyBag>,
}

impl ItemDescriptor {
    /// Assemble a descriptor directly from an already-resolved asset.
    pub fn new(asset: AssetRef) -> ItemDescriptor {
        ItemDescriptor {
            asset,
            color: ItemColor::default(),
            difficulty: DEFAULT_DIFFICULTY,
            craft: None,
            property: None,
        }
    }

    /// Resolve a wire-shape spec against the host catalog.
    ///
    /// A missing asset is non-fatal for callers that ignore the result;
    /// it is logged and reported as an explicit error.
    pub fn from_spec(
        catalog: &impl AssetCatalog,
        spec: &ItemSpec,
    ) -> Result<ItemDescriptor, ItemError> {
        let asset = catalog
            .get(DEFAULT_ASSET_STYLE, &spec.group, &spec.name)
            .ok_or_else(|| {
                log::warn!("asset not found: {}/{}", spec.group, spec.name);
                ItemError::AssetNotFound {
                    group: spec.group.clone(),
                    name: spec.name.clone(),
                }
            })?;
        Ok(ItemDescriptor {
            asset,
            color: spec.color.clone(),
            difficulty: spec.difficulty.unwrap_or(DEFAULT_DIFFICULTY),
            craft: spec.craft.clone(),
            property: spec.property.clone(),
        })
    }

    pub fn with_color(mut self, color: ItemColor) -> ItemDescriptor {
        self.color = color;
        self
    }

    pub fn with_difficulty(mut self, difficulty: i32) -> ItemDescriptor {
        self.difficulty = difficulty;
        self
    }

    pub fn with_craft(mut self, craft: CraftingDescriptor) -> ItemDescriptor {
        self.craft = Some(craft);
        self
    }

    pub fn with_property(mut self, property: PropertyBag) -> ItemDescriptor {
        self.property = Some(property);
        self
    }
}

/// Flat crafting record attached to an item: the custom name, description,
/// and behavior flags a player bakes into a crafted piece.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CraftingDescriptor {
    /// Asset name of the crafted base item; empty for free-standing crafts.
    pub item: String,
    /// The host's crafting property tag ("Normal", "Secure", ...).
    pub property: String,
    /// Lock asset name, empty when unlocked.
    pub lock: String,
    pub name: String,
    pub description: String,
    pub color: String,
    pub private: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_record: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_property: Option<PropertyBag>,
}

impl CraftingDescriptor {
    /// Start a builder with the three fields every craft needs.
    pub fn builder(
        name: impl Into<String>,
        description: impl Into<String>,
        property: impl Into<String>,
    ) -> CraftingBuilder {
        CraftingBuilder {
            craft: CraftingDescriptor {
                item: String::new(),
                property: property.into(),
                lock: String::new(),
                name: name.into(),
                description: description.into(),
                color: "Default".to_string(),
                private: false,
                type_record: None,
                item_property: None,
            },
        }
    }
}

/// Builder for `CraftingDescriptor` — most fields are optional with
/// host-conventional defaults.
pub struct CraftingBuilder {
    craft: CraftingDescriptor,
}

impl CraftingBuilder {
    pub fn item(mut self, asset: &AssetRef) -> CraftingBuilder {
        self.craft.item = asset.name.clone();
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> CraftingBuilder {
        self.craft.color = color.into();
        self
    }

    pub fn private(mut self, private: bool) -> CraftingBuilder {
        self.craft.private = private;
        self
    }

    pub fn lock(mut self, lock: impl Into<String>) -> CraftingBuilder {
        self.craft.lock = lock.into();
        self
    }

    pub fn type_record(mut self, record: serde_json::Value) -> CraftingBuilder {
        self.craft.type_record = Some(record);
        self
    }

    pub fn item_property(mut self, property: PropertyBag) -> CraftingBuilder {
        self.craft.item_property = Some(property);
        self
    }

    pub fn build(self) -> CraftingDescriptor {
        self.craft
    }
}
