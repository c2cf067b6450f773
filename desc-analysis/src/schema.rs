//! Static description of the DESC vocabulary.
//!
//! The registry is built once on first use and never mutated afterwards, so it can be
//! shared freely across threads. Lookups never fail: unknown blocks have no properties
//! and unknown property names have no enumerated values.

use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Identifier that opens a block, e.g. `LOCATION forest {`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlockKeyword {
    Location,
    Item,
    Character,
    Resource,
    Connection,
    Effect,
    Dialogue,
    Properties,
    Resources,
    Connections,
    Characters,
    Stats,
    Inventory,
    Effects,
    Topic,
    /// Has a property list but is not recognized when scanning documents.
    Region,
}

const SCANNABLE_KEYWORDS: [BlockKeyword; 15] = [
    BlockKeyword::Location,
    BlockKeyword::Item,
    BlockKeyword::Character,
    BlockKeyword::Resource,
    BlockKeyword::Connection,
    BlockKeyword::Effect,
    BlockKeyword::Dialogue,
    BlockKeyword::Properties,
    BlockKeyword::Resources,
    BlockKeyword::Connections,
    BlockKeyword::Characters,
    BlockKeyword::Stats,
    BlockKeyword::Inventory,
    BlockKeyword::Effects,
    BlockKeyword::Topic,
];

impl BlockKeyword {
    pub const ALL: [BlockKeyword; 16] = [
        BlockKeyword::Location,
        BlockKeyword::Item,
        BlockKeyword::Character,
        BlockKeyword::Resource,
        BlockKeyword::Connection,
        BlockKeyword::Effect,
        BlockKeyword::Dialogue,
        BlockKeyword::Properties,
        BlockKeyword::Resources,
        BlockKeyword::Connections,
        BlockKeyword::Characters,
        BlockKeyword::Stats,
        BlockKeyword::Inventory,
        BlockKeyword::Effects,
        BlockKeyword::Topic,
        BlockKeyword::Region,
    ];

    /// Keywords the context resolver and keyword completion know about, in
    /// presentation order. `REGION` is deliberately absent.
    pub fn scannable() -> &'static [BlockKeyword] {
        &SCANNABLE_KEYWORDS
    }

    pub fn is_scannable(self) -> bool {
        !matches!(self, BlockKeyword::Region)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BlockKeyword::Location => "LOCATION",
            BlockKeyword::Item => "ITEM",
            BlockKeyword::Character => "CHARACTER",
            BlockKeyword::Resource => "RESOURCE",
            BlockKeyword::Connection => "CONNECTION",
            BlockKeyword::Effect => "EFFECT",
            BlockKeyword::Dialogue => "DIALOGUE",
            BlockKeyword::Properties => "PROPERTIES",
            BlockKeyword::Resources => "RESOURCES",
            BlockKeyword::Connections => "CONNECTIONS",
            BlockKeyword::Characters => "CHARACTERS",
            BlockKeyword::Stats => "STATS",
            BlockKeyword::Inventory => "INVENTORY",
            BlockKeyword::Effects => "EFFECTS",
            BlockKeyword::Topic => "TOPIC",
            BlockKeyword::Region => "REGION",
        }
    }

    /// Exact, case-sensitive match against every keyword including `REGION`.
    pub fn from_token(token: &str) -> Option<BlockKeyword> {
        BlockKeyword::ALL
            .iter()
            .copied()
            .find(|keyword| keyword.as_str() == token)
    }
}

impl fmt::Display for BlockKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    String,
    Number,
    Enum,
    Array,
}

impl PropertyType {
    pub fn as_str(self) -> &'static str {
        match self {
            PropertyType::String => "string",
            PropertyType::Number => "number",
            PropertyType::Enum => "enum",
            PropertyType::Array => "array",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PropertyDescriptor {
    pub name: &'static str,
    pub detail: &'static str,
    pub ty: PropertyType,
}

const fn property(
    name: &'static str,
    detail: &'static str,
    ty: PropertyType,
) -> PropertyDescriptor {
    PropertyDescriptor { name, detail, ty }
}

const LOCATION_PROPERTIES: &[PropertyDescriptor] = &[
    property("name", "Location name", PropertyType::String),
    property("description", "Location description", PropertyType::String),
    property(
        "type",
        "Location type (wilderness, dungeon, settlement)",
        PropertyType::String,
    ),
    property("color", "Display color of the location", PropertyType::String),
    property("icon", "Location icon", PropertyType::String),
];

const ITEM_PROPERTIES: &[PropertyDescriptor] = &[
    property("name", "Item name", PropertyType::String),
    property("description", "Item description", PropertyType::String),
    property(
        "type",
        "Item type (weapon, armor, consumable)",
        PropertyType::String,
    ),
    property("icon", "Item icon", PropertyType::String),
    property("value", "Item value", PropertyType::Number),
    property("weight", "Item weight", PropertyType::Number),
    property(
        "rarity",
        "Item rarity (COMMON, UNCOMMON, RARE, EPIC, LEGENDARY)",
        PropertyType::Enum,
    ),
];

const RESOURCE_PROPERTIES: &[PropertyDescriptor] = &[
    property("min_amount", "Minimum amount of the resource", PropertyType::Number),
    property("max_amount", "Maximum amount of the resource", PropertyType::Number),
    property(
        "respawn_time",
        "Resource respawn time (in seconds)",
        PropertyType::Number,
    ),
    property("required_tool", "Tool required for gathering", PropertyType::String),
    property("rarity", "Resource rarity", PropertyType::Enum),
];

const CONNECTION_PROPERTIES: &[PropertyDescriptor] = &[
    property("id", "ID of the location this connection leads to", PropertyType::String),
    property("name", "Connection name", PropertyType::String),
    property("condition", "Condition for passing through", PropertyType::String),
    property("icon", "Connection icon", PropertyType::String),
];

const CHARACTER_PROPERTIES: &[PropertyDescriptor] = &[
    property("id", "Character ID", PropertyType::String),
    property("name", "Character name", PropertyType::String),
    property("description", "Character description", PropertyType::String),
    property("dialogue", "Character lines", PropertyType::Array),
];

const PROPERTIES_PROPERTIES: &[PropertyDescriptor] = &[
    property("danger_level", "Danger level", PropertyType::Number),
    property("ambient_sound", "Ambient sound", PropertyType::String),
    property("weather", "Weather", PropertyType::Array),
];

const REGION_PROPERTIES: &[PropertyDescriptor] = &[
    property("name", "Region name", PropertyType::String),
    property("description", "Region description", PropertyType::String),
    property("color", "Display color of the region", PropertyType::String),
    property("icon", "Region icon", PropertyType::String),
    property("difficulty", "Difficulty level", PropertyType::Number),
    property("climate", "Climate", PropertyType::String),
    property("locations", "Locations in the region", PropertyType::Array),
    property("x", "X coordinate", PropertyType::Number),
    property("y", "Y coordinate", PropertyType::Number),
    property("adjacent_regions", "Bordering regions", PropertyType::Array),
];

const RARITY_VALUES: &[&str] = &["COMMON", "UNCOMMON", "RARE", "EPIC", "LEGENDARY", "MYTHIC"];

const TYPE_VALUES: &[&str] = &[
    "wilderness",
    "dungeon",
    "settlement",
    "weapon",
    "armor",
    "consumable",
    "resource",
];

static SCHEMA: Lazy<Schema> = Lazy::new(Schema::builtin);

/// The process-wide registry.
pub fn schema() -> &'static Schema {
    &SCHEMA
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("property `{property}` of {block} is declared as enum but has no enumerated values")]
    MissingEnumValues {
        block: BlockKeyword,
        property: &'static str,
    },
}

#[derive(Debug)]
pub struct Schema {
    properties: HashMap<BlockKeyword, &'static [PropertyDescriptor]>,
    /// Keyed by bare property name: `rarity` means the same thing in every block.
    enums: HashMap<&'static str, &'static [&'static str]>,
}

impl Schema {
    fn builtin() -> Self {
        let properties = HashMap::from([
            (BlockKeyword::Location, LOCATION_PROPERTIES),
            (BlockKeyword::Item, ITEM_PROPERTIES),
            (BlockKeyword::Resource, RESOURCE_PROPERTIES),
            (BlockKeyword::Connection, CONNECTION_PROPERTIES),
            (BlockKeyword::Character, CHARACTER_PROPERTIES),
            (BlockKeyword::Properties, PROPERTIES_PROPERTIES),
            (BlockKeyword::Region, REGION_PROPERTIES),
        ]);
        let enums = HashMap::from([("rarity", RARITY_VALUES), ("type", TYPE_VALUES)]);
        Self { properties, enums }
    }

    /// Ordered properties of `block`; empty when the block has no schema entry.
    pub fn properties_for(&self, block: BlockKeyword) -> &'static [PropertyDescriptor] {
        self.properties.get(&block).copied().unwrap_or(&[])
    }

    pub fn property(
        &self,
        block: BlockKeyword,
        name: &str,
    ) -> Option<&'static PropertyDescriptor> {
        self.properties_for(block)
            .iter()
            .find(|descriptor| descriptor.name == name)
    }

    pub fn enum_values_for(&self, property: &str) -> Option<&'static [&'static str]> {
        self.enums.get(property).copied()
    }

    /// True for scannable keywords only, so `REGION` is not a keyword here.
    pub fn is_keyword(&self, token: &str) -> bool {
        BlockKeyword::from_token(token).is_some_and(BlockKeyword::is_scannable)
    }

    pub fn keywords(&self) -> &'static [BlockKeyword] {
        BlockKeyword::scannable()
    }

    /// Checks that every enum-typed property has values to suggest.
    ///
    /// Without an entry, value completion for that property silently falls back to
    /// the generic literal placeholders.
    pub fn validate(&self) -> Result<(), SchemaError> {
        for block in BlockKeyword::ALL {
            for descriptor in self.properties_for(block) {
                if descriptor.ty == PropertyType::Enum
                    && self.enum_values_for(descriptor.name).is_none()
                {
                    return Err(SchemaError::MissingEnumValues {
                        block,
                        property: descriptor.name,
                    });
                }
            }
        }
        Ok(())
    }
}
