// Block identity and state.
//
// A `BlockSpec` pairs a namespaced identifier (`minecraft:oak_stairs`) with an
// ordered map of state properties (`facing=north`, `half=top`). Specs are what
// worlds store, templates capture, and builders place. The `Facing` enum
// centralizes the horizontal-direction vocabulary shared by stairs, doors,
// beds, and furnaces so that template transforms and structure builders agree
// on how directions compose.
//
// Properties live in a `BTreeMap` so that serialized output and `Display`
// formatting are stable regardless of insertion order.
//
// See also: `transform.rs` (re-derives facing/axis under rotation),
// `store.rs` (persists `BlockRecord` rows).

use crate::types::BlockPos;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Namespace assumed when an identifier has none.
pub const DEFAULT_NAMESPACE: &str = "minecraft";

// ---------------------------------------------------------------------------
// Horizontal facing
// ---------------------------------------------------------------------------

/// The four horizontal directions a block state can face.
///
/// Listed in clockwise order when viewed from above (north, east, south,
/// west), which makes rotation a ring walk.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Facing {
    North,
    East,
    South,
    West,
}

/// Clockwise ring of facings; index arithmetic implements rotation.
const FACING_RING: [Facing; 4] = [Facing::North, Facing::East, Facing::South, Facing::West];

impl Facing {
    pub fn as_str(self) -> &'static str {
        match self {
            Facing::North => "north",
            Facing::East => "east",
            Facing::South => "south",
            Facing::West => "west",
        }
    }

    /// Parse a property value. Returns `None` for non-horizontal values such
    /// as `up` or `down`, which rotation leaves untouched.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "north" => Some(Facing::North),
            "east" => Some(Facing::East),
            "south" => Some(Facing::South),
            "west" => Some(Facing::West),
            _ => None,
        }
    }

    /// Rotate clockwise (viewed from above) by the given number of
    /// quarter turns.
    pub fn rotated_cw(self, quarter_turns: u32) -> Self {
        let idx = FACING_RING.iter().position(|f| *f == self).unwrap_or(0);
        FACING_RING[(idx + quarter_turns as usize) % 4]
    }

    /// Reflect across the YZ plane: east and west swap, north and south
    /// are unchanged.
    pub fn mirrored_x(self) -> Self {
        match self {
            Facing::East => Facing::West,
            Facing::West => Facing::East,
            other => other,
        }
    }

    pub fn opposite(self) -> Self {
        self.rotated_cw(2)
    }

    /// The (dx, dz) step one block in this direction.
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Facing::North => (0, -1),
            Facing::East => (1, 0),
            Facing::South => (0, 1),
            Facing::West => (-1, 0),
        }
    }
}

impl fmt::Display for Facing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Block specifications
// ---------------------------------------------------------------------------

/// A block identifier plus its state properties.
///
/// Identifiers are stored fully qualified; [`BlockSpec::new`] prepends
/// `minecraft:` when the caller passes a bare name like `"stone"`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockSpec {
    pub name: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub props: BTreeMap<String, String>,
}

impl BlockSpec {
    /// Create a spec with no properties, qualifying bare identifiers with
    /// the default namespace.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let name = if name.contains(':') {
            name
        } else {
            format!("{DEFAULT_NAMESPACE}:{name}")
        };
        Self {
            name,
            props: BTreeMap::new(),
        }
    }

    /// Builder-style property attachment.
    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    pub fn prop(&self, key: &str) -> Option<&str> {
        self.props.get(key).map(String::as_str)
    }

    pub fn set_prop(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.props.insert(key.into(), value.into());
    }

    /// The identifier without its namespace (`oak_stairs` for
    /// `minecraft:oak_stairs`).
    pub fn path(&self) -> &str {
        match self.name.split_once(':') {
            Some((_, path)) => path,
            None => &self.name,
        }
    }

    /// The namespace portion of the identifier.
    pub fn namespace(&self) -> &str {
        match self.name.split_once(':') {
            Some((ns, _)) => ns,
            None => DEFAULT_NAMESPACE,
        }
    }

    /// Whether this block is a liquid. Liquids are skipped by terrain scans
    /// and are never cleared when carving walking room above a path.
    pub fn is_liquid(&self) -> bool {
        matches!(self.path(), "water" | "lava" | "bubble_column")
    }
}

impl fmt::Display for BlockSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.props.is_empty() {
            f.write_str("[")?;
            for (i, (k, v)) in self.props.iter().enumerate() {
                if i > 0 {
                    f.write_str(",")?;
                }
                write!(f, "{k}={v}")?;
            }
            f.write_str("]")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Wire records
// ---------------------------------------------------------------------------

/// One serialized block row: position triple, identifier, optional props.
///
/// Shared by world snapshots (absolute positions) and template documents
/// (positions relative to the template's minimum corner). `props` is omitted
/// entirely when empty to keep files small.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockRecord {
    pub pos: [i32; 3],
    pub name: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub props: BTreeMap<String, String>,
}

impl BlockRecord {
    pub fn from_parts(pos: BlockPos, block: &BlockSpec) -> Self {
        Self {
            pos: [pos.x, pos.y, pos.z],
            name: block.name.clone(),
            props: block.props.clone(),
        }
    }

    pub fn into_parts(self) -> (BlockPos, BlockSpec) {
        (
            BlockPos::new(self.pos[0], self.pos[1], self.pos[2]),
            BlockSpec {
                name: self.name,
                props: self.props,
            },
        )
    }
}
