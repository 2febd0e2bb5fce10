// Template transforms: quarter-turn rotation and mirroring.
//
// Transforms produce new templates; the source is never modified. Positions
// remap so the result stays anchored at its own minimum corner (rotation
// about the vertical axis swaps the X and Z extents on odd quarter turns),
// and direction-bearing state properties are re-derived to match:
//
// - `facing` walks the north → east → south → west ring one step per
//   clockwise quarter turn; mirroring swaps east and west. Vertical values
//   (`up`, `down`) never change.
// - `axis` swaps `x` and `z` on odd quarter turns; `y` never changes.
//
// Rotation and mirroring do not commute. [`PasteOptions`] fixes the order:
// mirror first, then rotate. Entry order is preserved, so four quarter
// turns, or two mirrors, reproduce the original template exactly.
//
// See also: `template.rs` for the `Template` type, `block.rs` for the
// `Facing` ring.

use crate::block::{BlockSpec, Facing};
use crate::template::Template;
use crate::types::BlockPos;
use std::fmt;

// ---------------------------------------------------------------------------
// Rotation
// ---------------------------------------------------------------------------

/// A clockwise rotation about the vertical axis, viewed from above.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Rotation {
    #[default]
    None,
    Cw90,
    Cw180,
    Cw270,
}

impl Rotation {
    /// Parse a rotation from degrees. Accepts any multiple of 90, taken
    /// modulo 360; returns `None` for anything else.
    pub fn from_degrees(degrees: u32) -> Option<Self> {
        match degrees % 360 {
            0 => Some(Rotation::None),
            90 => Some(Rotation::Cw90),
            180 => Some(Rotation::Cw180),
            270 => Some(Rotation::Cw270),
            _ => None,
        }
    }

    pub const fn quarter_turns(self) -> u32 {
        match self {
            Rotation::None => 0,
            Rotation::Cw90 => 1,
            Rotation::Cw180 => 2,
            Rotation::Cw270 => 3,
        }
    }

    pub const fn degrees(self) -> u32 {
        self.quarter_turns() * 90
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

// ---------------------------------------------------------------------------
// Property re-derivation
// ---------------------------------------------------------------------------

fn rotate_spec(spec: &BlockSpec, rotation: Rotation) -> BlockSpec {
    let turns = rotation.quarter_turns();
    let mut spec = spec.clone();

    let facing = spec.prop("facing").and_then(Facing::from_name);
    if let Some(f) = facing {
        spec.set_prop("facing", f.rotated_cw(turns).as_str());
    }

    if turns % 2 == 1 {
        let swapped = match spec.prop("axis") {
            Some("x") => Some("z"),
            Some("z") => Some("x"),
            _ => None,
        };
        if let Some(axis) = swapped {
            spec.set_prop("axis", axis);
        }
    }

    spec
}

fn mirror_spec(spec: &BlockSpec) -> BlockSpec {
    let mut spec = spec.clone();
    let facing = spec.prop("facing").and_then(Facing::from_name);
    if let Some(f) = facing {
        spec.set_prop("facing", f.mirrored_x().as_str());
    }
    spec
}

// ---------------------------------------------------------------------------
// Template transforms
// ---------------------------------------------------------------------------

impl Template {
    /// A copy of this template rotated clockwise about the vertical axis.
    pub fn rotated(&self, rotation: Rotation) -> Template {
        let [sx, sy, sz] = self.size;
        let size = match rotation {
            Rotation::None | Rotation::Cw180 => [sx, sy, sz],
            Rotation::Cw90 | Rotation::Cw270 => [sz, sy, sx],
        };

        let entries = self
            .entries
            .iter()
            .map(|(rel, spec)| {
                let pos = match rotation {
                    Rotation::None => *rel,
                    Rotation::Cw90 => BlockPos::new(sz - 1 - rel.z, rel.y, rel.x),
                    Rotation::Cw180 => BlockPos::new(sx - 1 - rel.x, rel.y, sz - 1 - rel.z),
                    Rotation::Cw270 => BlockPos::new(rel.z, rel.y, sx - 1 - rel.x),
                };
                (pos, rotate_spec(spec, rotation))
            })
            .collect();

        Template {
            size,
            entries,
            meta: self.meta,
        }
    }

    /// A copy of this template reflected across the YZ plane.
    pub fn mirrored_x(&self) -> Template {
        let sx = self.size[0];
        Template {
            size: self.size,
            entries: self
                .entries
                .iter()
                .map(|(rel, spec)| {
                    (
                        BlockPos::new(sx - 1 - rel.x, rel.y, rel.z),
                        mirror_spec(spec),
                    )
                })
                .collect(),
            meta: self.meta,
        }
    }
}

// ---------------------------------------------------------------------------
// Paste options
// ---------------------------------------------------------------------------

/// Transform applied when replaying a template. Mirroring happens before
/// rotation; the two do not commute.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PasteOptions {
    pub rotation: Rotation,
    pub mirror_x: bool,
}

impl PasteOptions {
    pub fn apply(&self, template: &Template) -> Template {
        let mirrored;
        let source = if self.mirror_x {
            mirrored = template.mirrored_x();
            &mirrored
        } else {
            template
        };
        source.rotated(self.rotation)
    }
}
