use crate::drawable::Drawable;

/// Two drawables share a cell slot when both coordinates differ by at most
/// this much and the texture handle matches.
pub const GROUP_POSITION_TOLERANCE: f64 = 0.001;

const QUARTER_SLOT_OFFSETS: [(f64, f64); 4] = [(0.0, 0.0), (0.5, 0.0), (0.0, 0.5), (0.5, 0.5)];

const THIRD: f64 = 1.0 / 3.0;
const TWO_THIRDS: f64 = 2.0 / 3.0;
const NINE_SLOT_OFFSETS: [(f64, f64); 9] = [
    (0.0, 0.0),
    (THIRD, 0.0),
    (TWO_THIRDS, 0.0),
    (0.0, THIRD),
    (THIRD, THIRD),
    (TWO_THIRDS, THIRD),
    (0.0, TWO_THIRDS),
    (THIRD, TWO_THIRDS),
    (TWO_THIRDS, TWO_THIRDS),
];

/// A run of group-equal drawables inside a sorted slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileGroup {
    pub start: usize,
    pub count: usize,
    pub tilable: bool,
}

/// How the members of one group are laid out inside their cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotLayout {
    /// One texture at full cell size.
    Single,
    /// Up to four quarter-size textures.
    Quarter,
    /// Up to nine third-size textures; members past the ninth are dropped.
    Third,
}

impl SlotLayout {
    pub fn for_group(count: usize, tilable: bool) -> Self {
        if count <= 1 || !tilable {
            SlotLayout::Single
        } else if count <= 4 {
            SlotLayout::Quarter
        } else {
            SlotLayout::Third
        }
    }

    pub fn scale_adjust(self) -> f64 {
        match self {
            SlotLayout::Single => 1.0,
            SlotLayout::Quarter => 0.5,
            SlotLayout::Third => THIRD,
        }
    }

    /// Cell-relative offsets of the slots, in fill order.
    pub fn offsets(self) -> &'static [(f64, f64)] {
        match self {
            SlotLayout::Single => &[(0.0, 0.0)],
            SlotLayout::Quarter => &QUARTER_SLOT_OFFSETS,
            SlotLayout::Third => &NINE_SLOT_OFFSETS,
        }
    }
}

fn groups_with(a: &Drawable, b: &Drawable) -> bool {
    (a.x - b.x).abs() <= GROUP_POSITION_TOLERANCE
        && (a.y - b.y).abs() <= GROUP_POSITION_TOLERANCE
        && a.texture_handle == b.texture_handle
}

/// Splits an already-sorted slice into runs of group-equal drawables.
///
/// Each drawable is compared against its previous neighbour, so a chain of
/// positions that drift within per-pair tolerance stays one run. Grouping is
/// a single adjacent scan, deterministic for a given sorted input.
pub fn group_runs(sorted: &[Drawable]) -> Vec<TileGroup> {
    let mut groups = Vec::new();
    let mut index = 0;
    while index < sorted.len() {
        let mut count = 1;
        let mut tilable = sorted[index].tilable;
        while index + count < sorted.len()
            && groups_with(&sorted[index + count - 1], &sorted[index + count])
        {
            tilable &= sorted[index + count].tilable;
            count += 1;
        }
        groups.push(TileGroup {
            start: index,
            count,
            tilable,
        });
        index += count;
    }
    groups
}
