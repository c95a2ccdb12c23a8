use std::collections::{BTreeMap, BTreeSet};

use fitment_model::{PcdbPosition, Position, PositionAxis};

/// Axis-indexed lookup of the position ids that support each value.
///
/// Built once from a catalog snapshot and never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct PositionIndex {
    axes: BTreeMap<PositionAxis, BTreeMap<Position, BTreeSet<u32>>>,
}

impl PositionIndex {
    pub fn build(positions: &[PcdbPosition]) -> Self {
        let mut axes: BTreeMap<PositionAxis, BTreeMap<Position, BTreeSet<u32>>> = BTreeMap::new();
        for position in positions {
            for axis in PositionAxis::ALL {
                if let Some(value) = position.get(axis) {
                    axes.entry(axis)
                        .or_default()
                        .entry(value)
                        .or_default()
                        .insert(position.id);
                }
            }
        }
        Self { axes }
    }

    /// Ids supporting `value` on `axis`, or `None` when the value is not indexed.
    pub fn ids(&self, axis: PositionAxis, value: Position) -> Option<&BTreeSet<u32>> {
        self.axes.get(&axis).and_then(|values| values.get(&value))
    }

    /// Values indexed on an axis.
    pub fn values(&self, axis: PositionAxis) -> Vec<Position> {
        self.axes
            .get(&axis)
            .map(|values| values.keys().copied().collect())
            .unwrap_or_default()
    }
}
