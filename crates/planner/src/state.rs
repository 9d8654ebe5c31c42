//! Planning states: the continuous vertex expanded by the search and the
//! discrete key that identifies it in the visited set.

use std::collections::BTreeSet;

use salvage_core::matrix::Matrix;

/// A vertex of the search graph: continuous position, velocity, global time,
/// and fuel, plus the discrete set of collected artifact ids. Values are
/// immutable once built; successors are freshly constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct StateVertex {
    /// Position, 2x1, kilometres.
    pub position: Matrix,
    /// Velocity, 2x1, km/s.
    pub velocity: Matrix,
    /// Universal coordinate time, seconds.
    pub global_time: f64,
    /// Remaining fuel, kilograms.
    pub fuel: f64,
    /// Ids of artifacts collected so far, in id order.
    pub collected: BTreeSet<u32>,
}

impl StateVertex {
    pub fn new(position: Matrix, velocity: Matrix, global_time: f64, fuel: f64) -> Self {
        Self {
            position,
            velocity,
            global_time,
            fuel,
            collected: BTreeSet::new(),
        }
    }

    /// Structural invariants: 2x1 finite position and velocity, non-negative
    /// fuel, finite scalars.
    pub fn is_well_formed(&self) -> bool {
        self.position.is_vector2()
            && self.velocity.is_vector2()
            && self.fuel.is_finite()
            && self.fuel >= 0.0
            && self.global_time.is_finite()
    }
}

/// The quantization key: integer bin indices per continuous component plus
/// the collected set, carried through unchanged. This is the only identity
/// the visited set and parent map use; two continuous states sharing a key
/// are the same planning node.
///
/// Bin indices are i64, so `-0.0` and `+0.0` collapse to the same key and
/// hashing is bit-exact on the rounded integers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DiscreteState {
    pub position: (i64, i64),
    pub velocity: (i64, i64),
    pub time: i64,
    pub fuel: i64,
    pub collected: BTreeSet<u32>,
}
