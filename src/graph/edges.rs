//! src/graph/edges.rs
//!
//! Set of canvas edges whose inset is widened so thick strokes are not clipped.

use std::fmt;

/// Bit set over the four canvas edges.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Edges(u8);

impl Edges {
    pub const TOP: Self = Self(1 << 0);
    pub const BOTTOM: Self = Self(1 << 1);
    pub const LEADING: Self = Self(1 << 2);
    pub const TRAILING: Self = Self(1 << 3);

    pub const ALL: Self = Self(0b1111);

    /// Every named edge, in display order.
    pub const NAMED: [(Self, &'static str); 4] = [
        (Self::TOP, "top"),
        (Self::BOTTOM, "bottom"),
        (Self::LEADING, "leading"),
        (Self::TRAILING, "trailing"),
    ];

    pub const fn empty() -> Self {
        Self(0)
    }

    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Check whether `self` contains all bits in `other`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }

    /// Insert or remove `edge` depending on `on`.
    pub fn set(&mut self, edge: Self, on: bool) {
        if on {
            self.insert(edge);
        } else {
            self.remove(edge);
        }
    }

    /// Build a set from the four independent edge toggles.
    pub fn from_flags(top: bool, bottom: bool, leading: bool, trailing: bool) -> Self {
        let mut edges = Self::empty();
        edges.set(Self::TOP, top);
        edges.set(Self::BOTTOM, bottom);
        edges.set(Self::LEADING, leading);
        edges.set(Self::TRAILING, trailing);
        edges
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }
}

impl std::ops::BitOr for Edges {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl fmt::Display for Edges {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }
        if *self == Self::ALL {
            return f.write_str("all");
        }
        let names: Vec<&str> = Self::NAMED
            .iter()
            .filter(|(edge, _)| self.contains(*edge))
            .map(|(_, name)| *name)
            .collect();
        f.write_str(&names.join("+"))
    }
}
