//! A bounded stack of ball groups.
//!
//! `Tube` owns the two board invariants for one stack:
//! - `empty_slots + sum(group.count) == capacity` at all times
//! - no two adjacent groups share a color (`push` merges same-color runs)
//!
//! It is a passive value type. Which pushes and pops are legal is the
//! engine's decision; calling `pop` on an empty tube or `push` past the
//! capacity is a bug in the caller and panics.

use smallvec::SmallVec;

use super::group::BallGroup;
use crate::core::ColorId;

/// Bounded stack of colored ball groups. `groups[0]` is the top.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tube {
    capacity: usize,
    empty_slots: usize,
    groups: SmallVec<[BallGroup; 4]>,
}

impl Tube {
    /// Create an empty tube with the given capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity >= 1, "tube capacity must be at least 1");
        Self {
            capacity,
            empty_slots: capacity,
            groups: SmallVec::new(),
        }
    }

    /// Rebuild a tube from a bottom-to-top color list (the persisted order).
    ///
    /// Callers validate the list against the capacity first; overflowing the
    /// tube here is a programming error.
    #[must_use]
    pub fn from_colors(capacity: usize, colors: &[ColorId]) -> Self {
        let mut tube = Self::new(capacity);
        for &color in colors {
            tube.push(BallGroup::new(color, 1));
        }
        tube
    }

    /// Total slots in this tube.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Currently open slots.
    #[must_use]
    pub fn empty_slots(&self) -> usize {
        self.empty_slots
    }

    /// Read-only view of the groups, top first.
    #[must_use]
    pub fn groups(&self) -> &[BallGroup] {
        &self.groups
    }

    /// The top group.
    ///
    /// Panics on an empty tube; the engine checks `is_empty` before every
    /// call, so reaching the panic means an engine bug.
    #[must_use]
    pub fn peek(&self) -> &BallGroup {
        self.groups.first().expect("peek on an empty tube")
    }

    /// Remove `n` balls from the top group and return them as a fresh group.
    ///
    /// Removes the whole group when `n` matches its count, otherwise splits
    /// it. Opens `n` slots.
    pub fn pop(&mut self, n: usize) -> BallGroup {
        assert!(n >= 1, "pop of zero balls");
        let top = *self.peek();
        assert!(
            n <= top.count,
            "pop of {n} balls from a run of {}",
            top.count
        );

        if n == top.count {
            self.groups.remove(0);
        } else {
            self.groups[0].count -= n;
        }
        self.empty_slots += n;
        BallGroup::new(top.color, n)
    }

    /// Same slot accounting as `pop`, discarding the removed balls.
    ///
    /// Undo and redo rebuild the moved group at its destination instead of
    /// reusing the popped value.
    pub fn remove_balls(&mut self, n: usize) {
        let _ = self.pop(n);
    }

    /// Whether `group` may be poured in.
    ///
    /// An empty tube accepts any color; a non-empty tube only its own top
    /// color. With `require_full` the whole group must fit, otherwise a
    /// single open slot is enough.
    #[must_use]
    pub fn can_accept(&self, group: &BallGroup, require_full: bool) -> bool {
        let fits = if require_full {
            self.empty_slots >= group.count
        } else {
            self.empty_slots > 0
        };
        if !fits {
            return false;
        }
        match self.groups.first() {
            Some(top) => top.same_color_as(group),
            None => true,
        }
    }

    /// Stack `group` on top, merging it into the top group when the colors
    /// match.
    ///
    /// Callers validate capacity via `can_accept` first; pushing past the
    /// capacity is a programming error.
    pub fn push(&mut self, group: BallGroup) {
        assert!(
            group.count <= self.empty_slots,
            "push of {} balls into {} open slots",
            group.count,
            self.empty_slots
        );

        match self.groups.first_mut() {
            Some(top) if top.same_color_as(&group) => top.count += group.count,
            _ => self.groups.insert(0, group),
        }
        self.empty_slots -= group.count;
    }

    /// No balls at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Solved: fully empty, or a single color filling the whole tube.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.empty_slots == self.capacity || (self.groups.len() == 1 && self.empty_slots == 0)
    }

    /// More than one distinct color present.
    ///
    /// Adjacent groups never share a color, so two groups mean two colors.
    /// Used to rule out pointless full-tube-to-empty-tube suggestions.
    #[must_use]
    pub fn has_multiple_colors(&self) -> bool {
        self.groups.len() > 1
    }

    /// Expand the groups into individual ball colors, bottom-to-top.
    ///
    /// This is the order snapshots persist and `from_colors` consumes.
    #[must_use]
    pub fn colors_bottom_up(&self) -> Vec<ColorId> {
        let mut colors = Vec::with_capacity(self.capacity - self.empty_slots);
        for group in self.groups.iter().rev() {
            colors.extend(std::iter::repeat(group.color).take(group.count));
        }
        colors
    }
}
