//! The puzzle engine: move execution, history, suggestions, win detection.
//!
//! `PuzzleEngine` owns every tube on the board and is the only thing allowed
//! to mutate them. A caller translates UI gestures into the public
//! operations here:
//!
//! - `select_or_move`: the two-phase tap protocol (arm a source, then pick
//!   a target; re-tapping the armed tube attempts an automatic move)
//! - `undo` / `redo` / `undo_to_checkpoint`: linear history replay
//! - `suggest_move`: cycle through source tubes that have a useful move
//! - `snapshot` / `from_snapshot`: full save and restore
//!
//! Illegal target taps are a normal negative branch, not an error: the tap
//! either re-arms the tapped tube or does nothing, and the returned
//! `SelectOutcome` tells the renderer which it was. The engine is
//! single-threaded and synchronous; every operation runs to completion
//! before returning.

use tracing::{debug, warn};

use super::history::MoveRecord;
use crate::core::{ColorId, GameConfig, GameRng, TransferRule};
use crate::snapshot::{LoadError, Snapshot};
use crate::tubes::{BallGroup, Tube};

/// What a `select_or_move` tap did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectOutcome {
    /// The tapped tube became the pending source.
    Armed { source: usize },

    /// A move executed; `won` is the post-move win state.
    Moved {
        source: usize,
        target: usize,
        count: usize,
        won: bool,
    },

    /// The pending selection was cleared without a move.
    Cleared,

    /// The tap changed nothing.
    Ignored,
}

/// The full state of one game session.
///
/// Constructed by `new_game` or `from_snapshot`; fully re-derivable from
/// `snapshot()` apart from the pending selection. Not thread-safe by design:
/// a concurrent host serializes access to one engine per session.
#[derive(Clone, Debug)]
pub struct PuzzleEngine {
    tubes: Vec<Tube>,
    undo_stack: Vec<MoveRecord>,
    redo_stack: Vec<MoveRecord>,
    pending_source: Option<usize>,
    balls_per_tube: usize,
    transfer: TransferRule,
}

impl PuzzleEngine {
    /// Deal a fresh board: every color exactly `balls_per_tube` times,
    /// uniformly shuffled, dealt in contiguous chunks into one tube per
    /// color, plus the configured empty tubes. History starts empty.
    #[must_use]
    pub fn new_game(config: &GameConfig, seed: u64) -> Self {
        let total = config.num_colors * config.balls_per_tube;
        let mut balls: Vec<ColorId> = (0..total)
            .map(|i| ColorId::new((i % config.num_colors) as u8))
            .collect();
        let mut rng = GameRng::new(seed);
        rng.shuffle(&mut balls);

        let mut tubes = Vec::with_capacity(config.num_tubes());
        for chunk in balls.chunks(config.balls_per_tube) {
            tubes.push(Tube::from_colors(config.balls_per_tube, chunk));
        }
        for _ in 0..config.free_tubes {
            tubes.push(Tube::new(config.balls_per_tube));
        }

        debug!(
            seed,
            num_colors = config.num_colors,
            balls_per_tube = config.balls_per_tube,
            free_tubes = config.free_tubes,
            "dealt new board"
        );

        Self {
            tubes,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            pending_source: None,
            balls_per_tube: config.balls_per_tube,
            transfer: config.transfer,
        }
    }

    /// Rebuild an engine from a snapshot.
    ///
    /// The snapshot is validated first; a malformed one is rejected rather
    /// than producing an inconsistent board. The pending selection always
    /// starts cleared.
    pub fn from_snapshot(snapshot: &Snapshot, transfer: TransferRule) -> Result<Self, LoadError> {
        if let Err(error) = snapshot.validate() {
            warn!(%error, "rejected snapshot");
            return Err(error);
        }

        let tubes = snapshot
            .balls
            .iter()
            .map(|colors| Tube::from_colors(snapshot.balls_per_tube, colors))
            .collect();

        Ok(Self {
            tubes,
            undo_stack: snapshot.undo_stack.clone(),
            redo_stack: snapshot.redo_stack.clone(),
            pending_source: None,
            balls_per_tube: snapshot.balls_per_tube,
            transfer,
        })
    }

    /// Capture the whole board and history.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            balls_per_tube: self.balls_per_tube,
            balls: self.tubes.iter().map(Tube::colors_bottom_up).collect(),
            undo_stack: self.undo_stack.clone(),
            redo_stack: self.redo_stack.clone(),
        }
    }

    // === Selection and moves ===

    /// Handle a tap on tube `index`.
    ///
    /// - no pending source: arm the tube if it has balls, otherwise ignore
    /// - re-tap on the armed tube: attempt an automatic move, else disarm
    /// - pending source + compatible target: execute the move
    /// - pending source + incompatible non-empty tube: switch the selection
    /// - pending source + incompatible empty tube: ignore
    pub fn select_or_move(&mut self, index: usize) -> SelectOutcome {
        assert!(
            index < self.tubes.len(),
            "tube index {index} out of range for {} tubes",
            self.tubes.len()
        );

        match self.pending_source {
            Some(source) if source == index => {
                if let Some(target) = self.auto_move_target(source) {
                    self.execute_move(source, target)
                } else {
                    self.pending_source = None;
                    SelectOutcome::Cleared
                }
            }
            None => {
                if self.tubes[index].is_empty() {
                    SelectOutcome::Ignored
                } else {
                    self.pending_source = Some(index);
                    SelectOutcome::Armed { source: index }
                }
            }
            Some(source) => {
                let top = *self.tubes[source].peek();
                if self.tubes[index].can_accept(&top, self.transfer.requires_full_fit()) {
                    self.execute_move(source, index)
                } else if !self.tubes[index].is_empty() {
                    self.pending_source = Some(index);
                    SelectOutcome::Armed { source: index }
                } else {
                    SelectOutcome::Ignored
                }
            }
        }
    }

    /// Pour from `source` to `target`, record the move, and invalidate redo.
    ///
    /// Callers have already validated the move via `can_accept`.
    fn execute_move(&mut self, source: usize, target: usize) -> SelectOutcome {
        debug_assert_ne!(source, target);
        let top = *self.tubes[source].peek();
        let count = match self.transfer {
            TransferRule::Full => top.count,
            TransferRule::Partial => top.count.min(self.tubes[target].empty_slots()),
        };

        let moving = self.tubes[source].pop(count);
        self.tubes[target].push(moving);
        self.undo_stack.push(MoveRecord::new(source, target, count));
        self.redo_stack.clear();
        self.pending_source = None;

        let won = self.is_win();
        debug!(source, target, count, won, "move executed");
        SelectOutcome::Moved {
            source,
            target,
            count,
            won,
        }
    }

    /// Target for a re-tap on the armed tube: the first tube whose top
    /// color matches the source's, else the first empty tube.
    fn auto_move_target(&self, source: usize) -> Option<usize> {
        let top = self.tubes[source].peek();
        let mut first_empty = None;

        for (i, tube) in self.tubes.iter().enumerate() {
            if i == source {
                continue;
            }
            if tube.is_empty() {
                if first_empty.is_none() {
                    first_empty = Some(i);
                }
            } else if tube.can_accept(top, self.transfer.requires_full_fit()) {
                return Some(i);
            }
        }
        first_empty
    }

    // === History ===

    /// Undo the most recent move. Clears the pending selection; no-op when
    /// the history is empty.
    ///
    /// The moved group is rebuilt from the target's current top color: after
    /// the recorded move, that is exactly the moved color.
    pub fn undo(&mut self) -> bool {
        self.pending_source = None;
        let Some(record) = self.undo_stack.pop() else {
            return false;
        };

        let color = self.tubes[record.target].peek().color;
        self.tubes[record.target].remove_balls(record.count);
        self.tubes[record.source].push(BallGroup::new(color, record.count));
        self.redo_stack.push(record);

        debug!(
            source = record.source,
            target = record.target,
            count = record.count,
            "move undone"
        );
        true
    }

    /// Replay the most recently undone move. Clears the pending selection;
    /// no-op when nothing has been undone.
    pub fn redo(&mut self) -> bool {
        self.pending_source = None;
        let Some(record) = self.redo_stack.pop() else {
            return false;
        };

        // Undo restored the moved balls to the source, so its top color is
        // the moved color.
        let color = self.tubes[record.source].peek().color;
        self.tubes[record.source].remove_balls(record.count);
        self.tubes[record.target].push(BallGroup::new(color, record.count));
        self.undo_stack.push(record);

        debug!(
            source = record.source,
            target = record.target,
            count = record.count,
            "move redone"
        );
        true
    }

    /// Rewind until the board has more empty tubes than when the rewind
    /// began, or the history runs out. Returns the number of moves undone.
    ///
    /// A "get me unstuck" shortcut: it rolls the board back to the last
    /// state that had a free tube available.
    pub fn undo_to_checkpoint(&mut self) -> usize {
        self.pending_source = None;
        let starting_empty = self.num_empty_tubes();
        let mut undone = 0;

        while !self.undo_stack.is_empty() && self.num_empty_tubes() <= starting_empty {
            self.undo();
            undone += 1;
        }
        undone
    }

    // === Suggestions ===

    /// Suggest a source tube that has at least one useful move, cycling to
    /// a new candidate on repeated calls. The returned tube becomes the
    /// pending source; `None` clears it.
    pub fn suggest_move(&mut self) -> Option<usize> {
        let next = self.next_suggestion(self.pending_source);
        self.pending_source = next;
        next
    }

    /// The candidate cyclically after `previous` in index order, or the
    /// first candidate when `previous` is absent from the enumeration.
    fn next_suggestion(&self, previous: Option<usize>) -> Option<usize> {
        let candidates: Vec<usize> = (0..self.tubes.len())
            .filter(|&i| self.is_suggestion_candidate(i))
            .collect();
        if candidates.is_empty() {
            return None;
        }

        let start = previous
            .and_then(|p| candidates.iter().position(|&c| c == p))
            .map_or(0, |pos| (pos + 1) % candidates.len());
        Some(candidates[start])
    }

    /// A tube is worth suggesting if its top run has a same-color landing
    /// spot on a non-empty tube, or - when it holds more than one color -
    /// if an empty tube exists. Dumping a single-color tube into an empty
    /// one improves nothing and is never suggested.
    fn is_suggestion_candidate(&self, source: usize) -> bool {
        let tube = &self.tubes[source];
        if tube.is_empty() {
            return false;
        }

        let top = tube.peek();
        let mut saw_empty = false;
        for (i, target) in self.tubes.iter().enumerate() {
            if i == source {
                continue;
            }
            if target.is_empty() {
                saw_empty = true;
            } else if target.can_accept(top, self.transfer.requires_full_fit()) {
                return true;
            }
        }
        saw_empty && tube.has_multiple_colors()
    }

    // === Queries ===

    /// Solved: every tube is empty or single-colored and full.
    #[must_use]
    pub fn is_win(&self) -> bool {
        self.tubes.iter().all(Tube::is_complete)
    }

    /// Count of tubes with no balls.
    #[must_use]
    pub fn num_empty_tubes(&self) -> usize {
        self.tubes.iter().filter(|t| t.is_empty()).count()
    }

    /// Total tubes on the board.
    #[must_use]
    pub fn num_tubes(&self) -> usize {
        self.tubes.len()
    }

    /// Capacity of every tube.
    #[must_use]
    pub fn balls_per_tube(&self) -> usize {
        self.balls_per_tube
    }

    /// Read-only view of all tubes.
    #[must_use]
    pub fn tubes(&self) -> &[Tube] {
        &self.tubes
    }

    /// Read-only view of one tube.
    #[must_use]
    pub fn tube(&self, index: usize) -> &Tube {
        &self.tubes[index]
    }

    /// The currently armed source tube, if any.
    #[must_use]
    pub fn pending_source(&self) -> Option<usize> {
        self.pending_source
    }

    /// The pour rule in effect.
    #[must_use]
    pub fn transfer_rule(&self) -> TransferRule {
        self.transfer
    }

    /// Moves that can be undone, oldest first.
    #[must_use]
    pub fn undo_stack(&self) -> &[MoveRecord] {
        &self.undo_stack
    }

    /// Moves that can be redone, oldest first.
    #[must_use]
    pub fn redo_stack(&self) -> &[MoveRecord] {
        &self.redo_stack
    }
}
