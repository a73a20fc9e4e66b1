//! Engine integration tests.
//!
//! These drive full game sessions through the public API: the two-phase
//! selection protocol, partial pours, the undo/redo history, checkpoint
//! rewind, and win detection.

use ballsort::{
    ColorId, GameConfig, MoveRecord, PuzzleEngine, SelectOutcome, Snapshot, TransferRule,
};

fn color(id: u8) -> ColorId {
    ColorId::new(id)
}

/// Build an engine straight from bottom-to-top color lists, partial rule.
fn board(balls_per_tube: usize, tubes: &[&[u8]]) -> PuzzleEngine {
    let snapshot = Snapshot {
        balls_per_tube,
        balls: tubes
            .iter()
            .map(|t| t.iter().map(|&c| color(c)).collect())
            .collect(),
        undo_stack: vec![],
        redo_stack: vec![],
    };
    PuzzleEngine::from_snapshot(&snapshot, TransferRule::Partial).unwrap()
}

fn colors_of(engine: &PuzzleEngine, index: usize) -> Vec<u8> {
    engine
        .tube(index)
        .colors_bottom_up()
        .iter()
        .map(|c| c.raw())
        .collect()
}

// =============================================================================
// Selection Protocol
// =============================================================================

/// Arm a source, tap a target, move one ball.
#[test]
fn test_basic_move() {
    let mut engine = board(3, &[&[0, 0, 1], &[]]);

    assert_eq!(engine.select_or_move(0), SelectOutcome::Armed { source: 0 });
    let outcome = engine.select_or_move(1);

    assert_eq!(
        outcome,
        SelectOutcome::Moved {
            source: 0,
            target: 1,
            count: 1,
            won: false
        }
    );
    assert_eq!(colors_of(&engine, 0), vec![0, 0]);
    assert_eq!(colors_of(&engine, 1), vec![1]);
    assert_eq!(engine.undo_stack(), &[MoveRecord::new(0, 1, 1)]);
    assert_eq!(engine.pending_source(), None);
}

/// A 3-ball run poured onto 2 open slots transfers 2 and leaves 1 behind.
#[test]
fn test_partial_transfer() {
    let mut engine = board(4, &[&[2, 1, 1, 1], &[1, 1]]);

    engine.select_or_move(0);
    let outcome = engine.select_or_move(1);

    assert_eq!(
        outcome,
        SelectOutcome::Moved {
            source: 0,
            target: 1,
            count: 2,
            won: false
        }
    );
    assert_eq!(colors_of(&engine, 0), vec![2, 1]);
    assert_eq!(colors_of(&engine, 1), vec![1, 1, 1, 1]);
}

/// Re-tapping the armed source moves automatically to a same-color tube
/// without a second explicit target tap.
#[test]
fn test_auto_move_via_retap() {
    let mut engine = board(3, &[&[0, 1], &[], &[2, 1]]);

    engine.select_or_move(0);
    let outcome = engine.select_or_move(0);

    assert_eq!(
        outcome,
        SelectOutcome::Moved {
            source: 0,
            target: 2,
            count: 1,
            won: false
        }
    );
    assert_eq!(colors_of(&engine, 2), vec![2, 1, 1]);
}

/// The move that completes the last tube reports the win.
#[test]
fn test_winning_move_reports_won() {
    let mut engine = board(2, &[&[0, 0], &[1], &[1]]);

    engine.select_or_move(2);
    let outcome = engine.select_or_move(1);

    assert_eq!(
        outcome,
        SelectOutcome::Moved {
            source: 2,
            target: 1,
            count: 1,
            won: true
        }
    );
    assert!(engine.is_win());
}

// =============================================================================
// Undo / Redo
// =============================================================================

/// Undoing every move restores the exact starting board; redoing restores
/// the post-move board.
#[test]
fn test_undo_redo_inverse_law() {
    let mut engine = board(3, &[&[0, 1, 1], &[1, 0], &[]]);
    let initial: Vec<_> = (0..3).map(|i| colors_of(&engine, i)).collect();

    engine.select_or_move(0); // arm tube 0
    engine.select_or_move(2); // pour 1,1 into the empty tube
    engine.select_or_move(1); // arm tube 1
    engine.select_or_move(0); // pour 0 onto tube 0
    let after_moves: Vec<_> = (0..3).map(|i| colors_of(&engine, i)).collect();
    assert_eq!(engine.undo_stack().len(), 2);

    assert!(engine.undo());
    assert!(engine.undo());
    let rewound: Vec<_> = (0..3).map(|i| colors_of(&engine, i)).collect();
    assert_eq!(rewound, initial);
    assert_eq!(engine.redo_stack().len(), 2);

    assert!(engine.redo());
    assert!(engine.redo());
    let replayed: Vec<_> = (0..3).map(|i| colors_of(&engine, i)).collect();
    assert_eq!(replayed, after_moves);
    assert_eq!(engine.undo_stack().len(), 2);
}

/// Undo and redo on empty stacks are silent no-ops.
#[test]
fn test_undo_redo_empty_stacks_are_noops() {
    let mut engine = board(3, &[&[0, 1], &[]]);
    let before = colors_of(&engine, 0);

    assert!(!engine.undo());
    assert!(!engine.redo());
    assert_eq!(colors_of(&engine, 0), before);
}

/// A new move after an undo clears the redo stack.
#[test]
fn test_new_move_invalidates_redo() {
    let mut engine = board(3, &[&[0, 1], &[], &[]]);

    engine.select_or_move(0);
    engine.select_or_move(1);
    engine.undo();
    assert_eq!(engine.redo_stack().len(), 1);

    engine.select_or_move(0);
    engine.select_or_move(2); // different move
    assert!(engine.redo_stack().is_empty());

    let before = colors_of(&engine, 2);
    assert!(!engine.redo());
    assert_eq!(colors_of(&engine, 2), before);
}

/// Undo reconstructs a split group correctly after a partial pour.
#[test]
fn test_undo_after_partial_transfer() {
    let mut engine = board(4, &[&[2, 1, 1, 1], &[1, 1]]);

    engine.select_or_move(0);
    engine.select_or_move(1); // moves 2 of the 3-ball run

    engine.undo();
    assert_eq!(colors_of(&engine, 0), vec![2, 1, 1, 1]);
    assert_eq!(colors_of(&engine, 1), vec![1, 1]);
}

// =============================================================================
// Checkpoint Undo
// =============================================================================

/// Three moves that fill the only empty tube and free no other tube are all
/// rewound: the empty-tube count never exceeds its starting level until the
/// batch is fully reverted.
#[test]
fn test_undo_to_checkpoint_rewinds_batch() {
    let mut engine = board(3, &[&[0, 1, 1], &[1, 0, 0], &[], &[2, 2, 1]]);
    let initial: Vec<_> = (0..4).map(|i| colors_of(&engine, i)).collect();

    engine.select_or_move(0);
    engine.select_or_move(2); // 1,1 -> empty tube; no empty tubes remain
    engine.select_or_move(1);
    engine.select_or_move(0); // 0,0 -> tube 0
    engine.select_or_move(3);
    engine.select_or_move(2); // 1 -> tube 2
    assert_eq!(engine.num_empty_tubes(), 0);
    assert_eq!(engine.undo_stack().len(), 3);

    let undone = engine.undo_to_checkpoint();

    assert_eq!(undone, 3);
    assert_eq!(engine.num_empty_tubes(), 1);
    let rewound: Vec<_> = (0..4).map(|i| colors_of(&engine, i)).collect();
    assert_eq!(rewound, initial);
    assert_eq!(engine.redo_stack().len(), 3);
}

/// Checkpoint undo stops as soon as a tube frees up.
#[test]
fn test_undo_to_checkpoint_stops_at_freed_tube() {
    let mut engine = board(2, &[&[0], &[0], &[0, 1]]);

    engine.select_or_move(0);
    engine.select_or_move(1); // empties tube 0: empty count 1
    engine.select_or_move(2);
    engine.select_or_move(0); // refills tube 0: empty count 0

    let undone = engine.undo_to_checkpoint();

    // Undoing the second move re-empties tube 0, which beats the starting
    // empty count of 0, so the first move stays applied.
    assert_eq!(undone, 1);
    assert_eq!(engine.undo_stack().len(), 1);
    assert_eq!(colors_of(&engine, 1), vec![0, 0]);
    assert_eq!(colors_of(&engine, 2), vec![0, 1]);
}

/// Checkpoint undo tolerates an empty history.
#[test]
fn test_undo_to_checkpoint_empty_history() {
    let mut engine = board(3, &[&[0, 1], &[]]);

    assert_eq!(engine.undo_to_checkpoint(), 0);
}

// =============================================================================
// New Game
// =============================================================================

/// A dealt game is playable end to end: arm, pour, undo, win query.
#[test]
fn test_new_game_session() {
    let config = GameConfig::new(3, 3, 1);
    let mut engine = PuzzleEngine::new_game(&config, 11);

    assert_eq!(engine.num_tubes(), 4);
    assert_eq!(engine.balls_per_tube(), 3);
    assert_eq!(engine.num_empty_tubes(), 1);

    // The free tube is empty, so pouring any full tube's top run into it is
    // always legal.
    assert_eq!(engine.select_or_move(0), SelectOutcome::Armed { source: 0 });
    let outcome = engine.select_or_move(3);
    assert!(matches!(outcome, SelectOutcome::Moved { target: 3, .. }));

    assert!(engine.undo());
    assert_eq!(engine.num_empty_tubes(), 1);
}
