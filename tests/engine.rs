use othello::ai::eval::PositionalEvaluator;
use othello::ai::level::Level;
use othello::ai::search::{SCORE_INF, Searcher};
use othello::movegen;
use othello::{Board, Cell, Game, GameConfig, Phase, Position, Side};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;

/// Plays `plies` random legal moves (passing when blocked) from the opening.
fn random_position(seed: u64, plies: usize) -> (Board, Side) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut board = Board::new();
    let mut side = Side::Black;

    for _ in 0..plies {
        if movegen::is_terminal(&board) {
            break;
        }
        if let Some(&mv) = movegen::legal_moves(&board, side).choose(&mut rng) {
            board.apply(mv, side);
        }
        side = side.opponent();
    }

    (board, side)
}

#[test]
fn legal_moves_agree_with_cell_by_cell_check() {
    for seed in 0..40 {
        let (board, _) = random_position(seed, (seed as usize) % 50);
        for side in [Side::Black, Side::White] {
            let generated = movegen::legal_moves(&board, side);

            let mut brute = Vec::new();
            for row in 0..8 {
                for col in 0..8 {
                    let pos = Position::new(row, col);
                    if board.cell(pos) == Cell::Empty && board.is_legal(pos, side) {
                        brute.push(pos);
                    }
                }
            }

            assert_eq!(generated, brute);
            assert_eq!(movegen::can_move(&board, side), !generated.is_empty());
        }
    }
}

#[test]
fn legal_move_grows_mover_and_adds_one_disc() {
    for seed in 0..30 {
        let (board, side) = random_position(seed, 20);
        for mv in movegen::legal_moves(&board, side) {
            let mut next = board;
            next.apply(mv, side);

            assert!(next.discs(side) > board.discs(side));
            assert!(next.discs(side.opponent()) < board.discs(side.opponent()));
            assert_eq!(
                next.discs(side) as u16 + next.discs(side.opponent()) as u16,
                board.discs(side) as u16 + board.discs(side.opponent()) as u16 + 1
            );
            assert_eq!(next.cell(mv), side.cell());
        }
    }
}

#[test]
fn opening_has_four_discs_and_four_black_moves() {
    let board = Board::new();

    assert_eq!(board.count(), (2, 2));
    assert_eq!(
        movegen::legal_moves(&board, Side::Black),
        vec![
            Position::new(2, 3),
            Position::new(3, 2),
            Position::new(4, 5),
            Position::new(5, 4),
        ]
    );
}

#[test]
fn pruned_search_equals_minimax_on_random_positions() {
    for seed in 100..112 {
        let (board, side) = random_position(seed, 10 + (seed as usize % 30));
        for depth in 1..=3 {
            let pruned = Searcher::new(&PositionalEvaluator).best_move(&board, side, depth);
            let plain = Searcher::new(&PositionalEvaluator)
                .without_pruning()
                .best_move(&board, side, depth);
            assert_eq!(pruned, plain, "seed {seed} depth {depth}");

            let a = Searcher::new(&PositionalEvaluator)
                .search(&board, depth, side, side, -SCORE_INF, SCORE_INF);
            let b = Searcher::new(&PositionalEvaluator)
                .without_pruning()
                .search(&board, depth, side, side, -SCORE_INF, SCORE_INF);
            assert_eq!(a, b);
        }
    }
}

#[test]
fn search_is_repeatable() {
    let (board, side) = random_position(9, 16);

    let first = Searcher::new(&PositionalEvaluator).best_move(&board, side, 4);
    let second = Searcher::new(&PositionalEvaluator).best_move(&board, side, 4);

    assert_eq!(first, second);
}

#[test]
fn full_game_reaches_consistent_game_over() {
    let mut rng = StdRng::seed_from_u64(2024);
    let config = GameConfig {
        seed: Some(2024),
        ..GameConfig::with_level(Level::Easy)
    };
    let mut game = Game::new_game(config).unwrap();
    let mut plies = 0;

    while !game.is_terminal() {
        assert!(!movegen::is_terminal(game.board()));
        let before = game.score();

        let state = match game.phase() {
            Phase::AwaitingHumanMove => {
                let moves = game.legal_moves(Side::Black);
                let mv = *moves.choose(&mut rng).unwrap();
                game.apply_human_move(mv.row, mv.col).unwrap()
            }
            Phase::ComputerThinking => game.request_computer_move().unwrap(),
            Phase::GameOver => unreachable!(),
        };

        assert_eq!(
            (state.black_count + state.white_count) as u16,
            (before.0 + before.1) as u16 + 1
        );
        if !state.is_game_over {
            assert!(state.human_can_move || state.computer_can_move);
        }
        plies += 1;
        assert!(plies <= 60);
    }

    assert!(movegen::is_terminal(game.board()));
    let (black, white) = game.score();
    let result = game.result();
    assert_eq!((result.black_count, result.white_count), (black, white));
    match black.cmp(&white) {
        std::cmp::Ordering::Greater => assert_eq!(result.winner, Some(Side::Black)),
        std::cmp::Ordering::Less => assert_eq!(result.winner, Some(Side::White)),
        std::cmp::Ordering::Equal => assert_eq!(result.winner, None),
    }
}

#[test]
fn seeded_easy_games_replay_identically() {
    let play = || {
        let config = GameConfig {
            seed: Some(77),
            ..GameConfig::with_level(Level::Easy)
        };
        let mut game = Game::new_game(config).unwrap();
        let mut trace = Vec::new();
        for _ in 0..12 {
            match game.phase() {
                Phase::AwaitingHumanMove => {
                    let mv = game.legal_moves(Side::Black)[0];
                    game.apply_human_move(mv.row, mv.col).unwrap();
                }
                Phase::ComputerThinking => {
                    trace.push(game.request_computer_move().unwrap().last_move);
                }
                Phase::GameOver => break,
            }
        }
        trace
    };

    assert_eq!(play(), play());
}
