//! Шоудаун: оценка рук, делёж банка, нечётная фишка, вскрытие карт,
//! сбой оценщика, нехватка карт в колоде.

use std::cmp::Ordering;

use heads_up_engine::domain::*;
use heads_up_engine::engine::betting::deal_community;
use heads_up_engine::engine::showdown::settle_showdown;
use heads_up_engine::engine::{
    apply_action, start_new_hand, EngineError, HandStatus, PlayerActionKind, RandomSource,
};
use heads_up_engine::eval::{
    describe_hand, EvalError, EvaluatedHand, HandCategory, HandEvaluator, StandardEvaluator,
};

struct DummyRng;

impl RandomSource for DummyRng {
    fn shuffle(&mut self, _cards: &mut [Card]) {}

    fn choose_index(&mut self, _len: usize) -> usize {
        0
    }
}

/// Оценщик, который не может оценить руку конкретного игрока (по первой карманной карте).
struct FlakyEvaluator {
    broken_card: Card,
}

impl HandEvaluator for FlakyEvaluator {
    fn evaluate(&self, hole: &[Card], board: &[Card]) -> Result<EvaluatedHand, EvalError> {
        if hole.contains(&self.broken_card) {
            return Err(EvalError::BadHoleCards(hole.len()));
        }
        StandardEvaluator.evaluate(hole, board)
    }
}

fn cards(s: &str) -> Vec<Card> {
    parse_cards(s).unwrap()
}

/// Раздача: alice – дилер (SB), bob – BB. Карты подложены: `alice`, `bob`, затем `board`.
fn rigged_hand(stacks: [u64; 2], alice: &str, bob: &str, board: &str) -> TableState {
    let players = vec![
        Player::new("alice", Chips(stacks[0])),
        Player::new("bob", Chips(stacks[1])),
    ];
    let mut state = TableState::new("s1", players, &TableConfig::default());
    state.dealer_index = 1;
    start_new_hand(&mut state, &mut DummyRng, &StandardEvaluator).unwrap();

    let alice = cards(alice);
    let bob = cards(bob);
    let board = cards(board);

    let mut deck = Deck::standard_52();
    deck.remove_cards(&alice);
    deck.remove_cards(&bob);
    deck.remove_cards(&board);
    // Борд снимается с конца колоды.
    deck.cards.extend(board.iter().rev());

    state.players[0].hole_cards = alice;
    state.players[1].hole_cards = bob;
    state.deck = deck;
    assert!(state.check_invariants().is_ok());
    state
}

/// Чек-колл до шоудауна.
fn check_down(state: &mut TableState, evaluator: &dyn HandEvaluator) -> HandStatus {
    let mut status = HandStatus::Ongoing;
    let mut guard = 0;
    while !state.is_hand_complete {
        guard += 1;
        assert!(guard < 20, "раздача должна закончиться");
        let idx = state.current_player_index;
        let id = state.players[idx].id.clone();
        let action = if state.to_call(idx).is_zero() {
            PlayerActionKind::Check
        } else {
            PlayerActionKind::Call
        };
        status = apply_action(state, &id, action, evaluator, 0).unwrap();
    }
    status
}

#[test]
fn evaluator_ranks_categories() {
    let eval = StandardEvaluator;

    let flush = eval.evaluate(&cards("Ah 2h"), &cards("9h Th Jd 4h 3c")).unwrap();
    assert_eq!(flush.rank.category(), HandCategory::Flush);
    assert_eq!(flush.name, "Flush");
    assert_eq!(flush.best_five.len(), 5);

    let wheel = eval.evaluate(&cards("As 2d"), &cards("3c 4h 5s Kd Kh")).unwrap();
    assert_eq!(wheel.rank.category(), HandCategory::Straight);

    let two_pair = eval.evaluate(&cards("Ks Kd"), &cards("3c 3h 9s")).unwrap();
    assert_eq!(two_pair.rank.category(), HandCategory::TwoPair);

    assert_eq!(eval.compare(&flush, &wheel), Ordering::Greater);
    assert_eq!(eval.compare(&two_pair, &wheel), Ordering::Less);
    assert_eq!(describe_hand(HandRank(0)), "Unknown");
}

#[test]
fn evaluator_rejects_bad_input() {
    let eval = StandardEvaluator;
    assert_eq!(
        eval.evaluate(&cards("Ah"), &cards("2c 3c 4c")),
        Err(EvalError::BadHoleCards(1))
    );
    assert_eq!(
        eval.evaluate(&cards("Ah Kh"), &cards("2c 3c")),
        Err(EvalError::BadBoard(2))
    );
    assert_eq!(
        eval.evaluate(&cards("Ah Kh"), &cards("Ah 3c 4c")),
        Err(EvalError::DuplicateCard("Ah".parse().unwrap()))
    );
}

#[test]
fn best_hand_wins_whole_pot_and_cards_are_revealed() {
    let mut state = rigged_hand([1_000, 1_000], "As Ad", "Kc Qd", "Ah 7c 2d 9s 3h");
    let status = check_down(&mut state, &StandardEvaluator);

    assert_eq!(
        status,
        HandStatus::Finished {
            winner_ids: vec!["alice".to_string()]
        }
    );
    assert_eq!(state.players[0].chips, Chips(1_020));
    assert_eq!(state.players[1].chips, Chips(980));
    assert_eq!(state.last_winnings.get("alice"), Some(&Chips(40)));
    assert!(state.last_winnings.get("bob").is_none());

    assert_eq!(state.showdown.len(), 2);
    // Порядок вскрытия – слева от дилера.
    assert_eq!(state.showdown[0].player_id, "bob");
    assert_eq!(state.showdown[1].hand_name, "Three of a kind");
    assert!(state.showdown.iter().all(|r| !r.fallback));
    assert_eq!(state.pot_results.len(), 1);
    assert_eq!(state.pot_results[0].winner_ids, vec!["alice".to_string()]);
    assert!(state.check_invariants().is_ok());
}

#[test]
fn tie_splits_pot_evenly() {
    // Оба играют борд-стрит.
    let mut state = rigged_hand([1_000, 1_000], "2c 3d", "2h 3s", "Ts Jh Qd Kc Ac");
    check_down(&mut state, &StandardEvaluator);

    assert_eq!(state.winner_ids.len(), 2);
    assert_eq!(state.players[0].chips, Chips(1_000));
    assert_eq!(state.players[1].chips, Chips(1_000));
}

#[test]
fn odd_chip_goes_to_first_seat_left_of_dealer() {
    let mut state = rigged_hand([1_000, 1_000], "2c 3d", "2h 3s", "Ts Jh Qd Kc Ac");
    deal_community(&mut state, 5);

    // Вклады 20/20 и одна «мёртвая» фишка – банк 41.
    let paid = state.players[0].commit(Chips(10));
    state.pot += paid;
    state.players[0].chips -= Chips(1);
    state.pot += Chips(1);
    assert_eq!(state.pot, Chips(41));
    assert!(state.check_invariants().is_ok());

    let winners = settle_showdown(&mut state, &StandardEvaluator).unwrap();

    // bob сидит слева от дилера – ему лишняя фишка.
    assert_eq!(winners.len(), 2);
    assert_eq!(state.last_winnings.get("bob"), Some(&Chips(21)));
    assert_eq!(state.last_winnings.get("alice"), Some(&Chips(20)));
    assert_eq!(state.pot_results[0].amount, Chips(41));
    assert_eq!(state.pot, Chips::ZERO);
    assert!(state.check_invariants().is_ok());
}

#[test]
fn evaluator_failure_falls_back_for_that_player_only() {
    let mut state = rigged_hand([1_000, 1_000], "As Ad", "Kc Qd", "Ah 7c 2d 9s 3h");
    let flaky = FlakyEvaluator {
        broken_card: "As".parse().unwrap(),
    };

    let status = check_down(&mut state, &flaky);

    // Рука alice не оценилась → минимальный ранг, банк уходит bob.
    assert_eq!(
        status,
        HandStatus::Finished {
            winner_ids: vec!["bob".to_string()]
        }
    );
    let alice_reveal = state.showdown.iter().find(|r| r.player_id == "alice").unwrap();
    assert!(alice_reveal.fallback);
    assert_eq!(alice_reveal.rank, HandRank(0));
    assert_eq!(alice_reveal.hand_name, "Unknown");
    let bob_reveal = state.showdown.iter().find(|r| r.player_id == "bob").unwrap();
    assert!(!bob_reveal.fallback);
    assert!(state.check_invariants().is_ok());
}

#[test]
fn short_deck_deals_what_is_left() {
    let mut state = rigged_hand([1_000, 1_000], "As Ad", "Kc Qd", "Ah 7c 2d 9s 3h");
    // Оставляем в колоде только 2 карты.
    let cut = state.deck.len() - 2;
    let removed: Vec<Card> = state.deck.cards.drain(..cut).collect();
    assert_eq!(state.deck.len(), 2);

    let dealt = deal_community(&mut state, 3);
    assert_eq!(dealt, 2);
    assert_eq!(state.community_cards.len(), 2);
    assert!(state.deck.is_empty());

    // Возвращаем карты, чтобы не ломать учёт.
    state.deck.cards.extend(removed);
    assert!(state.check_invariants().is_ok());
}

#[test]
fn short_deck_on_flop_goes_straight_to_showdown() {
    let mut state = rigged_hand([1_000, 1_000], "As Ad", "Kc Qd", "Ah 7c 2d 9s 3h");
    // На флоп в колоде остаётся только 2 карты.
    let cut = state.deck.len() - 2;
    let removed: Vec<Card> = state.deck.cards.drain(..cut).collect();

    let status = apply_action(&mut state, "alice", PlayerActionKind::Call, &StandardEvaluator, 0).unwrap();
    assert_eq!(status, HandStatus::Ongoing);
    let status = apply_action(&mut state, "bob", PlayerActionKind::Check, &StandardEvaluator, 0).unwrap();

    assert!(status.is_finished(), "на неполном борде торговли нет");
    assert!(state.is_hand_complete);
    assert_eq!(state.betting_round, Street::Showdown);
    assert_eq!(state.community_cards, cards("Ah 7c"));
    // Два открытых – оценщик отказывает обоим, банк делится.
    assert!(state.showdown.iter().all(|r| r.fallback));
    assert_eq!(state.winner_ids.len(), 2);
    assert_eq!(state.players[0].chips, Chips(1_000));
    assert_eq!(state.players[1].chips, Chips(1_000));
    assert!(state.pot.is_zero());

    state.deck.cards.extend(removed);
    assert!(state.check_invariants().is_ok());
}

#[test]
fn empty_deck_finishes_hand_after_preflop() {
    let mut state = rigged_hand([1_000, 1_000], "As Ad", "Kc Qd", "Ah 7c 2d 9s 3h");
    let stash: Vec<Card> = state.deck.cards.drain(..).collect();

    apply_action(&mut state, "alice", PlayerActionKind::Call, &StandardEvaluator, 0).unwrap();
    let status = apply_action(&mut state, "bob", PlayerActionKind::Check, &StandardEvaluator, 0).unwrap();

    assert!(status.is_finished(), "раздача заканчивается сразу после префлопа");
    assert_eq!(state.betting_round, Street::Showdown);
    assert!(state.community_cards.is_empty());
    assert!(state.showdown.iter().all(|r| r.fallback));
    assert_eq!(state.winner_ids.len(), 2, "равные минимальные руки делят банк");
    assert!(state
        .action_history
        .iter()
        .all(|r| r.round == Street::Preflop));

    state.deck.cards.extend(stash);
    assert!(state.check_invariants().is_ok());
}

/// Банк, на который никто не претендует, – ошибка, а не выплата кому попало.
#[test]
fn showdown_without_eligible_players_is_internal_error() {
    let mut state = rigged_hand([1_000, 1_000], "As Ad", "Kc Qd", "Ah 7c 2d 9s 3h");
    deal_community(&mut state, 5);
    for p in state.players.iter_mut() {
        p.status = PlayerStatus::Folded;
    }

    let result = settle_showdown(&mut state, &StandardEvaluator);

    assert!(matches!(result, Err(EngineError::Internal(_))), "got {result:?}");
    assert!(!state.is_hand_complete);
    assert!(state.winner_ids.is_empty());
    assert!(state.last_winnings.is_empty());
}
