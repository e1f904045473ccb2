//! Слои банка и возврат неуравненной ставки.
//!
//! Алгоритм слоёв общий (N игроков), поэтому часть тестов – на 3–4 игроках,
//! собранных вручную.

use heads_up_engine::domain::*;
use heads_up_engine::engine::side_pots::{compute_side_pots, refund_uncalled_bet, SidePot};

fn player(id: &str, total: u64, status: PlayerStatus) -> Player {
    let mut p = Player::new(id, Chips(1_000));
    p.total_bet_this_hand = Chips(total);
    p.bet_this_round = Chips(total);
    p.status = status;
    p
}

/// (amount, eligible ids) для компактных проверок.
fn pot_info(p: &SidePot) -> (u64, Vec<&str>) {
    (p.amount.0, p.eligible_player_ids.iter().map(String::as_str).collect())
}

#[test]
fn equal_contributions_make_single_pot() {
    let players = vec![
        player("a", 100, PlayerStatus::AllIn),
        player("b", 100, PlayerStatus::Active),
    ];
    let pots = compute_side_pots(&players);

    assert_eq!(pots.len(), 1, "Должен быть один общий пот");
    assert_eq!(pot_info(&pots[0]), (200, vec!["a", "b"]));
}

#[test]
fn three_all_in_levels() {
    let players = vec![
        player("a", 100, PlayerStatus::AllIn),
        player("b", 200, PlayerStatus::AllIn),
        player("c", 300, PlayerStatus::AllIn),
    ];
    let pots = compute_side_pots(&players);

    assert_eq!(pots.len(), 3, "Ожидаем 3 слоя");
    assert_eq!(pot_info(&pots[0]), (300, vec!["a", "b", "c"]));
    assert_eq!(pot_info(&pots[1]), (200, vec!["b", "c"]));
    assert_eq!(pot_info(&pots[2]), (100, vec!["c"]));
}

#[test]
fn folded_chips_fund_pot_without_eligibility() {
    let players = vec![
        player("a", 50, PlayerStatus::Folded),
        player("b", 100, PlayerStatus::AllIn),
        player("c", 300, PlayerStatus::Active),
        player("d", 300, PlayerStatus::Active),
    ];
    let pots = compute_side_pots(&players);

    assert_eq!(pots.len(), 2);
    assert_eq!(pot_info(&pots[0]), (350, vec!["b", "c", "d"]));
    assert_eq!(pot_info(&pots[1]), (400, vec!["c", "d"]));

    let total: u64 = pots.iter().map(|p| p.amount.0).sum();
    assert_eq!(total, 750, "слои покрывают все вклады");
}

#[test]
fn top_funded_only_by_folded_player_merges_down() {
    let players = vec![
        player("a", 100, PlayerStatus::AllIn),
        player("b", 100, PlayerStatus::Active),
        player("c", 150, PlayerStatus::Folded),
    ];
    let pots = compute_side_pots(&players);

    assert_eq!(pots.len(), 1);
    assert_eq!(pot_info(&pots[0]), (350, vec!["a", "b"]));
}

#[test]
fn no_contributions_no_pots() {
    let players = vec![
        player("a", 0, PlayerStatus::Active),
        player("b", 0, PlayerStatus::Active),
    ];
    assert!(compute_side_pots(&players).is_empty());
}

fn state_with_totals(a: u64, b: u64) -> TableState {
    let mut players = vec![Player::new("alice", Chips(1_000)), Player::new("bob", Chips(1_000))];
    players[0].commit(Chips(a));
    players[1].commit(Chips(b));
    let mut state = TableState::new("s1", players, &TableConfig::default());
    state.pot = Chips(a + b);
    state.total_chips = Chips(2_000);
    state
}

#[test]
fn uncalled_excess_is_refunded() {
    let mut state = state_with_totals(700, 300);

    let refund = refund_uncalled_bet(&mut state);

    assert_eq!(refund, Some(("alice".to_string(), Chips(400))));
    assert_eq!(state.players[0].chips, Chips(700));
    assert_eq!(state.players[0].total_bet_this_hand, Chips(300));
    assert_eq!(state.pot, Chips(600));
    assert_eq!(state.chips_on_table(), Chips(2_000));

    // После возврата слой один и на двоих.
    let pots = compute_side_pots(&state.players);
    assert_eq!(pots.len(), 1);
    assert_eq!(pot_info(&pots[0]), (600, vec!["alice", "bob"]));
}

#[test]
fn matched_bets_are_not_refunded() {
    let mut state = state_with_totals(300, 300);
    assert_eq!(refund_uncalled_bet(&mut state), None);
    assert_eq!(state.pot, Chips(600));
}

/// pot + сайд-поты == сумма вкладов на момент начала расчёта.
#[test]
fn pot_matches_contributions_before_settlement() {
    let state = state_with_totals(450, 120);
    let contributed: Chips = state.players.iter().map(|p| p.total_bet_this_hand).sum();
    let side: Chips = state.side_pots.iter().map(|sp| sp.amount).sum();
    assert_eq!(state.pot + side, contributed);

    let layered: Chips = compute_side_pots(&state.players).iter().map(|sp| sp.amount).sum();
    assert_eq!(layered, contributed);
}
