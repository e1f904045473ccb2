use serde::{Deserialize, Serialize};

use crate::domain::{Card, Chips, PlayerId, PlayerStatus, PotAward, SessionId, ShowdownReveal, Street, TableState};

/// Игрок глазами конкретного зрителя.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerView {
    pub player_id: PlayerId,
    pub chips: Chips,
    pub bet_this_round: Chips,
    pub total_bet_this_hand: Chips,
    pub status: PlayerStatus,
    /// Карманные карты – только свои или вскрытые на шоудауне.
    pub hole_cards: Option<Vec<Card>>,
    pub is_dealer: bool,
    pub is_small_blind: bool,
    pub is_big_blind: bool,
    pub last_action: Option<String>,
}

/// Стол глазами конкретного зрителя (без колоды и чужих карт).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableView {
    pub session_id: SessionId,
    pub hand_number: u64,
    pub street: Street,
    pub board: Vec<Card>,
    pub pot: Chips,
    pub small_blind: Chips,
    pub big_blind: Chips,
    pub minimum_bet: Chips,
    pub min_raise: Chips,
    pub players: Vec<PlayerView>,
    /// Чей ход (если раздача идёт).
    pub current_player_id: Option<PlayerId>,
    /// Сколько зрителю нужно доставить (если он за столом).
    pub to_call: Option<Chips>,
    pub is_hand_complete: bool,
    pub winner_ids: Vec<PlayerId>,
    pub showdown: Vec<ShowdownReveal>,
    pub pot_results: Vec<PotAward>,
    pub match_winner: Option<PlayerId>,
}

/// Собрать представление стола для `viewer` (`None` – сторонний наблюдатель).
pub fn build_table_view(state: &TableState, viewer: Option<&str>) -> TableView {
    let players = state
        .players
        .iter()
        .map(|p| {
            let revealed = state.showdown.iter().any(|r| r.player_id == p.id);
            let own = viewer == Some(p.id.as_str());
            PlayerView {
                player_id: p.id.clone(),
                chips: p.chips,
                bet_this_round: p.bet_this_round,
                total_bet_this_hand: p.total_bet_this_hand,
                status: p.status,
                hole_cards: (own || revealed).then(|| p.hole_cards.clone()),
                is_dealer: p.is_dealer,
                is_small_blind: p.is_small_blind,
                is_big_blind: p.is_big_blind,
                last_action: p.last_action.map(|a| a.to_string()),
            }
        })
        .collect();

    let current_player_id = if state.is_hand_complete {
        None
    } else {
        state.current_player().map(|p| p.id.clone())
    };

    let to_call = viewer
        .and_then(|id| state.player_index(id))
        .map(|idx| state.to_call(idx));

    TableView {
        session_id: state.session_id.clone(),
        hand_number: state.hand_number,
        street: state.betting_round,
        board: state.community_cards.clone(),
        pot: state.pot,
        small_blind: state.small_blind,
        big_blind: state.big_blind,
        minimum_bet: state.minimum_bet,
        min_raise: state.min_raise(),
        players,
        current_player_id,
        to_call,
        is_hand_complete: state.is_hand_complete,
        winner_ids: state.winner_ids.clone(),
        showdown: state.showdown.clone(),
        pot_results: state.pot_results.clone(),
        match_winner: state.match_winner.clone(),
    }
}
