//! Внешний API: JSON-команды, выполнение через TableManager,
//! представление стола для игрока, запросы.

use heads_up_engine::api::*;
use heads_up_engine::domain::*;
use heads_up_engine::engine::{EngineError, RandomSource, TableManager};

struct DummyRng;

impl RandomSource for DummyRng {
    fn shuffle(&mut self, _cards: &mut [Card]) {}

    fn choose_index(&mut self, _len: usize) -> usize {
        0
    }
}

fn manager() -> TableManager {
    TableManager::new(TableConfig::default()).unwrap().with_rng(DummyRng)
}

fn init_cmd() -> Command {
    Command::InitializeState {
        session_id: "s1".to_string(),
        player_ids: vec!["alice".to_string(), "bob".to_string()],
    }
}

fn action_cmd(player: &str, action: &str, amount: Option<u64>) -> Command {
    Command::PlayerAction(ActionCommand {
        session_id: "s1".to_string(),
        player_id: player.to_string(),
        action: action.to_string(),
        amount,
    })
}

#[test]
fn command_json_is_tagged() {
    let cmd = Command::from_json(
        r#"{"type":"player_action","session_id":"s1","player_id":"alice","action":"bet","amount":40}"#,
    )
    .unwrap();
    assert_eq!(cmd, action_cmd("alice", "bet", Some(40)));
    assert_eq!(cmd.session_id(), "s1");

    let no_amount =
        Command::from_json(r#"{"type":"player_action","session_id":"s1","player_id":"bob","action":"fold"}"#)
            .unwrap();
    assert_eq!(no_amount, action_cmd("bob", "fold", None));

    let json = serde_json::to_value(init_cmd()).unwrap();
    assert_eq!(json["type"], "initialize_state");
    assert_eq!(json["player_ids"][1], "bob");

    assert!(matches!(
        Command::from_json(r#"{"type":"teleport"}"#),
        Err(ApiError::BadRequest(_))
    ));
}

#[test]
fn engine_errors_map_to_api_errors() {
    assert_eq!(
        ApiError::from(EngineError::SessionNotFound("s9".to_string())),
        ApiError::SessionNotFound("s9".to_string())
    );
    assert_eq!(
        ApiError::from(EngineError::HandStillInProgress),
        ApiError::Rejected(EngineError::HandStillInProgress.to_string())
    );
}

#[tokio::test]
async fn full_hand_through_commands() {
    let m = manager();

    let resp = init_cmd().execute(&m).await.unwrap();
    let CommandResponse::State { state } = resp else {
        panic!("ожидали состояние");
    };
    assert_eq!(state.hand_number, 1);

    let resp = action_cmd("alice", "fold", None).execute(&m).await.unwrap();
    let CommandResponse::Action { outcome } = resp else {
        panic!("ожидали результат действия");
    };
    assert!(outcome.success);
    assert!(outcome.hand_complete);
    assert_eq!(outcome.winners, vec!["bob".to_string()]);

    let resp = Command::StartNewHand {
        session_id: "s1".to_string(),
    }
    .execute(&m)
    .await
    .unwrap();
    let CommandResponse::State { state } = resp else {
        panic!("ожидали состояние");
    };
    assert_eq!(state.hand_number, 2);

    let resp = Command::DeleteState {
        session_id: "s1".to_string(),
    }
    .execute(&m)
    .await
    .unwrap();
    assert!(matches!(resp, CommandResponse::Deleted { existed: true, .. }));
}

#[tokio::test]
async fn rejected_action_is_not_an_api_error() {
    let m = manager();
    init_cmd().execute(&m).await.unwrap();

    let resp = action_cmd("alice", "bet", None).execute(&m).await.unwrap();
    let CommandResponse::Action { outcome } = resp else {
        panic!("ожидали результат действия");
    };
    assert!(!outcome.success);
    assert_eq!(outcome.rejection, Some(EngineError::MissingAmount("bet")));

    // В JSON уходит текст ошибки, но не типизированная причина.
    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["success"], false);
    assert!(json["error"].is_string());
    assert!(json.get("rejection").is_none());
}

#[tokio::test]
async fn start_new_hand_on_unknown_session_is_not_found() {
    let m = manager();
    let err = Command::StartNewHand {
        session_id: "ghost".to_string(),
    }
    .execute(&m)
    .await
    .unwrap_err();
    assert_eq!(err, ApiError::SessionNotFound("ghost".to_string()));

    let err = Command::InitializeState {
        session_id: "s1".to_string(),
        player_ids: vec!["alice".to_string()],
    }
    .execute(&m)
    .await
    .unwrap_err();
    assert!(matches!(err, ApiError::Rejected(_)));
}

#[tokio::test]
async fn view_hides_opponent_cards_until_showdown() {
    let m = manager();
    init_cmd().execute(&m).await.unwrap();
    let state = m.get_state("s1").unwrap();

    let alice_view = build_table_view(&state, Some("alice"));
    assert!(alice_view.players[0].hole_cards.is_some());
    assert!(alice_view.players[1].hole_cards.is_none(), "чужие карты скрыты");
    assert_eq!(alice_view.current_player_id.as_deref(), Some("alice"));
    assert_eq!(alice_view.to_call, Some(Chips(10)));
    assert_eq!(alice_view.pot, Chips(30));

    let spectator = build_table_view(&state, None);
    assert!(spectator.players.iter().all(|p| p.hole_cards.is_none()));
    assert_eq!(spectator.to_call, None);

    // Чек-колл до шоудауна – карты вскрываются.
    let script = [
        ("alice", "call"),
        ("bob", "check"),
        ("bob", "check"),
        ("alice", "check"),
        ("bob", "check"),
        ("alice", "check"),
        ("bob", "check"),
        ("alice", "check"),
    ];
    for (player, action) in script {
        let resp = action_cmd(player, action, None).execute(&m).await.unwrap();
        let CommandResponse::Action { outcome } = resp else {
            panic!("ожидали результат действия");
        };
        assert!(outcome.success, "{player} {action}: {:?}", outcome.error);
    }

    let state = m.get_state("s1").unwrap();
    assert!(state.is_hand_complete);
    let after = build_table_view(&state, Some("alice"));
    assert!(after.players.iter().all(|p| p.hole_cards.is_some()));
    assert_eq!(after.showdown.len(), 2);
    assert_eq!(after.current_player_id, None);
}

#[tokio::test]
async fn view_after_fold_keeps_cards_hidden() {
    let m = manager();
    init_cmd().execute(&m).await.unwrap();
    action_cmd("alice", "fold", None).execute(&m).await.unwrap();

    let state = m.get_state("s1").unwrap();
    let bob_view = build_table_view(&state, Some("bob"));
    assert!(bob_view.players[0].hole_cards.is_none(), "без шоудауна карты не показываются");
    assert_eq!(bob_view.winner_ids, vec!["bob".to_string()]);
}

#[tokio::test]
async fn queries_read_cache() {
    let m = manager();
    init_cmd().execute(&m).await.unwrap();

    let QueryResponse::State(Some(state)) = run_query(
        &m,
        &Query::GetState {
            session_id: "s1".to_string(),
        },
    ) else {
        panic!("ожидали снэпшот");
    };
    assert_eq!(state.deck.len(), 48);

    let QueryResponse::View(Some(view)) = run_query(
        &m,
        &Query::GetView {
            session_id: "s1".to_string(),
            viewer: Some("bob".to_string()),
        },
    ) else {
        panic!("ожидали представление");
    };
    assert!(view.players[1].hole_cards.is_some());
    assert!(view.players[0].hole_cards.is_none());

    assert!(matches!(
        run_query(
            &m,
            &Query::GetView {
                session_id: "ghost".to_string(),
                viewer: None,
            },
        ),
        QueryResponse::View(None)
    ));
}
