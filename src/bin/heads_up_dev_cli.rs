// src/bin/heads_up_dev_cli.rs
//
// Запуск: heads_up_dev_cli [config.json] [hands] [seed]
// Логи: RUST_LOG=debug (уровень: error/warn/info/debug/trace)

use std::env;
use std::fs;
use std::process::ExitCode;

use tracing::Level;

use heads_up_engine::api::build_table_view;
use heads_up_engine::domain::{Chips, PlayerId, TableConfig, TableState};
use heads_up_engine::engine::{PlayerActionKind, TableManager};
use heads_up_engine::infra::DeterministicRng;

const SESSION_ID: &str = "dev-session";
const MAX_STEPS: u32 = 200;

/// Сценарий, по которому играет CLI.
#[derive(Copy, Clone, Debug)]
enum Scenario {
    CheckCall,
    RaiseThenFold,
    ShoveAndCall,
}

impl Scenario {
    fn for_hand(hand_number: u64) -> Self {
        match hand_number % 3 {
            1 => Scenario::CheckCall,
            2 => Scenario::RaiseThenFold,
            _ => Scenario::ShoveAndCall,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let level = env::var("RUST_LOG")
        .ok()
        .and_then(|value| value.trim().parse::<Level>().ok())
        .unwrap_or(Level::INFO);
    tracing_subscriber::fmt().with_max_level(level).init();

    let args: Vec<String> = env::args().collect();

    let config = match args.get(1) {
        Some(path) => match load_config(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("[CLI] Не удалось загрузить конфиг {path}: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => TableConfig::default(),
    };
    let hands: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(10);
    let seed: u64 = args.get(3).and_then(|s| s.parse().ok()).unwrap_or(42);

    let manager = match TableManager::new(config.clone()) {
        Ok(m) => m.with_rng(DeterministicRng::from_seed(seed)),
        Err(e) => {
            eprintln!("[CLI] Некорректный конфиг: {e}");
            return ExitCode::FAILURE;
        }
    };

    println!(
        "[CLI] Блайнды {}/{}, стек {}, раздач: {hands}, seed={seed}",
        config.small_blind, config.big_blind, config.starting_stack
    );

    let players: Vec<PlayerId> = vec!["alice".to_string(), "bob".to_string()];
    let mut state = match manager.initialize_state(SESSION_ID, &players).await {
        Ok(s) => s,
        Err(e) => {
            eprintln!("[CLI] ОШИБКА initialize_state: {e}");
            return ExitCode::FAILURE;
        }
    };

    for _ in 0..hands {
        println!();
        println!("================ HAND #{} =================", state.hand_number);
        print_state(&state);

        state = play_hand(&manager, state).await;

        match manager.start_new_hand(SESSION_ID).await {
            Ok(Some(next)) => state = next,
            Ok(None) => {
                eprintln!("[CLI] BUG: сессия {SESSION_ID} пропала из кэша");
                return ExitCode::FAILURE;
            }
            Err(e) => {
                eprintln!("[CLI] ОШИБКА start_new_hand: {e}");
                return ExitCode::FAILURE;
            }
        }

        if let Some(winner) = &state.match_winner {
            println!();
            println!("=== МАТЧ ОКОНЧЕН: победил {winner} ===");
            break;
        }
    }

    println!("[CLI] Завершение работы dev-CLI.");
    ExitCode::SUCCESS
}

fn load_config(path: &str) -> Result<TableConfig, String> {
    let raw = fs::read_to_string(path).map_err(|e| e.to_string())?;
    let config = TableConfig::from_json_str(&raw).map_err(|e| e.to_string())?;
    config.validate().map_err(|e| e.to_string())?;
    Ok(config)
}

/// Доиграть текущую раздачу по сценарию. Возвращает последний снэпшот.
async fn play_hand(manager: &TableManager, mut state: TableState) -> TableState {
    let scenario = Scenario::for_hand(state.hand_number);

    for step in 1..=MAX_STEPS {
        if state.is_hand_complete {
            break;
        }
        let Some(actor) = state.current_player().map(|p| p.id.clone()) else {
            println!("[CLI] BUG: нет текущего игрока в незавершённой раздаче");
            break;
        };

        let action = pick_action(scenario, &state, step);
        println!(
            "[CLI] [step={step}] street={} {actor} -> {action}",
            state.betting_round
        );

        let outcome = manager.process_action(SESSION_ID, &actor, action).await;
        if !outcome.success {
            // Сценарий промахнулся с размером – просто коллим/чекаем.
            println!("[CLI] отклонено: {}", outcome.error.unwrap_or_default());
            let fallback = if state.to_call(state.current_player_index).is_zero() {
                PlayerActionKind::Check
            } else {
                PlayerActionKind::Call
            };
            let retry = manager.process_action(SESSION_ID, &actor, fallback).await;
            if let Some(next) = retry.state {
                state = next;
            }
            continue;
        }

        if let Some(next) = outcome.state {
            state = next;
        }
        if outcome.hand_complete {
            println!("=== РАЗДАЧА ЗАВЕРШЕНА, победители: {:?} ===", outcome.winners);
        }
    }

    print_state(&state);
    state
}

fn pick_action(scenario: Scenario, state: &TableState, step: u32) -> PlayerActionKind {
    let idx = state.current_player_index;
    let to_call = state.to_call(idx);

    match scenario {
        Scenario::CheckCall => {
            if to_call.is_zero() {
                PlayerActionKind::Check
            } else {
                PlayerActionKind::Call
            }
        }
        Scenario::RaiseThenFold => match step {
            1 => PlayerActionKind::Raise(state.min_raise()),
            2 => PlayerActionKind::Fold,
            _ if to_call.is_zero() => PlayerActionKind::Check,
            _ => PlayerActionKind::Call,
        },
        Scenario::ShoveAndCall => {
            if step == 1 {
                PlayerActionKind::AllIn
            } else if to_call > Chips::ZERO {
                PlayerActionKind::Call
            } else {
                PlayerActionKind::Check
            }
        }
    }
}

fn print_state(state: &TableState) {
    let view = build_table_view(state, None);
    let board: Vec<String> = view.board.iter().map(|c| c.to_string()).collect();
    println!(
        "[TABLE] hand={} street={} pot={} board=[{}]",
        view.hand_number,
        view.street,
        view.pot,
        board.join(" ")
    );
    for p in &view.players {
        let cards = p
            .hole_cards
            .as_ref()
            .map(|cs| cs.iter().map(|c| c.to_string()).collect::<Vec<_>>().join(" "))
            .unwrap_or_else(|| "?? ??".to_string());
        println!(
            "  {:<6} chips={:<6} bet={:<5} status={:?} dealer={} cards={cards}",
            p.player_id, p.chips, p.bet_this_round, p.status, p.is_dealer
        );
    }
    for reveal in &view.showdown {
        println!("  showdown: {} – {}", reveal.player_id, reveal.hand_name);
    }
}
