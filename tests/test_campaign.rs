mod common;

use invaders::platform::{Key, ManualClock};
use invaders::{
    Campaign, Difficulty, GameError, GameSettings, GameState, LevelConfig, ScreenCode, SettingsTable,
};

use common::{seeded_rng, RecordingSurface, ScriptedInput};

fn campaign(difficulty: Difficulty) -> Campaign {
    Campaign::new(SettingsTable::default(), difficulty, LevelConfig::default()).unwrap()
}

#[test]
fn runs_start_on_level_one_with_full_lives() {
    let c = campaign(Difficulty::Easy);
    assert_eq!(c.initial_states(2).unwrap(), vec![GameState::new(1, 0, 3, 0, 0); 2]);
    assert!(matches!(c.initial_states(0), Err(GameError::PlayerCount(0))));
    assert!(matches!(c.initial_states(3), Err(GameError::PlayerCount(3))));
}

#[test]
fn extra_life_every_third_level_below_the_maximum() {
    let c = campaign(Difficulty::Normal);
    assert!(c.bonus_life(&GameState::new(3, 0, 2, 0, 0)));
    assert!(c.bonus_life(&GameState::new(6, 0, 1, 0, 0)));
    assert!(!c.bonus_life(&GameState::new(3, 0, 3, 0, 0)));
    assert!(!c.bonus_life(&GameState::new(4, 0, 2, 0, 0)));
}

#[test]
fn start_level_uses_the_tier_table() {
    let mut rng = seeded_rng();
    let c = campaign(Difficulty::Hard);
    let level = c.start_level(&[GameState::first_level(3)], 0, &mut rng).unwrap();
    assert_eq!(level.formation().columns(), 6);
    assert_eq!(level.formation().rows(), 5);
    assert!(!level.bonus_life());

    let level = c.start_level(&[GameState::new(3, 120, 2, 9, 4)], 0, &mut rng).unwrap();
    assert!(level.bonus_life());
    assert_eq!(level.players()[0].lives, 3);
}

#[test]
fn level_past_the_table_is_fatal() {
    let mut rng = seeded_rng();
    let c = campaign(Difficulty::Easy);
    let result = c.start_level(&[GameState::new(8, 0, 3, 0, 0)], 0, &mut rng);
    assert!(matches!(
        result,
        Err(GameError::LevelOutOfRange {
            tier: Difficulty::Easy,
            level: 8,
            levels: 7
        })
    ));
}

#[test]
fn advance_and_is_over() {
    let c = campaign(Difficulty::Easy);
    let states = vec![GameState::new(2, 100, 1, 5, 3), GameState::new(2, 80, 0, 4, 2)];
    let next = c.advance(&states);
    assert_eq!(next[0], GameState::new(3, 100, 1, 5, 3));
    assert_eq!(next[1], GameState::new(3, 80, 0, 4, 2));
    assert!(!c.is_over(&next));

    assert!(c.is_over(&[GameState::new(3, 0, 0, 0, 0)]));
    assert!(c.is_over(&[GameState::new(8, 0, 2, 0, 0)]));
    assert!(!c.is_over(&[GameState::new(7, 0, 2, 0, 0)]));
}

#[test]
fn invalid_tables_are_rejected() {
    let mut table = SettingsTable::default();
    table.normal.pop();
    let result = Campaign::new(table, Difficulty::Normal, LevelConfig::default());
    assert!(matches!(result, Err(GameError::InvalidSettings(_))));

    let mut table = SettingsTable::default();
    table.hard[2] = GameSettings::new(0, 5, 40, 1500);
    assert!(Campaign::new(table, Difficulty::Hard, LevelConfig::default()).is_err());
}

#[test]
fn play_stops_when_the_user_quits() {
    let mut rng = seeded_rng();
    let c = campaign(Difficulty::Easy);
    let clock = ManualClock::new(0);
    let mut input = ScriptedInput::quitting_after(10);
    let mut surface = RecordingSurface::default();

    let outcome = c.play(2, &clock, &mut input, &mut surface, &mut rng).unwrap();

    assert_eq!(outcome.code, ScreenCode::Exit);
    assert_eq!(outcome.states, vec![GameState::new(1, 0, 3, 0, 0); 2]);
    assert_eq!(surface.frames, 10);
}

#[test]
fn run_length_must_fit_the_table() {
    for num_levels in [0, 8] {
        let config = LevelConfig {
            num_levels,
            ..LevelConfig::default()
        };
        let result = Campaign::new(SettingsTable::default(), Difficulty::Easy, config);
        assert!(matches!(result, Err(GameError::InvalidSettings(_))));
    }

    let short = LevelConfig {
        num_levels: 3,
        ..LevelConfig::default()
    };
    assert!(Campaign::new(SettingsTable::default(), Difficulty::Easy, short).is_ok());
}

#[test]
fn play_carries_counters_through_every_level() {
    // A lone enemy that never steps or shoots, right above the ship.
    let lone = GameSettings::new(1, 1, 100_000, 600_000);
    let table = SettingsTable {
        easy: vec![lone; 7],
        normal: vec![lone; 7],
        hard: vec![lone; 7],
    };
    let config = LevelConfig {
        width: 38,
        num_levels: 3,
        bonus_ship_interval_ms: 60_000,
        ..LevelConfig::default()
    };
    let c = Campaign::new(table, Difficulty::Easy, config).unwrap();

    let mut rng = seeded_rng();
    let clock = ManualClock::new(0);
    let mut input = ScriptedInput::holding(&[Key::Space]);
    let mut surface = RecordingSurface::default();

    let outcome = c.play(1, &clock, &mut input, &mut surface, &mut rng).unwrap();

    assert_eq!(outcome.code, ScreenCode::Score);
    // Per level: 30 for the kill, 200 for two spare lives, two shots fired.
    assert_eq!(outcome.states, vec![GameState::new(3, 690, 3, 6, 3)]);
}
