use invaders::settings::NUM_LEVELS;
use invaders::{Difficulty, GameError, GameSettings, LevelConfig, SettingsTable};

#[test]
fn built_in_table_is_valid() {
    let table = SettingsTable::default();
    table.validate().unwrap();
    for difficulty in Difficulty::ALL {
        assert_eq!(table.tier(difficulty).len(), NUM_LEVELS as usize);
    }
    assert_eq!(table.get(Difficulty::Easy, 1).unwrap(), GameSettings::new(5, 4, 60, 2000));
    assert_eq!(table.get(Difficulty::Hard, 7).unwrap(), GameSettings::new(9, 8, 2, 500));
}

#[test]
fn levels_outside_the_table_are_errors() {
    let table = SettingsTable::default();
    assert!(matches!(
        table.get(Difficulty::Normal, 0),
        Err(GameError::LevelOutOfRange { level: 0, .. })
    ));
    assert!(matches!(
        table.get(Difficulty::Hard, 8),
        Err(GameError::LevelOutOfRange {
            tier: Difficulty::Hard,
            level: 8,
            levels: 7
        })
    ));
}

#[test]
fn shooting_variance_is_a_fifth_of_the_frequency() {
    let settings = GameSettings::new(5, 4, 60, 2000);
    assert_eq!(settings.base_shoot_frequency_ms(), 2000);
    assert_eq!(settings.shoot_frequency_variance_ms(), 400);
}

#[test]
fn table_loads_from_json() {
    let json = serde_json::to_string(&SettingsTable::default()).unwrap();
    let table = SettingsTable::from_json(&json).unwrap();
    assert_eq!(table, SettingsTable::default());
}

#[test]
fn short_tier_in_json_is_rejected() {
    let mut table = SettingsTable::default();
    table.easy.truncate(6);
    let json = serde_json::to_string(&table).unwrap();
    assert!(matches!(
        SettingsTable::from_json(&json),
        Err(GameError::InvalidSettings(_))
    ));
    assert!(matches!(
        SettingsTable::from_json("{ not json"),
        Err(GameError::Json(_))
    ));
}

#[test]
fn missing_settings_file_is_an_io_error() {
    let result = SettingsTable::load(std::path::Path::new("/nonexistent/settings.json"));
    assert!(matches!(result, Err(GameError::Io(_))));
}

#[test]
fn difficulty_names() {
    assert_eq!(Difficulty::from_str("EASY"), Some(Difficulty::Easy));
    assert_eq!(Difficulty::from_str("medium"), Some(Difficulty::Normal));
    assert_eq!(Difficulty::from_str("3"), Some(Difficulty::Hard));
    assert_eq!(Difficulty::from_str("extreme"), None);
    assert_eq!(Difficulty::default(), Difficulty::Easy);
    assert_eq!(Difficulty::Normal.to_string(), "normal");
    assert_eq!(serde_json::to_string(&Difficulty::Hard).unwrap(), "\"hard\"");
}

#[test]
fn level_config_defaults_fill_missing_fields() {
    let config: LevelConfig = serde_json::from_str(r#"{ "fps": 30 }"#).unwrap();
    assert_eq!(config.fps, 30);
    assert_eq!(config.frame_ms(), 33);
    assert_eq!(config.width, 448);
    assert_eq!(config.input_delay_ms, 6000);
    config.validate().unwrap();
}

#[test]
fn level_config_validation() {
    let config = LevelConfig {
        fps: 0,
        ..LevelConfig::default()
    };
    assert!(config.validate().is_err());

    let config = LevelConfig {
        separation_line_height: 600,
        ..LevelConfig::default()
    };
    assert!(config.validate().is_err());
}
