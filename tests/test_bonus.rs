mod common;

use invaders::bonus::{BonusShip, BonusShipState};
use invaders::entities::{Entity, Sprite};
use invaders::LevelConfig;

use common::seeded_rng;

const WIDTH: i32 = 448;

#[test]
fn appears_within_the_spawn_window() {
    let mut rng = seeded_rng();
    let mut bonus = BonusShip::new(&LevelConfig::default(), 0, &mut rng).unwrap();
    assert_eq!(bonus.state(), &BonusShipState::Absent);

    bonus.update(WIDTH, 9_999, &mut rng);
    assert!(bonus.visible().is_none());

    bonus.update(WIDTH, 30_000, &mut rng);
    let ship = bonus.flying().unwrap();
    assert_eq!((ship.x(), ship.y()), (-32, 60));
    assert_eq!(ship.sprite(), Sprite::EnemyShipSpecial);
}

#[test]
fn flies_right_and_escapes() {
    let mut rng = seeded_rng();
    let mut bonus = BonusShip::new(&LevelConfig::default(), 0, &mut rng).unwrap();
    bonus.update(WIDTH, 30_000, &mut rng);

    for _ in 0..240 {
        bonus.update(WIDTH, 30_001, &mut rng);
    }
    assert_eq!(bonus.flying().unwrap().x(), 448);

    bonus.update(WIDTH, 30_001, &mut rng);
    assert_eq!(bonus.state(), &BonusShipState::Absent);
}

#[test]
fn explosion_lasts_half_a_second() {
    let mut rng = seeded_rng();
    let mut bonus = BonusShip::new(&LevelConfig::default(), 0, &mut rng).unwrap();
    bonus.update(WIDTH, 30_000, &mut rng);
    bonus.update(WIDTH, 30_016, &mut rng);

    assert_eq!(bonus.destroy(30_100, &mut rng), Some(100));
    assert_eq!(bonus.destroy(30_100, &mut rng), None);
    assert!(bonus.flying().is_none());
    let wreck = bonus.visible().unwrap();
    assert_eq!(wreck.sprite(), Sprite::Explosion);
    assert_eq!(wreck.x(), -30);

    bonus.update(WIDTH, 30_599, &mut rng);
    assert!(matches!(bonus.state(), BonusShipState::Exploding(_)));
    bonus.update(WIDTH, 30_600, &mut rng);
    assert_eq!(bonus.state(), &BonusShipState::Absent);
}

#[test]
fn nothing_to_destroy_while_absent() {
    let mut rng = seeded_rng();
    let mut bonus = BonusShip::new(&LevelConfig::default(), 0, &mut rng).unwrap();
    assert_eq!(bonus.destroy(100, &mut rng), None);
    assert_eq!(bonus.state(), &BonusShipState::Absent);
}
