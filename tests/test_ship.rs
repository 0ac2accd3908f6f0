mod common;

use invaders::bullet::{BulletOwner, Bullets};
use invaders::entities::{Entity, Sprite};
use invaders::ship::{Ship, MAX_BULLETS_IN_FLIGHT, SHIP_HEIGHT, SHIP_WIDTH};

use common::seeded_rng;

fn ship() -> Ship {
    Ship::new(224, 490, 0).unwrap()
}

#[test]
fn new_ship_geometry() {
    let s = ship();
    assert_eq!((s.x(), s.y()), (224, 490));
    assert_eq!((s.width(), s.height()), (SHIP_WIDTH, SHIP_HEIGHT));
    assert_eq!(s.speed(), 2);
    assert_eq!(s.sprite(), Sprite::Ship);
    assert!(!s.is_destroyed());
}

#[test]
fn moves_by_its_speed() {
    let mut s = ship();
    s.move_right();
    assert_eq!(s.x(), 226);
    s.move_left();
    s.move_left();
    assert_eq!(s.x(), 222);
}

#[test]
fn shoots_upward_from_its_centre() {
    let mut rng = seeded_rng();
    let mut s = ship();
    let mut bullets = Bullets::new();

    assert!(s.shoot(&mut bullets, 0, &mut rng));
    let bullet = bullets.iter().next().unwrap();
    assert_eq!(bullet.owner, BulletOwner::Player(0));
    assert_eq!(bullet.speed, -6);
    assert_eq!(bullet.y(), 490);
    assert_eq!(bullet.x() + bullet.width() / 2, 224 + SHIP_WIDTH / 2);
}

#[test]
fn shooting_respects_the_cooldown() {
    let mut rng = seeded_rng();
    let mut s = ship();
    let mut bullets = Bullets::new();

    assert!(s.shoot(&mut bullets, 1000, &mut rng));
    assert!(!s.shoot(&mut bullets, 1749, &mut rng));
    assert!(s.shoot(&mut bullets, 1750, &mut rng));
    assert_eq!(bullets.len(), 2);
}

#[test]
fn at_most_three_own_bullets_in_flight() {
    let mut rng = seeded_rng();
    let mut s = ship();
    let mut bullets = Bullets::new();
    // Another player's bullets do not count against the cap.
    bullets.fire(10, 300, -6, BulletOwner::Player(1));

    let mut now = 0;
    for _ in 0..MAX_BULLETS_IN_FLIGHT {
        assert!(s.shoot(&mut bullets, now, &mut rng));
        now += 750;
    }
    assert!(!s.shoot(&mut bullets, now, &mut rng));
    assert_eq!(bullets.count_owned_by(BulletOwner::Player(0)), 3);

    bullets.recycle_where(|b| b.owner == BulletOwner::Player(0) && b.id().0 == 1);
    assert!(s.shoot(&mut bullets, now, &mut rng));
}

#[test]
fn destroyed_ship_recovers_after_a_second() {
    let mut rng = seeded_rng();
    let mut s = ship();
    let mut bullets = Bullets::new();

    s.destroy(5000, &mut rng);
    assert!(s.is_destroyed());
    assert_eq!(s.sprite(), Sprite::ShipDestroyed);
    assert!(!s.shoot(&mut bullets, 5000, &mut rng));

    s.update(5999);
    assert!(s.is_destroyed());
    s.update(6000);
    assert!(!s.is_destroyed());
    assert_eq!(s.sprite(), Sprite::Ship);
    assert!(s.shoot(&mut bullets, 6000, &mut rng));
}
