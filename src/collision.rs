//! Overlap tests, hit resolution and bullet cleanup.
//!
//! Hits are collected per frame and every bullet that hit something or left
//! the playfield is taken out of the active set and handed back to the pool
//! in a single batch.

use std::collections::HashSet;

use log::info;
use rand::Rng;

use crate::bonus::BonusShip;
use crate::bullet::{BulletId, BulletOwner, Bullets};
use crate::entities::{Body, Entity};
use crate::formation::{EnemyShipFormation, Slot};
use crate::level::Player;
use crate::settings::LevelConfig;

/// Axis-aligned overlap of two bodies, measured centre to centre. Touching
/// edges do not count.
pub fn overlaps(a: &Body, b: &Body) -> bool {
    let (center_ax, center_ay) = a.center();
    let (center_bx, center_by) = b.center();
    let max_distance_x = a.width / 2 + b.width / 2;
    let max_distance_y = a.height / 2 + b.height / 2;
    let distance_x = (center_ax - center_bx).abs();
    let distance_y = (center_ay - center_by).abs();
    distance_x < max_distance_x && distance_y < max_distance_y
}

pub fn collides<A: Entity + ?Sized, B: Entity + ?Sized>(a: &A, b: &B) -> bool {
    overlaps(a.body(), b.body())
}

/// An enemy destroyed this frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Kill {
    /// Player credited with the kill, if the bullet had one.
    pub player: Option<usize>,
    pub points: u32,
    /// The bonus ship rather than a formation member.
    pub bonus: bool,
}

/// What happened during one collision pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// Indices of players whose ship was destroyed.
    pub player_hits: Vec<usize>,
    pub kills: Vec<Kill>,
    /// Bullets returned to the pool.
    pub recycled: usize,
}

/// Resolve every bullet against the ships it can hit.
///
/// Enemy bullets (positive speed) hit player ships that still have lives,
/// unless the level is already finishing. Player bullets (negative speed)
/// hit live formation members and the flying bonus ship; points and the
/// destroyed-ship count go to the player who fired.
#[allow(clippy::too_many_arguments)]
pub fn manage_collisions<R: Rng + ?Sized>(
    bullets: &mut Bullets,
    players: &mut [Player],
    formation: &mut EnemyShipFormation,
    bonus_ship: &mut BonusShip,
    level_finished: bool,
    now: u64,
    rng: &mut R,
) -> CollisionReport {
    let mut report = CollisionReport::default();
    let mut recyclable: HashSet<BulletId> = HashSet::new();

    for bullet in bullets.iter() {
        if bullet.speed > 0 {
            for (index, player) in players.iter_mut().enumerate() {
                if player.lives > 0 && !level_finished && collides(bullet, &player.ship) {
                    recyclable.insert(bullet.id());
                    if !player.ship.is_destroyed() {
                        player.ship.destroy(now, rng);
                        player.lives -= 1;
                        report.player_hits.push(index);
                        info!(
                            "Hit on player {} ship, {} lives remaining.",
                            index + 1,
                            player.lives
                        );
                    }
                }
            }
        } else {
            let shooter = match bullet.owner {
                BulletOwner::Player(index) if index < players.len() => Some(index),
                _ => None,
            };

            let hits: Vec<Slot> = formation
                .iter_live()
                .filter(|(_, enemy)| collides(bullet, *enemy))
                .map(|(slot, _)| slot)
                .collect();
            for slot in hits {
                if let Some(points) = formation.destroy(slot) {
                    credit(players, shooter, points);
                    report.kills.push(Kill {
                        player: shooter,
                        points,
                        bonus: false,
                    });
                    recyclable.insert(bullet.id());
                }
            }

            let bonus_hit = bonus_ship
                .flying()
                .is_some_and(|special| collides(bullet, special));
            if bonus_hit {
                if let Some(points) = bonus_ship.destroy(now, rng) {
                    credit(players, shooter, points);
                    report.kills.push(Kill {
                        player: shooter,
                        points,
                        bonus: true,
                    });
                    recyclable.insert(bullet.id());
                }
            }
        }
    }

    report.recycled = bullets.recycle_ids(&recyclable);
    report
}

fn credit(players: &mut [Player], shooter: Option<usize>, points: u32) {
    if let Some(player) = shooter.and_then(|index| players.get_mut(index)) {
        player.score += points;
        player.ships_destroyed += 1;
    }
}

/// Recycle bullets above the HUD separator or below the bottom edge.
pub fn clean_bullets(bullets: &mut Bullets, config: &LevelConfig) -> usize {
    bullets.recycle_where(|bullet| {
        bullet.y() < config.separation_line_height || bullet.y() > config.height
    })
}
