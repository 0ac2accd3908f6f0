mod common;

use invaders::cooldown::Cooldown;
use invaders::GameError;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use common::seeded_rng;

#[test]
fn zero_duration_is_rejected() {
    assert!(matches!(Cooldown::new(0), Err(GameError::ZeroCooldown)));
    assert!(matches!(Cooldown::with_variance(0, 50), Err(GameError::ZeroCooldown)));
}

#[test]
fn never_reset_counts_as_finished() {
    let cooldown = Cooldown::new(750).unwrap();
    assert!(cooldown.check_finished(0));
    assert_eq!(cooldown.remaining(0), 0);
}

#[test]
fn fixed_cooldown_finishes_after_its_duration() {
    let mut rng = seeded_rng();
    let mut cooldown = Cooldown::new(500).unwrap();
    cooldown.reset(100, &mut rng);
    assert!(!cooldown.check_finished(100));
    assert!(!cooldown.check_finished(599));
    assert!(cooldown.check_finished(600));
    assert_eq!(cooldown.remaining(350), 250);
}

#[test]
fn check_is_a_pure_query() {
    let mut rng = seeded_rng();
    let mut cooldown = Cooldown::new(500).unwrap();
    cooldown.reset(0, &mut rng);
    assert!(cooldown.check_finished(800));
    // Still finished; checking does not restart anything.
    assert!(cooldown.check_finished(800));
    assert!(!cooldown.check_finished(200));
}

#[test]
fn symmetric_spreads_around_the_centre() {
    let cooldown = Cooldown::symmetric(20000, 10000).unwrap();
    assert_eq!(cooldown.base(), 10000);
    assert_eq!(cooldown.variance(), 20000);

    // A spread as large as the centre keeps at least one millisecond.
    let cooldown = Cooldown::symmetric(100, 100).unwrap();
    assert_eq!(cooldown.base(), 1);
}

proptest! {
    #[test]
    fn variance_draw_stays_in_range(base in 1u64..5000, variance in 0u64..5000, start in 0u64..100_000, seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut cooldown = Cooldown::with_variance(base, variance).unwrap();
        cooldown.reset(start, &mut rng);

        let duration = cooldown.duration();
        prop_assert!(duration >= base && duration <= base + variance);
        prop_assert!(!cooldown.check_finished(start));
        prop_assert!(!cooldown.check_finished(start + duration - 1));
        prop_assert!(cooldown.check_finished(start + duration));
    }
}
