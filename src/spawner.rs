use rand::Rng;

use crate::constants::*;
use crate::entities::{Enemy, Meteor};

/// One chance in `odds`, as a uniform draw from `1..=odds`.
pub fn roll(rng: &mut impl Rng, odds: u32) -> bool {
    rng.gen_range(1..=odds) == 1
}

fn spawn_center_x(rng: &mut impl Rng) -> i32 {
    rng.gen_range(SPAWN_MARGIN..=PLAYFIELD_WIDTH - SPAWN_MARGIN)
}

pub fn spawn_enemy(rng: &mut impl Rng) -> Enemy {
    let center_x = spawn_center_x(rng);
    let speed = rng.gen_range(ENEMY_SPEED_RANGE.0..=ENEMY_SPEED_RANGE.1);
    Enemy::new(center_x, speed)
}

pub fn spawn_meteor(rng: &mut impl Rng) -> Meteor {
    let center_x = spawn_center_x(rng);
    let speed = rng.gen_range(METEOR_SPEED_RANGE.0..=METEOR_SPEED_RANGE.1);
    let rotation_speed = rng.gen_range(METEOR_ROTATION_RANGE.0..=METEOR_ROTATION_RANGE.1);
    Meteor::new(center_x, speed, rotation_speed)
}

/// Independent per-frame trials for each kind; either, both or neither may spawn.
pub fn roll_spawns(rng: &mut impl Rng) -> (Option<Enemy>, Option<Meteor>) {
    let enemy = if roll(rng, ENEMY_SPAWN_ODDS) { Some(spawn_enemy(rng)) } else { None };
    let meteor = if roll(rng, METEOR_SPAWN_ODDS) { Some(spawn_meteor(rng)) } else { None };
    (enemy, meteor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn spawned_enemies_respect_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let enemy = spawn_enemy(&mut rng);
            let center_x = enemy.rect.center_x();
            assert!((20..=680).contains(&center_x));
            assert!((3..=6).contains(&enemy.speed));
            assert_eq!(enemy.rect.center().1, 0);
        }
    }

    #[test]
    fn spawned_meteors_respect_ranges() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut saw_negative_spin = false;
        let mut saw_positive_spin = false;
        for _ in 0..1000 {
            let meteor = spawn_meteor(&mut rng);
            assert!((20..=680).contains(&meteor.center.0));
            assert!((4..=7).contains(&meteor.speed));
            assert!((-3..=3).contains(&meteor.rotation_speed));
            assert_eq!(meteor.angle, 0);
            saw_negative_spin |= meteor.rotation_speed < 0;
            saw_positive_spin |= meteor.rotation_speed > 0;
        }
        assert!(saw_negative_spin && saw_positive_spin);
    }

    #[test]
    fn spawn_rates_are_close_to_their_odds() {
        let mut rng = StdRng::seed_from_u64(2024);
        let trials = 200_000;
        let mut enemies = 0;
        let mut meteors = 0;
        for _ in 0..trials {
            let (enemy, meteor) = roll_spawns(&mut rng);
            enemies += enemy.is_some() as u32;
            meteors += meteor.is_some() as u32;
        }
        // Expected 5000 and 2500; allow a generous band
        assert!((4500..=5500).contains(&enemies), "enemies = {enemies}");
        assert!((2150..=2850).contains(&meteors), "meteors = {meteors}");
    }

    #[test]
    fn roll_with_odds_of_one_always_hits() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!((0..100).all(|_| roll(&mut rng, 1)));
    }
}
