use log::{debug, info};
use rand::Rng;

use crate::audio::Cue;
use crate::collision::{self, Target};
use crate::constants::*;
use crate::entities::{Bullet, Enemy, Explosion, Meteor, Player};
use crate::spawner;
use crate::types::Rect;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Menu,
    Playing,
    Won,
    Lost,
}

impl Phase {
    pub fn is_over(self) -> bool {
        matches!(self, Phase::Won | Phase::Lost)
    }
}

/// Everything the simulation needs from the player for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub move_left: bool,
    pub move_right: bool,
    pub fire: bool,
    pub click: Option<(i32, i32)>, // Playfield coordinates
}

pub fn start_button() -> Rect {
    let (w, h) = START_BUTTON_SIZE;
    Rect::from_center(START_BUTTON_CENTER.0, START_BUTTON_CENTER.1, w, h)
}

/// The whole game state. Score and missed only change inside `step`.
pub struct World {
    pub phase: Phase,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub meteors: Vec<Meteor>,
    pub bullets: Vec<Bullet>,
    pub explosions: Vec<Explosion>,
    pub score: u32,
    pub missed: u32,
    pub frame: u64,
}

impl World {
    pub fn new() -> Self {
        World {
            phase: Phase::Menu,
            player: Player::new(),
            enemies: Vec::new(),
            meteors: Vec::new(),
            bullets: Vec::new(),
            explosions: Vec::new(),
            score: 0,
            missed: 0,
            frame: 0,
        }
    }

    /// Advances one frame and returns the audio cues it produced.
    /// Rendering and the round-end check happen afterwards, in that order.
    pub fn step(&mut self, input: &FrameInput, rng: &mut impl Rng) -> Vec<Cue> {
        match self.phase {
            Phase::Menu => self.step_menu(input),
            Phase::Playing => self.step_playing(input, rng),
            Phase::Won | Phase::Lost => Vec::new(),
        }
    }

    fn step_menu(&mut self, input: &FrameInput) -> Vec<Cue> {
        match input.click {
            Some((x, y)) if start_button().contains_point(x, y) => {
                info!("Start button clicked at ({}, {}). Starting round.", x, y);
                self.phase = Phase::Playing;
                vec![Cue::BackgroundLoop]
            }
            Some((x, y)) => {
                debug!("Menu click at ({}, {}) missed the start button.", x, y);
                Vec::new()
            }
            None => Vec::new(),
        }
    }

    fn step_playing(&mut self, input: &FrameInput, rng: &mut impl Rng) -> Vec<Cue> {
        let mut cues = Vec::new();

        if input.fire {
            let (x, y) = self.player.muzzle();
            self.bullets.push(Bullet::new(x, y));
            cues.push(Cue::Fire);
        }

        let (enemy, meteor) = spawner::roll_spawns(rng);
        if let Some(enemy) = enemy {
            debug!("Enemy spawned at x: {}, speed: {}", enemy.rect.center_x(), enemy.speed);
            self.enemies.push(enemy);
        }
        if let Some(meteor) = meteor {
            debug!(
                "Meteor spawned at x: {}, speed: {}, spin: {}",
                meteor.center.0, meteor.speed, meteor.rotation_speed
            );
            self.meteors.push(meteor);
        }

        self.update_entities(input);

        for impact in collision::resolve(&mut self.bullets, &mut self.enemies, &mut self.meteors) {
            if impact.target == Target::Enemy {
                self.score += 1;
                info!("Enemy destroyed. Score: {}", self.score);
            } else {
                debug!("Meteor destroyed at ({}, {}).", impact.center.0, impact.center.1);
            }
            self.explosions.push(Explosion::new(impact.center));
            cues.push(Cue::Impact);
        }

        self.frame += 1;
        cues
    }

    fn update_entities(&mut self, input: &FrameInput) {
        self.player.update(input.move_left, input.move_right);

        let mut escaped = 0;
        self.enemies.retain_mut(|enemy| {
            enemy.update();
            if enemy.is_past_bottom() {
                escaped += 1;
                false
            } else {
                true
            }
        });
        if escaped > 0 {
            self.missed += escaped;
            info!("{} enemy(s) slipped past. Missed: {}", escaped, self.missed);
        }

        self.meteors.retain_mut(|meteor| {
            meteor.update();
            !meteor.is_past_bottom()
        });

        self.bullets.retain_mut(|bullet| {
            bullet.update();
            !bullet.is_past_top()
        });

        // Last frame's explosions have been drawn once
        self.explosions.clear();
    }

    /// Applies the win/lose thresholds. A win is checked first and takes precedence.
    pub fn check_round_end(&mut self) -> Phase {
        if self.phase == Phase::Playing {
            if self.score >= WIN_SCORE {
                info!("Score reached {} on frame {}. Round won.", self.score, self.frame);
                self.phase = Phase::Won;
            } else if self.missed >= MAX_MISSED {
                info!("Missed reached {} on frame {}. Round lost.", self.missed, self.frame);
                self.phase = Phase::Lost;
            }
        }
        self.phase
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn playing_world() -> World {
        let mut world = World::new();
        world.phase = Phase::Playing;
        world
    }

    fn idle() -> FrameInput {
        FrameInput::default()
    }

    #[test]
    fn menu_ignores_clicks_outside_button() {
        let mut world = World::new();
        let mut rng = StdRng::seed_from_u64(1);
        let input = FrameInput { click: Some((10, 10)), ..idle() };
        assert!(world.step(&input, &mut rng).is_empty());
        assert_eq!(world.phase, Phase::Menu);
        // Keys do nothing in the menu either
        let input = FrameInput { fire: true, move_left: true, ..idle() };
        world.step(&input, &mut rng);
        assert_eq!(world.phase, Phase::Menu);
        assert!(world.bullets.is_empty());
    }

    #[test]
    fn clicking_start_begins_round_with_music() {
        let mut world = World::new();
        let mut rng = StdRng::seed_from_u64(1);
        let input = FrameInput { click: Some((350, 350)), ..idle() };
        assert_eq!(world.step(&input, &mut rng), vec![Cue::BackgroundLoop]);
        assert_eq!(world.phase, Phase::Playing);
    }

    #[test]
    fn firing_spawns_bullet_and_cue() {
        let mut world = playing_world();
        let mut rng = StdRng::seed_from_u64(3);
        let cues = world.step(&FrameInput { fire: true, ..idle() }, &mut rng);
        assert!(cues.contains(&Cue::Fire));
        assert_eq!(world.bullets.len(), 1);
        // Spawned at the muzzle and already advanced this frame
        assert_eq!(world.bullets[0].rect.center(), (350, 425 - BULLET_SPEED));
    }

    #[test]
    fn enemy_kill_scores_and_explodes() {
        let mut world = playing_world();
        world.enemies.push(Enemy::new(350, 0));
        world.enemies[0].rect.y = 380;
        world.bullets.push(Bullet::new(350, 430));
        let mut rng = StdRng::seed_from_u64(5);

        let cues = world.step(&idle(), &mut rng);

        assert_eq!(world.score, 1);
        assert!(cues.contains(&Cue::Impact));
        assert_eq!(world.explosions.len(), 1);
        assert!(world.bullets.is_empty());
        assert!(world.enemies.iter().all(|enemy| enemy.speed != 0));

        // Drawn once, then gone
        world.step(&idle(), &mut rng);
        assert!(world.explosions.is_empty());
    }

    #[test]
    fn meteor_kill_leaves_score_alone() {
        let mut world = playing_world();
        let mut meteor = Meteor::new(350, 0, 0);
        meteor.center.1 = 400;
        world.meteors.push(meteor);
        world.bullets.push(Bullet::new(350, 430));
        let mut rng = StdRng::seed_from_u64(5);

        let cues = world.step(&idle(), &mut rng);

        assert_eq!(world.score, 0);
        assert!(cues.contains(&Cue::Impact));
        assert_eq!(world.explosions.len(), 1);
        assert!(world.meteors.iter().all(|meteor| meteor.speed != 0));
    }

    #[test]
    fn escaped_enemy_counts_as_miss_but_meteor_does_not() {
        let mut world = playing_world();
        let mut enemy = Enemy::new(100, 5);
        enemy.rect.y = 498;
        world.enemies.push(enemy);
        let mut meteor = Meteor::new(600, 5, 0);
        meteor.center.1 = 518;
        world.meteors.push(meteor);
        let mut rng = StdRng::seed_from_u64(9);

        world.step(&idle(), &mut rng);

        assert_eq!(world.missed, 1);
        assert!(world.enemies.iter().all(|enemy| enemy.rect.y < 498));
        assert!(world.meteors.iter().all(|meteor| meteor.center.1 < 518));
    }

    #[test]
    fn win_takes_precedence_over_loss() {
        let mut world = playing_world();
        world.score = WIN_SCORE;
        world.missed = MAX_MISSED;
        assert_eq!(world.check_round_end(), Phase::Won);
    }

    #[test]
    fn win_when_score_reaches_threshold() {
        let mut world = playing_world();
        world.score = WIN_SCORE - 1;
        world.missed = MAX_MISSED - 1;
        assert_eq!(world.check_round_end(), Phase::Playing);
        world.score += 1;
        assert_eq!(world.check_round_end(), Phase::Won);
        assert!(world.phase.is_over());
    }

    #[test]
    fn thirtieth_kill_wins_through_the_frame_pipeline() {
        let mut world = playing_world();
        world.score = WIN_SCORE - 1;
        world.enemies.push(Enemy::new(350, 0));
        world.enemies[0].rect.y = 380;
        world.bullets.push(Bullet::new(350, 430));
        let mut rng = StdRng::seed_from_u64(5);

        let cues = world.step(&idle(), &mut rng);

        assert!(cues.contains(&Cue::Impact));
        assert_eq!(world.score, WIN_SCORE);
        assert_eq!(world.check_round_end(), Phase::Won);
        assert!(world.missed < MAX_MISSED);
        // The finished round ignores further frames
        assert!(world.step(&FrameInput { fire: true, ..idle() }, &mut rng).is_empty());
        assert_eq!(world.score, WIN_SCORE);
    }

    #[test]
    fn loss_when_misses_reach_threshold() {
        let mut world = playing_world();
        world.missed = MAX_MISSED;
        world.score = WIN_SCORE - 1;
        assert_eq!(world.check_round_end(), Phase::Lost);
    }

    #[test]
    fn finished_round_is_frozen() {
        let mut world = playing_world();
        world.phase = Phase::Lost;
        let mut rng = StdRng::seed_from_u64(2);
        let frame = world.frame;
        assert!(world.step(&FrameInput { fire: true, ..idle() }, &mut rng).is_empty());
        assert_eq!(world.frame, frame);
        assert!(world.bullets.is_empty());
    }

    #[test]
    fn unattended_round_is_eventually_lost() {
        let mut world = playing_world();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..60 * 60 * 10 {
            world.step(&idle(), &mut rng);
            if world.check_round_end().is_over() {
                break;
            }
        }
        assert_eq!(world.phase, Phase::Lost);
        assert!(world.missed >= MAX_MISSED);
        assert_eq!(world.score, 0);
    }

    #[test]
    fn invariants_hold_over_a_long_random_run() {
        let mut world = playing_world();
        let mut rng = StdRng::seed_from_u64(77);
        let muzzle_top = PLAYER_START_Y - PLAYER_SIZE.1 / 2 - BULLET_SIZE.1 / 2;
        for frame in 0..5000u64 {
            let input = FrameInput {
                move_left: frame % 300 < 150,
                move_right: frame % 200 < 120,
                fire: frame % 6 == 0,
                click: None,
            };
            let shots_in_flight = world.bullets.len() as u32 + input.fire as u32;
            let score_before = world.score;
            world.step(&input, &mut rng);

            assert!(world.player.rect.x >= 0);
            assert!(world.player.rect.right() <= PLAYFIELD_WIDTH);
            assert!(world.bullets.iter().all(|b| b.rect.bottom() >= 0 && b.rect.y <= muzzle_top - BULLET_SPEED));
            assert!(world.enemies.iter().all(|e| e.rect.top() <= PLAYFIELD_HEIGHT));
            assert!(world.meteors.iter().all(|m| m.rect().top() <= PLAYFIELD_HEIGHT));
            assert!(world.score - score_before <= shots_in_flight);
        }
        assert_eq!(world.frame, 5000);
    }
}
