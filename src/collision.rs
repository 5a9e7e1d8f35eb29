use crate::entities::{Bullet, Enemy, Meteor};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    Enemy,
    Meteor,
}

/// A bullet and its target destroyed together this frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Impact {
    pub target: Target,
    pub center: (i32, i32),
}

/// Bullet-vs-target pass. Each bullet hits at most one target: the first
/// overlapping enemy, or failing that the first overlapping meteor.
pub fn resolve(bullets: &mut Vec<Bullet>, enemies: &mut Vec<Enemy>, meteors: &mut Vec<Meteor>) -> Vec<Impact> {
    let mut impacts = Vec::new();

    bullets.retain(|bullet| {
        if let Some(index) = enemies.iter().position(|enemy| bullet.rect.collides(&enemy.rect)) {
            let enemy = enemies.remove(index);
            impacts.push(Impact { target: Target::Enemy, center: enemy.rect.center() });
            return false;
        }
        if let Some(index) = meteors.iter().position(|meteor| bullet.rect.collides(&meteor.rect())) {
            let meteor = meteors.remove(index);
            impacts.push(Impact { target: Target::Meteor, center: meteor.center });
            return false;
        }
        true
    });

    impacts
}
