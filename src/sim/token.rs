//! The falling token.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{GRAVITY, TOKEN_FRICTION, TOKEN_MAX_SPEED, TOKEN_RADIUS, TOKEN_RESTITUTION};

/// One token in flight between an entry and an exit.
///
/// Owned exclusively by the drop simulator while in flight; consumed when it
/// reaches the exit sensors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Fraction of normal velocity kept on a bounce
    pub restitution: f32,
    /// Fraction of tangential velocity lost on a bounce
    pub friction: f32,
}

impl Token {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            radius: TOKEN_RADIUS,
            restitution: TOKEN_RESTITUTION,
            friction: TOKEN_FRICTION,
        }
    }

    /// Apply gravity and advance the position by one timestep.
    ///
    /// Speed is capped at [`TOKEN_MAX_SPEED`] so one step can never carry
    /// the token past a peg or through the sensor band.
    pub fn integrate(&mut self, dt: f32) {
        self.vel.y += GRAVITY * dt;
        let speed = self.vel.length();
        if speed > TOKEN_MAX_SPEED {
            self.vel *= TOKEN_MAX_SPEED / speed;
        }
        self.pos += self.vel * dt;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integrate_applies_gravity() {
        let mut token = Token::new(Vec2::new(100.0, 50.0), Vec2::ZERO);
        token.integrate(0.1);
        assert!(token.vel.y > 0.0);
        assert!(token.pos.y > 50.0);
        assert_eq!(token.pos.x, 100.0);
    }

    #[test]
    fn test_integrate_caps_speed() {
        let mut token = Token::new(Vec2::ZERO, Vec2::new(0.0, 10_000.0));
        token.integrate(0.01);
        assert!(token.vel.length() <= TOKEN_MAX_SPEED + 0.001);
    }
}
