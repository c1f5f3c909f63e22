//! Movement Integrator
//!
//! Steps a player one tick toward its current target. Explicit Euler at the
//! fixed tick interval; no collision, no deceleration, no arrival state and
//! no clamping to map bounds.

use crate::core::vec2::Vec2;
use crate::game::config::MovementConfig;
use crate::game::player::PlayerState;

/// Speed for a given skill (units/s).
#[inline]
pub fn speed_for(skill: f64, config: &MovementConfig) -> f64 {
    config.base_speed + skill * config.skill_speed
}

/// Advance `player` one tick toward `target`.
///
/// Sets velocity to full speed along the direction to the target, moves by
/// `velocity / tick_rate` and turns yaw to face the direction of travel.
/// A player already on its target moves along the configured fallback
/// direction. Dead players are left untouched.
pub fn advance(player: &mut PlayerState, target: Vec2, config: &MovementConfig, tick_rate: u32) {
    if !player.alive {
        return;
    }

    let fallback = Vec2::new(config.fallback_direction.0, config.fallback_direction.1);
    let direction = (target - player.position).normalize_or(fallback);
    let speed = speed_for(player.attributes.skill, config);

    player.velocity = direction.scale(speed);
    player.position = player.position + player.velocity.scale(1.0 / tick_rate as f64);
    player.yaw = direction.heading_degrees();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::player::{PlayerAttributes, Team};

    fn test_player(position: Vec2, skill: f64) -> PlayerState {
        PlayerState {
            id: "A1".to_string(),
            team: Team::A,
            agent: "Jett".to_string(),
            weapon: "Vandal".to_string(),
            attributes: PlayerAttributes { skill, aim: 0.5, reaction: 0.5 },
            alive: true,
            health: 100,
            armor: 50,
            position,
            velocity: Vec2::ZERO,
            yaw: 45.0,
            pitch: 0.0,
        }
    }

    #[test]
    fn test_speed_scales_with_skill() {
        let config = MovementConfig::default();
        assert_eq!(speed_for(0.0, &config), 220.0);
        assert_eq!(speed_for(1.0, &config), 300.0);
        assert_eq!(speed_for(0.5, &config), 260.0);
    }

    #[test]
    fn test_advance_moves_toward_target() {
        let config = MovementConfig::default();
        let mut player = test_player(Vec2::new(100.0, 100.0), 0.5);

        advance(&mut player, Vec2::new(100.0, 900.0), &config, 16);

        // 260 units/s straight up, 1/16 s step
        assert_eq!(player.velocity, Vec2::new(0.0, 260.0));
        assert_eq!(player.position, Vec2::new(100.0, 116.25));
        assert!((player.yaw - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_advance_overshoots_without_arrival_state() {
        let config = MovementConfig::default();
        let mut player = test_player(Vec2::new(0.0, 0.0), 0.0);

        // 220 / 16 = 13.75 per step, target is 5 away
        advance(&mut player, Vec2::new(5.0, 0.0), &config, 16);
        assert_eq!(player.position, Vec2::new(13.75, 0.0));

        // Next step heads back
        advance(&mut player, Vec2::new(5.0, 0.0), &config, 16);
        assert_eq!(player.position, Vec2::new(0.0, 0.0));
        assert!((player.yaw - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_distance_uses_fallback() {
        let config = MovementConfig::default();
        let mut player = test_player(Vec2::new(50.0, 50.0), 0.0);

        advance(&mut player, Vec2::new(50.0, 50.0), &config, 16);

        assert_eq!(player.velocity, Vec2::new(220.0, 0.0));
        assert_eq!(player.position, Vec2::new(63.75, 50.0));
        assert_eq!(player.yaw, 0.0);
        assert!(player.position.x.is_finite() && player.position.y.is_finite());
    }

    #[test]
    fn test_dead_player_frozen() {
        let config = MovementConfig::default();
        let mut player = test_player(Vec2::new(10.0, 10.0), 0.5);
        player.alive = false;
        let before = player.clone();

        advance(&mut player, Vec2::new(500.0, 500.0), &config, 16);

        assert_eq!(player, before);
    }

    #[test]
    fn test_pitch_untouched() {
        let config = MovementConfig::default();
        let mut player = test_player(Vec2::ZERO, 0.5);
        player.pitch = -7.5;
        advance(&mut player, Vec2::new(10.0, 10.0), &config, 16);
        assert_eq!(player.pitch, -7.5);
    }
}
