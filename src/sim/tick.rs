//! Fixed-step simulation tick
//!
//! One call advances the match by exactly one frame. Ticks against an ended
//! match do nothing until the state is reset.

use serde::{Deserialize, Serialize};

use super::collision::{bounce_off_paddle, crosses_wall, exited_side, hits_paddle};
use super::state::{Ball, GameEvent, MatchPhase, Player, SimulationState};
use crate::consts::*;

/// A single held-key control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Control {
    Player1Up,
    Player1Down,
    Player2Up,
    Player2Down,
}

impl Control {
    pub const ALL: [Control; 4] = [
        Control::Player1Up,
        Control::Player1Down,
        Control::Player2Up,
        Control::Player2Down,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Control::Player1Up => "player-1-up",
            Control::Player1Down => "player-1-down",
            Control::Player2Up => "player-2-up",
            Control::Player2Down => "player-2-down",
        }
    }
}

/// Held-control snapshot read once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub player1_up: bool,
    pub player1_down: bool,
    pub player2_up: bool,
    pub player2_down: bool,
}

impl TickInput {
    pub fn set(&mut self, control: Control, held: bool) {
        match control {
            Control::Player1Up => self.player1_up = held,
            Control::Player1Down => self.player1_down = held,
            Control::Player2Up => self.player2_up = held,
            Control::Player2Down => self.player2_down = held,
        }
    }

    pub fn is_held(&self, control: Control) -> bool {
        match control {
            Control::Player1Up => self.player1_up,
            Control::Player1Down => self.player1_down,
            Control::Player2Up => self.player2_up,
            Control::Player2Down => self.player2_down,
        }
    }

    /// (up, down) for one player's paddle
    pub fn for_player(&self, player: Player) -> (bool, bool) {
        match player {
            Player::One => (self.player1_up, self.player1_down),
            Player::Two => (self.player2_up, self.player2_down),
        }
    }
}

/// Advance the match by one tick, returning what happened in order
pub fn tick(state: &mut SimulationState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if state.phase == MatchPhase::Ended {
        return events;
    }
    state.time_ticks += 1;

    state.ball.integrate();
    if !state.ball.is_finite() {
        log::warn!("Ball left finite space at tick {}, re-serving", state.time_ticks);
        state.ball = Ball::default();
    }

    // Pure reflection off top/bottom
    if crosses_wall(&state.ball) {
        state.ball.vel.y = -state.ball.vel.y;
        events.push(GameEvent::WallBounce);
    }

    let hit = [Player::One, Player::Two]
        .into_iter()
        .find(|&p| hits_paddle(&state.ball, state.paddle(p)));
    if let Some(player) = hit {
        let draw = state.draw_perturbation();
        state.ball.vel = bounce_off_paddle(state.ball.vel, draw);
        log::trace!(
            "{} paddle hit, vel now ({:.2}, {:.2})",
            player.label(),
            state.ball.vel.x,
            state.ball.vel.y
        );
        events.push(GameEvent::PaddleHit { player });
    }

    // At most one side per tick: the serve puts the ball back at the midpoint
    if let Some(player) = exited_side(&state.ball) {
        let total = state.scores.award(player);
        let y = state.draw_serve_y();
        state.ball.serve(y);
        log::debug!(
            "Point to {} ({}), score {}-{}",
            player.label(),
            total,
            state.scores.player1,
            state.scores.player2
        );
        events.push(GameEvent::PointScored {
            player,
            scores: state.scores,
        });
    }

    if let Some(winner) = state.scores.reached(WIN_SCORE) {
        state.phase = MatchPhase::Ended;
        log::info!(
            "{} wins {}-{}",
            winner.label(),
            state.scores.player1,
            state.scores.player2
        );
        events.push(GameEvent::MatchEnded { winner });
    }

    // Paddles still move on the tick that ends the match
    for player in [Player::One, Player::Two] {
        let (up, down) = input.for_player(player);
        state.paddle_mut(player).step(up, down);
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Scores;
    use glam::Vec2;
    use proptest::prelude::*;

    #[test]
    fn test_free_flight_moves_by_velocity() {
        let mut state = SimulationState::new(12345);
        let events = tick(&mut state, &TickInput::default());
        assert!(events.is_empty());
        assert_eq!(state.ball.pos, Vec2::new(404.0, 204.0));
        assert_eq!(state.ball.vel, Vec2::new(4.0, 4.0));
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_wall_reflection_keeps_vx() {
        let mut state = SimulationState::new(12345);
        state.ball.pos = Vec2::new(400.0, 388.0);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.ball.pos, Vec2::new(404.0, 392.0));
        assert_eq!(state.ball.vel, Vec2::new(4.0, -4.0));

        state.ball.pos = Vec2::new(400.0, 12.0);
        let events = tick(&mut state, &TickInput::default());
        assert_eq!(state.ball.vel, Vec2::new(4.0, 4.0));
        assert_eq!(events, vec![GameEvent::WallBounce]);
    }

    #[test]
    fn test_left_paddle_bounce() {
        let mut state = SimulationState::new(12345);
        state.ball.pos = Vec2::new(10.0, 200.0);
        state.ball.vel = Vec2::new(-4.0, 4.0);

        let events = tick(&mut state, &TickInput::default());

        assert_eq!(events, vec![GameEvent::PaddleHit { player: Player::One }]);
        assert_eq!(state.ball.vel.x, 4.0);
        assert!((2.0..=6.0).contains(&state.ball.vel.y.abs()));
    }

    #[test]
    fn test_right_paddle_bounce() {
        let mut state = SimulationState::new(12345);
        state.ball.pos = Vec2::new(778.0, 200.0);
        state.ball.vel = Vec2::new(4.0, -3.0);

        let events = tick(&mut state, &TickInput::default());

        assert_eq!(events, vec![GameEvent::PaddleHit { player: Player::Two }]);
        assert_eq!(state.ball.vel.x, -4.0);
    }

    #[test]
    fn test_score_and_serve() {
        let mut state = SimulationState::new(12345);
        state.ball.pos = Vec2::new(-15.0, 300.0);
        state.ball.vel = Vec2::new(-4.0, 4.0);
        state.scores.player2 = 3;

        let events = tick(&mut state, &TickInput::default());

        assert_eq!(state.scores.player2, 4);
        assert_eq!(state.scores.player1, 0);
        assert_eq!(state.ball.pos.x, CANVAS_WIDTH / 2.0);
        assert!((BALL_RADIUS..=CANVAS_HEIGHT - BALL_RADIUS).contains(&state.ball.pos.y));
        assert_eq!(state.ball.vel, Vec2::new(4.0, 4.0));
        assert_eq!(
            events,
            vec![GameEvent::PointScored {
                player: Player::Two,
                scores: Scores {
                    player1: 0,
                    player2: 4
                },
            }]
        );
    }

    #[test]
    fn test_match_ends_and_freezes() {
        let mut state = SimulationState::new(12345);
        state.ball.pos = Vec2::new(812.0, 100.0);
        state.scores.player1 = 14;

        let events = tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, MatchPhase::Ended);
        assert_eq!(state.winner(), Some(Player::One));
        assert_eq!(
            events.last(),
            Some(&GameEvent::MatchEnded {
                winner: Player::One
            })
        );

        let frozen = state.scene();
        let held = TickInput {
            player1_up: true,
            player2_down: true,
            ..Default::default()
        };
        for _ in 0..10 {
            assert!(tick(&mut state, &held).is_empty());
        }
        assert_eq!(state.scene(), frozen);
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_non_finite_ball_is_reserved() {
        let mut state = SimulationState::new(12345);
        state.ball.vel = Vec2::new(f32::NAN, 4.0);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.ball, Ball::default());
    }

    #[test]
    fn test_paddle_movement() {
        let mut state = SimulationState::new(12345);
        let input = TickInput {
            player1_up: true,
            player2_down: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.left_paddle.y, 155.0);
        assert_eq!(state.right_paddle.y, 165.0);
    }

    #[test]
    fn test_paddles_stop_at_edges() {
        let mut state = SimulationState::new(12345);
        let input = TickInput {
            player1_up: true,
            player2_down: true,
            ..Default::default()
        };
        for _ in 0..100 {
            tick(&mut state, &input);
        }
        assert_eq!(state.left_paddle.y, 0.0);
        assert_eq!(state.right_paddle.y, 320.0);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = SimulationState::new(99999);
        let mut state2 = SimulationState::new(99999);

        let inputs = [
            TickInput {
                player1_up: true,
                ..Default::default()
            },
            TickInput {
                player2_down: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for i in 0..5000 {
            let input = &inputs[i % inputs.len()];
            assert_eq!(tick(&mut state1, input), tick(&mut state2, input));
        }
        assert_eq!(state1.scene(), state2.scene());
    }

    #[test]
    fn test_control_roundtrip_through_input() {
        let mut input = TickInput::default();
        for control in Control::ALL {
            input.set(control, true);
            assert!(input.is_held(control));
            input.set(control, false);
            assert!(!input.is_held(control));
        }
    }

    fn any_input() -> impl Strategy<Value = TickInput> {
        (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
            |(player1_up, player1_down, player2_up, player2_down)| TickInput {
                player1_up,
                player1_down,
                player2_up,
                player2_down,
            },
        )
    }

    proptest! {
        #[test]
        fn prop_invariants_hold_for_any_inputs(
            seed in any::<u64>(),
            inputs in proptest::collection::vec(any_input(), 1..400),
        ) {
            let mut state = SimulationState::new(seed);
            for input in &inputs {
                let before = state.scores;
                let events = tick(&mut state, input);

                for paddle in [&state.left_paddle, &state.right_paddle] {
                    prop_assert!(paddle.y >= 0.0 && paddle.y <= CANVAS_HEIGHT - PADDLE_HEIGHT);
                }
                let gained = (state.scores.player1 - before.player1)
                    + (state.scores.player2 - before.player2);
                prop_assert!(gained <= 1);
                if events.iter().any(|e| matches!(e, GameEvent::PaddleHit { .. })) {
                    prop_assert!(state.ball.vel.y.abs() >= BALL_MIN_VY);
                    prop_assert!(state.ball.vel.y.abs() <= BALL_MAX_VY);
                }
                prop_assert!(state.ball.vel.x != 0.0);
            }
        }
    }
}
