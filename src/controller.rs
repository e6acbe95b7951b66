//! Match controller
//!
//! Owns the single [`SimulationState`] of a match and is the only entry point
//! an external frame scheduler needs: call [`MatchController::tick`] once per
//! frame until it reports [`MatchPhase::Ended`], then [`MatchController::reset`].
//! Presentation code learns about points and the winner by subscribing to
//! [`GameEvent`]s instead of being poked by the simulation.

use std::fmt;

use crate::sim::{GameEvent, MatchPhase, Player, Scene, SimulationState, TickInput, tick};

type Listener = Box<dyn FnMut(&GameEvent)>;

pub struct MatchController {
    state: SimulationState,
    listeners: Vec<Listener>,
}

impl fmt::Debug for MatchController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatchController")
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl MatchController {
    pub fn new(seed: u64) -> Self {
        log::info!("New match with seed: {}", seed);
        Self {
            state: SimulationState::new(seed),
            listeners: Vec::new(),
        }
    }

    /// Register a callback for every event the simulation emits
    pub fn subscribe(&mut self, listener: impl FnMut(&GameEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Advance one frame and dispatch its events. Returns the phase afterwards
    /// so the driver knows when to stop scheduling frames.
    pub fn tick(&mut self, input: &TickInput) -> MatchPhase {
        let events = tick(&mut self.state, input);
        for event in &events {
            for listener in &mut self.listeners {
                listener(event);
            }
        }
        self.state.phase
    }

    /// Start the match over. Subscribers are kept.
    pub fn reset(&mut self) {
        self.state.reset();
        log::info!("Match reset");
    }

    pub fn reset_with_seed(&mut self, seed: u64) {
        self.state.reset_with_seed(seed);
        log::info!("Match reset with seed: {}", seed);
    }

    /// Which player reached the win threshold; `None` while the match is active
    pub fn winner(&self) -> Option<Player> {
        self.state.winner()
    }

    pub fn phase(&self) -> MatchPhase {
        self.state.phase
    }

    pub fn scene(&self) -> Scene {
        self.state.scene()
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Direct access for scripted setups (tests, replays)
    pub fn state_mut(&mut self) -> &mut SimulationState {
        &mut self.state
    }
}

/// Headless driver: tick synchronously until the match ends or `max_ticks`
/// frames have run. `input_for` sees the scene before each tick.
pub fn run_until_ended(
    controller: &mut MatchController,
    mut input_for: impl FnMut(&Scene) -> TickInput,
    max_ticks: u64,
) -> Option<Player> {
    for _ in 0..max_ticks {
        let input = input_for(&controller.scene());
        if controller.tick(&input) == MatchPhase::Ended {
            break;
        }
    }
    controller.winner()
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn controller_about_to_end(winner: Player) -> MatchController {
        let mut controller = MatchController::new(5);
        let state = controller.state_mut();
        match winner {
            Player::One => {
                state.scores.player1 = 14;
                state.ball.pos = Vec2::new(812.0, 100.0);
            }
            Player::Two => {
                state.scores.player2 = 14;
                state.ball.pos = Vec2::new(-12.0, 100.0);
                state.ball.vel = Vec2::new(-4.0, 4.0);
            }
        }
        controller
    }

    #[test]
    fn test_events_reach_subscribers() {
        let mut controller = controller_about_to_end(Player::Two);
        let seen = Rc::new(RefCell::new(Vec::new()));
        {
            let seen = seen.clone();
            controller.subscribe(move |event| seen.borrow_mut().push(*event));
        }

        assert_eq!(controller.tick(&TickInput::default()), MatchPhase::Ended);
        controller.tick(&TickInput::default());

        let seen = seen.borrow();
        let ended: Vec<_> = seen
            .iter()
            .filter(|e| matches!(e, GameEvent::MatchEnded { .. }))
            .collect();
        assert_eq!(
            ended,
            vec![&GameEvent::MatchEnded {
                winner: Player::Two
            }]
        );
        assert_eq!(controller.winner(), Some(Player::Two));
    }

    #[test]
    fn test_reset_reactivates() {
        let mut controller = controller_about_to_end(Player::One);
        controller.tick(&TickInput::default());
        assert_eq!(controller.phase(), MatchPhase::Ended);

        controller.reset();

        assert_eq!(controller.phase(), MatchPhase::Active);
        assert_eq!(controller.winner(), None);
        let scene = controller.scene();
        assert_eq!(scene.scores.player1, 0);
        assert_eq!(scene.ball.pos, Vec2::new(400.0, 200.0));
        assert_eq!(controller.tick(&TickInput::default()), MatchPhase::Active);
    }

    #[test]
    fn test_reset_with_seed_replays_fresh_match() {
        let input = TickInput {
            player1_up: true,
            ..Default::default()
        };
        let mut controller = MatchController::new(1);
        for _ in 0..3000 {
            controller.tick(&input);
        }

        controller.reset_with_seed(9);
        let mut fresh = MatchController::new(9);
        assert_eq!(controller.scene(), fresh.scene());
        assert_eq!(controller.state().seed, 9);

        for _ in 0..3000 {
            assert_eq!(controller.tick(&input), fresh.tick(&input));
            assert_eq!(controller.scene(), fresh.scene());
        }
        assert_eq!(controller.state().time_ticks, fresh.state().time_ticks);
    }

    #[test]
    fn test_run_until_ended_stops_at_winner() {
        let mut controller = controller_about_to_end(Player::One);
        let mut frames = 0;
        let winner = run_until_ended(
            &mut controller,
            |_| {
                frames += 1;
                TickInput::default()
            },
            1000,
        );
        assert_eq!(winner, Some(Player::One));
        assert_eq!(frames, 1);
    }

    #[test]
    fn test_run_until_ended_respects_budget() {
        let mut controller = MatchController::new(5);
        let winner = run_until_ended(&mut controller, |_| TickInput::default(), 10);
        assert_eq!(winner, None);
        assert_eq!(controller.state().time_ticks, 10);
    }
}
