use std::time::Duration;

use rand::rngs::ThreadRng;
use rand::Rng;

use crate::food::Food;
use crate::grid;
use crate::snake::{Direction, Snake};
use crate::Cell;

const INITIAL_SPEED: Duration = Duration::from_millis(200);
const FOOD_SCORE: u32 = 5;
const SCORE_BONUS_INTERVAL: Duration = Duration::from_secs(5);

// One-way difficulty ramp: after this long in a run, the tick interval drops
const RAMP_STEPS: [(Duration, Duration); 2] = [
    (Duration::from_secs(50), Duration::from_millis(150)),
    (Duration::from_secs(100), Duration::from_millis(100)),
];

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Phase {
    Idle,
    Running,
    Over,
}

/// What happened during one frame, for the frontend to react to.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum GameEvent {
    Moved,
    AteFood,
    ScoreBonus,
    Crashed,
}

pub struct Game<R = ThreadRng> {
    rng: R,
    snake: Snake,
    food: Food,
    phase: Phase,
    score: u32,
    speed: Duration,
    last_tick: Duration,
    run_started: Duration,
    score_anchor: Duration,
}

impl Game<ThreadRng> {
    pub fn new() -> Self {
        Game::with_rng(rand::thread_rng())
    }
}

impl<R: Rng> Game<R> {
    pub fn with_rng(mut rng: R) -> Game<R> {
        let snake = Snake::new();
        let food = Food::spawn(&mut rng, snake.occupied());

        Game {
            rng,
            snake,
            food,
            phase: Phase::Idle,
            score: 0,
            speed: INITIAL_SPEED,
            last_tick: Duration::from_secs(0),
            run_started: Duration::from_secs(0),
            score_anchor: Duration::from_secs(0),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food_position(&self) -> Cell {
        self.food.position()
    }

    /// Applies a directional input: starts a run from `Idle`, steers while
    /// `Running`, and is ignored once the game is over. An exact 180° turn is
    /// dropped without any other effect, so a reversed key never even starts
    /// the game.
    pub fn steer(&mut self, direction: Direction, now: Duration) {
        if self.phase == Phase::Over || direction.is_reverse_of(self.snake.direction()) {
            return;
        }

        if self.phase == Phase::Idle {
            self.phase = Phase::Running;
            self.run_started = now;
            self.score_anchor = now;
        }

        self.snake.set_direction(direction);
    }

    /// Advances the game clock by one frame. `now` is time since process
    /// start, handed in by the driver so tests can feed times directly.
    pub fn frame(&mut self, now: Duration) -> Vec<GameEvent> {
        let mut events = vec![];

        if self.phase == Phase::Running {
            self.ramp_difficulty(now);

            if now - self.score_anchor >= SCORE_BONUS_INTERVAL {
                self.score_anchor = now;
                self.score += 1;
                events.push(GameEvent::ScoreBonus);
            }
        }

        // The tick timer free-runs even while idle, so the first tick after
        // starting doesn't fire instantly
        if now - self.last_tick >= self.speed {
            self.last_tick = now;
            if self.phase == Phase::Running {
                self.tick(&mut events);
            }
        }

        events
    }

    pub fn restart(&mut self) {
        self.snake = Snake::new();
        self.food = Food::spawn(&mut self.rng, self.snake.occupied());
        self.phase = Phase::Idle;
        self.score = 0;
        self.speed = INITIAL_SPEED;
    }

    ///////////////////////////////////////////////////////////////////////////

    fn tick(&mut self, events: &mut Vec<GameEvent>) {
        self.snake.advance();
        events.push(GameEvent::Moved);

        if self.snake.head() == self.food.position() {
            self.food.respawn(&mut self.rng, self.snake.occupied());
            self.score += FOOD_SCORE;
            events.push(GameEvent::AteFood);
        } else {
            self.snake.shrink();
        }

        if !grid::in_bounds(self.snake.head()) || self.snake.self_collision() {
            self.phase = Phase::Over;
            events.push(GameEvent::Crashed);
        }
    }

    fn ramp_difficulty(&mut self, now: Duration) {
        let elapsed = now - self.run_started;

        for &(threshold, speed) in RAMP_STEPS.iter() {
            if elapsed >= threshold && self.speed > speed {
                self.speed = speed;
            }
        }
    }

    #[cfg(test)]
    fn speed(&self) -> Duration {
        self.speed
    }

    #[cfg(test)]
    fn place_food(&mut self, cell: Cell) {
        self.food.place(cell);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Cell;
    use crate::snake::Direction::*;
    use rand::rngs::mock::StepRng;

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    fn millis(ms: u64) -> Duration {
        Duration::from_millis(ms)
    }

    fn started_game() -> Game<StepRng> {
        let mut game = Game::with_rng(StepRng::new(7, 0x9e37_79b9_7f4a_7c15));
        game.steer(Right, millis(0));
        game
    }

    fn body(game: &Game<StepRng>) -> Vec<Cell> {
        game.snake().cells().collect()
    }

    #[test]
    fn waits_idle_until_the_first_directional_input() {
        let mut game = Game::with_rng(StepRng::new(1, 1));
        assert_eq!(game.phase(), Phase::Idle);

        let before = body(&game);
        game.frame(millis(500));
        assert_eq!(body(&game), before);

        game.steer(Up, millis(500));
        assert_eq!(game.phase(), Phase::Running);
    }

    #[test]
    fn one_tick_moves_the_body_one_cell() {
        let mut game = started_game();
        game.place_food((0, 0));

        let events = game.frame(millis(200));
        assert!(events.contains(&GameEvent::Moved));
        assert_eq!(body(&game), vec![(8, 9), (7, 9), (6, 9)]);
    }

    #[test]
    fn ticks_are_gated_by_the_speed_interval() {
        let mut game = started_game();
        game.place_food((0, 0));

        assert!(game.frame(millis(100)).is_empty());
        assert!(!game.frame(millis(200)).is_empty());
        assert!(game.frame(millis(300)).is_empty());
        assert!(!game.frame(millis(400)).is_empty());

        assert_eq!(body(&game), vec![(9, 9), (8, 9), (7, 9)]);
    }

    #[test]
    fn eating_grows_the_snake_and_scores_five() {
        let mut game = started_game();
        game.place_food((8, 9));

        let events = game.frame(millis(200));
        assert!(events.contains(&GameEvent::AteFood));
        assert_eq!(game.score(), 5);
        assert_eq!(body(&game), vec![(8, 9), (7, 9), (6, 9), (5, 9)]);

        // The respawned food never sits on the body
        assert!(!game.snake().occupied().contains(&game.food_position()));
    }

    #[test]
    fn reverse_direction_input_is_ignored() {
        let mut game = started_game();
        game.place_food((0, 0));

        game.steer(Left, millis(50));
        assert_eq!(game.snake().direction(), Right);

        game.frame(millis(200));
        assert_eq!(game.snake().head(), (8, 9));
    }

    #[test]
    fn reversed_key_does_not_start_an_idle_game() {
        let mut game = Game::with_rng(StepRng::new(1, 1));
        game.steer(Left, millis(0));
        assert_eq!(game.phase(), Phase::Idle);
    }

    #[test]
    fn crashes_into_the_right_wall() {
        let mut game = started_game();
        game.place_food((0, 0));

        // Head starts at x=7; the wall is hit when x reaches 25
        let mut now = millis(0);
        for _ in 0..17 {
            now += millis(200);
            game.frame(now);
        }
        assert_eq!(game.snake().head(), (24, 9));
        assert_eq!(game.phase(), Phase::Running);

        now += millis(200);
        let events = game.frame(now);
        assert!(events.contains(&GameEvent::Crashed));
        assert_eq!(game.phase(), Phase::Over);

        // No further tick-driven movement until restart
        let frozen = body(&game);
        game.frame(now + secs(10));
        assert_eq!(body(&game), frozen);
    }

    #[test]
    fn crashes_into_its_own_body() {
        let mut game = started_game();

        // Eat twice to reach length 5, then turn back into the body
        game.place_food((8, 9));
        game.frame(millis(200));
        game.place_food((9, 9));
        game.frame(millis(400));
        game.place_food((0, 0));
        assert_eq!(game.snake().len(), 5);

        game.steer(Down, millis(450));
        game.frame(millis(600));
        game.steer(Left, millis(650));
        game.frame(millis(800));
        game.steer(Up, millis(850));
        let events = game.frame(millis(1000));

        assert!(events.contains(&GameEvent::Crashed));
        assert_eq!(game.phase(), Phase::Over);
    }

    #[test]
    fn speed_ramps_down_at_fifty_and_a_hundred_seconds() {
        let mut game = started_game();
        game.place_food((0, 0));
        assert_eq!(game.speed(), millis(200));

        game.frame(secs(49));
        assert_eq!(game.speed(), millis(200));

        game.steer(Down, secs(49)); // steer away from the wall, stay alive
        game.frame(secs(50));
        assert_eq!(game.speed(), millis(150));

        game.steer(Left, secs(50));
        game.frame(secs(75));
        assert_eq!(game.speed(), millis(150));

        game.steer(Up, secs(75));
        game.frame(secs(100));
        assert_eq!(game.speed(), millis(100));

        // Never speeds back up before a restart
        game.frame(secs(101));
        assert_eq!(game.speed(), millis(100));
    }

    #[test]
    fn running_time_earns_a_point_every_five_seconds() {
        let mut game = started_game();
        game.place_food((8, 9));

        game.frame(millis(200));
        assert_eq!(game.score(), 5);

        game.place_food((0, 0));
        game.steer(Down, millis(300));
        let events = game.frame(secs(5));
        assert!(events.contains(&GameEvent::ScoreBonus));
        assert_eq!(game.score(), 6);

        // Anchor moved: the next bonus is five seconds later again
        game.steer(Right, secs(5));
        game.frame(secs(9));
        assert_eq!(game.score(), 6);
    }

    #[test]
    fn restart_resets_everything_to_initial_state() {
        let mut game = started_game();
        game.place_food((0, 0));

        // Ramp the speed, score some points, then crash into the left wall
        game.frame(secs(50));
        game.steer(Down, secs(50));
        game.frame(secs(55));
        game.steer(Left, secs(55));
        let mut now = secs(55);
        while game.phase() == Phase::Running {
            now += millis(150);
            game.frame(now);
        }
        assert_eq!(game.phase(), Phase::Over);
        assert!(game.score() > 0);

        game.restart();
        assert_eq!(game.phase(), Phase::Idle);
        assert_eq!(game.score(), 0);
        assert_eq!(game.speed(), millis(200));
        assert_eq!(body(&game), vec![(7, 9), (6, 9), (5, 9)]);
        assert_eq!(game.snake().direction(), Right);
        assert!(!game.snake().occupied().contains(&game.food_position()));
    }
}
