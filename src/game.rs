use std::time::Duration;

use crate::difficulty::Difficulty;
use crate::snake::{Direction::*, Snake};
use crate::{Coords, TermInt};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::Rng;

const INITIAL_SNAKE_LENGTH: usize = 3;
const POINTS_PER_SPEED_UP: u32 = 5;
const SPEED_UP_STEP: Duration = Duration::from_millis(5);
const MIN_TICK_INTERVAL: Duration = Duration::from_millis(30);

/// What the main loop should do after a key press was mapped.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum KeyOutcome {
    Handled,
    Quit,
    Restart,
}

/// Whole game state for one session. Replaced wholesale on restart rather
/// than reset field by field.
pub struct Game {
    snake: Snake,
    food: Coords,
    width: TermInt,
    height: TermInt,
    score: u32,
    tier: Difficulty,
    tick_interval: Duration,
    active: bool,
    paused: bool,
    game_over: bool,
}

impl Game {
    /// Grid cells run from (0, 0) to (width-1, height-1); the outermost ring
    /// is the wall, everything inside is playable.
    pub fn new(width: TermInt, height: TermInt, tier: Difficulty) -> Self {
        let center = (width / 2, height / 2);
        let snake = Snake::new(center, INITIAL_SNAKE_LENGTH, Right);

        let mut game = Game {
            snake,
            food: (0, 0),
            width,
            height,
            score: 0,
            tier,
            tick_interval: tier.tick_interval(),
            active: true,
            paused: false,
            game_over: false,
        };

        // A fresh snake never fills the interior, so this always succeeds
        game.food = game.place_food().unwrap();
        game
    }

    /// Advances the snake by one cell. No-op while paused or after the game
    /// has ended; on a wall or body hit the game ends with the snake left
    /// exactly as it was.
    pub fn advance(&mut self) {
        if self.paused || !self.active {
            return;
        }

        let new_head = self.snake.next_head();
        if self.hits_wall(new_head) || self.snake.contains(new_head) {
            self.end_game();
            return;
        }

        let ate = new_head == self.food;
        self.snake.advance_to(new_head, ate);

        if ate {
            self.score += 1;
            if self.score % POINTS_PER_SPEED_UP == 0 {
                self.speed_up();
            }
            match self.place_food() {
                Some(food) => self.food = food,
                // Board is full, nowhere left to go
                None => self.end_game(),
            }
        }
    }

    /// Maps a key press onto the current state. Direction reversals are
    /// silently ignored; on the game-over screen only the confirm and quit
    /// keys do anything.
    pub fn apply_key(&mut self, key: &KeyEvent) -> KeyOutcome {
        if is_ctrl_c(key) {
            return KeyOutcome::Quit;
        }

        if self.game_over {
            return match key.code {
                KeyCode::Enter => KeyOutcome::Restart,
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyOutcome::Quit,
                _ => KeyOutcome::Handled,
            };
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => self.snake.set_direction(Up),
            KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
                self.snake.set_direction(Down)
            }
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
                self.snake.set_direction(Left)
            }
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
                self.snake.set_direction(Right)
            }
            KeyCode::Char('p') | KeyCode::Char('P') => {
                self.paused = !self.paused;
                log::debug!("paused: {}", self.paused);
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return KeyOutcome::Quit,
            _ => {}
        }

        KeyOutcome::Handled
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Coords {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn tier(&self) -> Difficulty {
        self.tier
    }

    pub fn width(&self) -> TermInt {
        self.width
    }

    pub fn height(&self) -> TermInt {
        self.height
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    ///////////////////////////////////////////////////////////////////////////

    fn hits_wall(&self, (x, y): Coords) -> bool {
        x == 0 || y == 0 || x >= self.width - 1 || y >= self.height - 1
    }

    fn end_game(&mut self) {
        self.active = false;
        self.game_over = true;
        log::info!("game over, final score {}", self.score);
    }

    fn speed_up(&mut self) {
        let faster = self.tick_interval.saturating_sub(SPEED_UP_STEP);
        self.tick_interval = faster.max(MIN_TICK_INTERVAL);
        log::info!(
            "score {}, tick interval now {:?}",
            self.score,
            self.tick_interval
        );
    }

    /// Picks a uniformly random free interior cell, or None if the snake has
    /// filled the whole interior.
    fn place_food(&self) -> Option<Coords> {
        let interior = (self.width as usize - 2) * (self.height as usize - 2);
        if self.snake.len() >= interior {
            return None;
        }

        let mut rng = rand::thread_rng();
        loop {
            let pos = (
                rng.gen_range(1..=self.width - 2),
                rng.gen_range(1..=self.height - 2),
            );
            if !self.snake.contains(pos) {
                return Some(pos);
            }
        }
    }
}

pub fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snake::Direction;
    use std::collections::HashSet;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn game_with_snake(head: Coords, dir: Direction) -> Game {
        let mut game = Game::new(20, 20, Difficulty::Medium);
        game.snake = Snake::new(head, 3, dir);
        if game.snake.contains(game.food) {
            game.food = (1, 1);
        }
        game
    }

    fn body_of(game: &Game) -> Vec<Coords> {
        game.snake.body().copied().collect()
    }

    #[test]
    fn direction_keys_change_direction() {
        let cases = [
            (KeyCode::Up, Up),
            (KeyCode::Char('w'), Up),
            (KeyCode::Left, Left),
            (KeyCode::Char('a'), Left),
            (KeyCode::Char('s'), Down),
            (KeyCode::Char('d'), Right),
        ];

        for &(code, expected) in &cases {
            // Start facing a direction that is never the opposite of the request
            let start = match expected {
                Up | Down => Right,
                Left | Right => Up,
            };
            let mut game = game_with_snake((10, 10), start);
            assert_eq!(game.apply_key(&key(code)), KeyOutcome::Handled);
            assert_eq!(game.snake.direction(), expected);
        }
    }

    #[test]
    fn opposite_direction_is_ignored() {
        let mut game = game_with_snake((10, 10), Right);
        game.apply_key(&key(KeyCode::Left));
        assert_eq!(game.snake.direction(), Right);

        let mut game = game_with_snake((10, 10), Up);
        game.apply_key(&key(KeyCode::Char('s')));
        assert_eq!(game.snake.direction(), Up);
    }

    #[test]
    fn pause_toggles_and_freezes_updates() {
        let mut game = game_with_snake((10, 10), Right);
        game.apply_key(&key(KeyCode::Char('p')));
        assert!(game.is_paused());

        let before = body_of(&game);
        game.advance();
        assert_eq!(body_of(&game), before);

        game.apply_key(&key(KeyCode::Char('p')));
        assert!(!game.is_paused());
        game.advance();
        assert_eq!(game.snake.head(), (11, 10));
    }

    #[test]
    fn quit_keys_signal_quit() {
        for code in [KeyCode::Char('q'), KeyCode::Esc] {
            let mut game = game_with_snake((10, 10), Right);
            assert_eq!(game.apply_key(&key(code)), KeyOutcome::Quit);
        }

        let mut game = game_with_snake((10, 10), Right);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(game.apply_key(&ctrl_c), KeyOutcome::Quit);
    }

    #[test]
    fn eating_grows_scores_and_respawns_food() {
        // Grid 20x20, snake (10,10)(9,10)(8,10) facing right, food at (11,10)
        let mut game = game_with_snake((10, 10), Right);
        game.food = (11, 10);

        game.advance();

        assert_eq!(game.snake.head(), (11, 10));
        assert_eq!(game.score(), 1);
        assert_eq!(game.snake.len(), 4);
        assert_eq!(game.snake.direction(), Right);
        assert_ne!(game.food(), (11, 10));
        assert!(!game.snake.contains(game.food()));
    }

    #[test]
    fn non_eating_step_keeps_length_and_score() {
        let mut game = game_with_snake((10, 10), Right);
        game.food = (1, 1);

        game.advance();

        assert_eq!(game.score(), 0);
        assert_eq!(game.snake.len(), 3);
        assert_eq!(game.snake.head(), (11, 10));
    }

    #[test]
    fn advance_never_duplicates_body_cells() {
        let mut game = game_with_snake((10, 10), Right);
        game.food = (11, 10);

        for _ in 0..50 {
            game.advance();
            if game.is_game_over() {
                break;
            }
            let body = body_of(&game);
            let unique: HashSet<Coords> = body.iter().copied().collect();
            assert_eq!(unique.len(), body.len());
            // Keep the snake circling so longer bodies get exercised
            let next = game.snake.next_head();
            if game.hits_wall(next) || game.snake.contains(next) {
                let dir = game.snake.direction();
                game.snake.set_direction(match dir {
                    Right => Down,
                    Down => Left,
                    Left => Up,
                    Up => Right,
                });
            }
        }
    }

    #[test]
    fn wall_hit_ends_game_without_moving() {
        let mut game = game_with_snake((1, 5), Left);
        let before = body_of(&game);

        game.advance();

        assert!(game.is_game_over());
        assert!(!game.active);
        assert_eq!(body_of(&game), before);
    }

    #[test]
    fn self_collision_ends_game() {
        let mut game = game_with_snake((10, 10), Right);
        // Grow to length 4, then U-turn back into the body
        game.food = (10, 11);
        game.apply_key(&key(KeyCode::Char('s')));
        game.advance(); // eats at (10,11)
        assert_eq!(game.snake.len(), 4);
        game.food = (1, 1);

        game.apply_key(&key(KeyCode::Char('a')));
        game.advance(); // head at (9,11)

        let before = body_of(&game);
        game.apply_key(&key(KeyCode::Char('w')));
        game.advance(); // (9,10) is still occupied by the tail

        assert!(game.is_game_over());
        assert_eq!(body_of(&game), before);
    }

    #[test]
    fn every_fifth_point_speeds_up() {
        let mut game = game_with_snake((10, 10), Right);
        game.score = 4;
        game.food = (11, 10);

        game.advance();

        assert_eq!(game.score(), 5);
        assert_eq!(game.tick_interval(), Duration::from_millis(95));
    }

    #[test]
    fn speed_up_clamps_at_the_floor() {
        let mut game = game_with_snake((10, 10), Right);
        game.tick_interval = Duration::from_millis(32);
        game.score = 4;
        game.food = (11, 10);

        game.advance();

        assert_eq!(game.tick_interval(), Duration::from_millis(30));

        // Already at the floor: stays there
        game.score = 9;
        game.food = game.snake.next_head();
        game.advance();
        assert_eq!(game.tick_interval(), Duration::from_millis(30));
    }

    #[test]
    fn game_over_only_accepts_confirm_or_quit() {
        let mut game = game_with_snake((1, 5), Left);
        game.advance();
        assert!(game.is_game_over());

        let before = body_of(&game);
        for code in [
            KeyCode::Up,
            KeyCode::Char('w'),
            KeyCode::Char('p'),
            KeyCode::Char('x'),
        ] {
            assert_eq!(game.apply_key(&key(code)), KeyOutcome::Handled);
        }
        assert_eq!(body_of(&game), before);
        assert!(!game.is_paused());

        assert_eq!(game.apply_key(&key(KeyCode::Enter)), KeyOutcome::Restart);
        assert_eq!(game.apply_key(&key(KeyCode::Char('q'))), KeyOutcome::Quit);
    }

    #[test]
    fn new_game_starts_centered_with_food_off_the_snake() {
        let game = Game::new(30, 20, Difficulty::Hard);

        assert_eq!(game.snake.head(), (15, 10));
        assert_eq!(game.snake.len(), 3);
        assert_eq!(game.snake.direction(), Right);
        assert_eq!(game.score(), 0);
        assert_eq!(game.tick_interval(), Difficulty::Hard.tick_interval());
        assert!(!game.snake.contains(game.food()));
        assert!(!game.hits_wall(game.food()));
        assert!(!game.is_game_over());
    }
}
