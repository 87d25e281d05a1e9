use std::process::exit;
use std::thread::sleep;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Game, GameEvent, Phase};
use crate::screen::Screen;
use crate::snake::Direction::*;

const FRAME_INTERVAL_MS: u64 = 15;

const BODY_CHAR: char = '\u{2588}';
const FOOD_CHAR: char = 'o';
const DEAD_CHAR: char = 'X';

pub struct App {
    screen: Screen,
    game: Game,
}

impl App {
    pub fn new() -> Self {
        App { screen: Screen::new(), game: Game::new() }
    }

    pub fn run(&mut self) {
        self.screen.setup();
        self.show_intro();

        self.screen.clear();
        self.screen.draw_frame();
        self.redraw();

        let start = Instant::now();

        loop {
            sleep(Duration::from_millis(FRAME_INTERVAL_MS));
            let now = start.elapsed();

            for key_ev in self.screen.read_key_events_queue() {
                match &key_ev {
                    ev if is_ctrl_c(ev) => self.clean_exit(),
                    KeyEvent { code, modifiers: _ } => match code {
                        KeyCode::Char('w') | KeyCode::Up => self.game.steer(Up, now),
                        KeyCode::Char('a') | KeyCode::Left => self.game.steer(Left, now),
                        KeyCode::Char('s') | KeyCode::Down => self.game.steer(Down, now),
                        KeyCode::Char('d') | KeyCode::Right => self.game.steer(Right, now),
                        KeyCode::Char(' ') => self.restart(),
                        _ => {}
                    },
                }
            }

            let events = self.game.frame(now);
            if events.is_empty() {
                continue;
            }

            self.redraw();

            if events.contains(&GameEvent::AteFood) {
                self.screen.chime();
                self.screen.flush();
            }

            if events.contains(&GameEvent::Crashed) {
                self.game_over();
            }
        }
    }

    ///////////////////////////////////////////////////////////////////////////

    fn show_intro(&mut self) {
        let lines = &[
            "Arrow keys or WASD to move",
            "Space to restart after a crash",
            "CTRL+C to quit",
            "",
            "Press any key to begin",
        ];

        self.screen.show_message(lines);

        if is_ctrl_c(&self.screen.read_key_blocking()) {
            self.clean_exit()
        }

        self.screen.hide_message();
    }

    fn redraw(&mut self) {
        self.screen.clear_board();
        self.screen.draw_cell(self.game.food_position(), FOOD_CHAR);

        let head = self.game.snake().head();
        let head_char = self.game.snake().head_char();
        for cell in self.game.snake().cells().collect::<Vec<_>>() {
            let ch = if cell == head { head_char } else { BODY_CHAR };
            self.screen.draw_cell(cell, ch);
        }

        self.screen.draw_score(self.game.score());
        self.screen.flush();
    }

    fn game_over(&mut self) {
        for cell in self.game.snake().cells().collect::<Vec<_>>() {
            self.screen.draw_cell(cell, DEAD_CHAR);
        }

        self.screen.chime();
        self.screen.show_message(&[
            "GAME OVER",
            &*format!("Score: {}", self.game.score()),
            "",
            "Press Space to play again,",
            "or CTRL+C to quit.",
        ]);
    }

    fn restart(&mut self) {
        if self.game.phase() != Phase::Over {
            return;
        }

        self.game.restart();
        self.screen.hide_message();
        self.redraw();
    }

    fn clean_exit(&mut self) {
        self.screen.restore();
        exit(0);
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
}
