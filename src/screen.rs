use std::io::{stdout, Stdout, Write};
use std::time::Duration;

use crossterm::event::{poll, read, Event, KeyEvent};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue, style, terminal};

use crate::grid::{self, CELL_COUNT};
use crate::{Cell, Coords, TermInt};

const TITLE: &str = "S N A K E";

/// Terminal backend: raw-mode alternate screen with a local character buffer,
/// a 25x25 board centered in it, and overlay messages that restore whatever
/// they covered when hidden.
pub struct Screen {
    width: TermInt,
    height: TermInt,
    origin: Coords,
    stdout: Stdout,
    buffer: Vec<char>,
    current_msg: Option<Message>,
}

struct Message {
    top_left: Coords,
    width: TermInt,
    height: TermInt,
}

impl Screen {
    pub fn new() -> Self {
        let (width, height) = terminal::size().expect("Error reading size.");
        let stdout = stdout();
        let buffer = vec![' '; width as usize * height as usize];

        // Room for the border plus the title and score lines above the board
        let board = CELL_COUNT as TermInt;
        if width < board + 2 || height < board + 6 {
            panic!("Terminal too small: need at least {}x{}.", board + 2, board + 6);
        }

        let origin = (width / 2 - board / 2, height / 2 - board / 2);
        Screen { width, height, origin, stdout, buffer, current_msg: None }
    }

    pub fn setup(&mut self) {
        execute!(self.stdout, EnterAlternateScreen).expect("Error entering alt screen");
        self.set_raw_mode(true);
        self.set_cursor_visibility(false);
    }

    pub fn restore(&mut self) {
        self.set_raw_mode(false);
        self.set_cursor_visibility(true);
        execute!(self.stdout, LeaveAlternateScreen).expect("Error leaving alt screen");
    }

    pub fn read_key_blocking(&self) -> KeyEvent {
        loop {
            if let Event::Key(ev) = read().unwrap() {
                return ev;
            }
        }
    }

    pub fn read_key_events_queue(&self) -> Vec<KeyEvent> {
        let mut events = vec![];

        while poll(Duration::from_millis(1)).unwrap() {
            if let Event::Key(ev) = read().unwrap() {
                events.push(ev);
            }
        }

        events
    }

    pub fn clear(&mut self) {
        execute!(self.stdout, terminal::Clear(ClearType::All)).expect("Error clearing.");
        self.buffer = vec![' '; self.width as usize * self.height as usize];
    }

    /// Draws the static frame: title line and the border around the board.
    pub fn draw_frame(&mut self) {
        let (ox, oy) = self.origin;
        let title_x = self.width / 2 - TITLE.len() as TermInt / 2;
        self.print_str_at((title_x, oy - 3), TITLE);

        for x in 0..CELL_COUNT as TermInt + 2 {
            let ch = if x == 0 || x == CELL_COUNT as TermInt + 1 { '+' } else { '-' };
            self.print_at((ox - 1 + x, oy - 1), ch);
            self.print_at((ox - 1 + x, oy + CELL_COUNT as TermInt), ch);
        }

        for y in 0..CELL_COUNT as TermInt {
            self.print_at((ox - 1, oy + y), '|');
            self.print_at((ox + CELL_COUNT as TermInt, oy + y), '|');
        }

        self.flush();
    }

    pub fn draw_score(&mut self, score: u32) {
        let (ox, oy) = self.origin;
        // Left-padded so a lower score after a restart overwrites old digits
        self.print_str_at((ox, oy - 2), &format!("Score: {:<6}", score));
    }

    /// Prints a glyph at a board cell. Off-board cells (the head, on the tick
    /// the game ends) are skipped rather than drawn over the border.
    pub fn draw_cell(&mut self, cell: Cell, ch: char) {
        if grid::in_bounds(cell) {
            self.print_at(grid::to_screen(cell, self.origin), ch);
        }
    }

    pub fn clear_board(&mut self) {
        let (ox, oy) = self.origin;
        for y in 0..CELL_COUNT as TermInt {
            for x in 0..CELL_COUNT as TermInt {
                self.print_at((ox + x, oy + y), ' ');
            }
        }
    }

    pub fn chime(&mut self) {
        // The terminal stand-in for a sound cue
        queue!(self.stdout, style::Print('\x07')).unwrap();
    }

    pub fn show_message(&mut self, lines: &[&str]) {
        if self.current_msg.is_some() {
            self.hide_message();
        }

        let msg_height = (lines.len() + 2) as TermInt;
        let msg_width = (lines.iter().map(|x| x.len()).max().unwrap() + 2) as TermInt;
        let center = (self.width / 2, self.height / 2);
        let top_left = (center.0 - msg_width / 2, center.1 - msg_height / 2);

        // Print the top and bottom empty lines
        for y in [top_left.1, top_left.1 + msg_height - 1].iter() {
            for x_diff in 0..msg_width {
                self.print_at_no_save((top_left.0 + x_diff, *y), ' ');
            }
        }

        // Print the message lines
        for (i, line) in lines.iter().enumerate() {
            let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);
            let y = top_left.1 + i as TermInt + 1;
            for (x_diff, ch) in padded_line.char_indices() {
                self.print_at_no_save((top_left.0 + x_diff as TermInt, y), ch);
            }
        }

        self.current_msg = Some(Message { top_left, width: msg_width, height: msg_height });
        self.flush();
    }

    pub fn hide_message(&mut self) {
        let msg = match self.current_msg.take() {
            Some(msg) => msg,
            None => return,
        };

        // Restore the covered content from the local buffer
        for y_diff in 0..msg.height {
            for x_diff in 0..msg.width {
                let (x, y) = (msg.top_left.0 + x_diff, msg.top_left.1 + y_diff);
                let ch = self.buffer[self.width as usize * y as usize + x as usize];
                self.print_at_no_save((x, y), ch);
            }
        }

        self.flush();
    }

    pub fn flush(&mut self) {
        self.stdout.flush().expect("Error flushing.");
    }

    ///////////////////////////////////////////////////////////////////////////

    fn print_at(&mut self, pos: Coords, ch: char) {
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(ch)).unwrap();
        self.buffer[self.width as usize * pos.1 as usize + pos.0 as usize] = ch;
    }

    fn print_str_at(&mut self, pos: Coords, s: &str) {
        for (i, ch) in s.chars().enumerate() {
            self.print_at((pos.0 + i as TermInt, pos.1), ch);
        }
    }

    fn print_at_no_save(&mut self, pos: Coords, ch: char) {
        // Messages bypass the buffer so hiding them restores what was below
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(ch)).unwrap();
    }

    fn set_raw_mode(&self, option: bool) {
        let res = if option {
            terminal::enable_raw_mode()
        } else {
            terminal::disable_raw_mode()
        };

        res.expect("Error setting raw mode.");
    }

    fn set_cursor_visibility(&mut self, option: bool) {
        let res = if option {
            execute!(self.stdout, cursor::Show)
        } else {
            execute!(self.stdout, cursor::Hide)
        };

        res.expect("Error setting cursor visibility.");
    }
}
