mod app;
mod food;
mod game;
mod grid;
mod screen;
mod snake;

/// Signed so the head can step to -1 or 25 before the edge check fires.
pub type GridInt = i16;
pub type Cell = (GridInt, GridInt);

pub type TermInt = u16;
pub type Coords = (u16, u16);

fn main() {
    let mut app = app::App::new();

    // The frame loop takes care of exiting cleanly on CTRL+C
    app.run();
}
