/// Side-scrolling shooter: simulation core plus a terminal front end.
///
/// `compute` and `game` are pure simulation and never touch the terminal;
/// `display` and `input` are the crossterm adapter around them.

pub mod compute;
pub mod config;
pub mod constants;
pub mod display;
pub mod entities;
pub mod error;
pub mod game;
pub mod input;
pub mod timer;
