pub mod board;
pub mod cli;
pub mod config;
pub mod entity;
pub mod error;
pub mod logging;
pub mod storage;
pub mod warnings;
pub mod widget;

pub use board::{Action, Board, BoardEvent, Target};
pub use error::{CorkboardError, Result};
