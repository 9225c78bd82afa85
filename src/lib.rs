//! Twin Snake - a terminal Snake game for one or two local players
//!
//! This library provides:
//! - Core simulation engine on a wrap-around grid (game module)
//! - Highscore list kept between sessions (highscore module)
//! - TUI rendering (render module)
//! - Keyboard mapping for the two player channels (input module)
//! - Interactive host loop (modes module)

pub mod game;
pub mod highscore;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
