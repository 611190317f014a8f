//! Game rules for N×N noughts and crosses.
//!
//! Pure functions over a [`Board`](super::Board); rules are kept apart from
//! board storage so the engine and the automated strategy share them.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::{check_win, completes_line};
