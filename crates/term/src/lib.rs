//! Terminal game renderer.
//!
//! A small, game-oriented rendering layer: the view turns a game snapshot into
//! a framebuffer of styled glyphs, and the renderer flushes that framebuffer to
//! the terminal. No widget toolkit is involved.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blocktris_core as core;
pub use blocktris_types as types;

pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use game_view::{palette, AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
