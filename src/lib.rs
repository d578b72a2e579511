#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod action;
pub mod buttonmatrix;
pub mod clock;
pub mod comms;
pub mod config;
pub mod debounce;
pub mod encoding;
pub mod engine;
pub mod error;
pub mod event;
pub mod flags;
pub mod keyboard;
pub mod keycode;
pub mod keymap;
pub mod layout;
pub mod merger;
pub mod report;

pub use error::Error;
pub use event::{KeyEvent, KeyPosition};
pub use keyboard::SplitKeyboard;
