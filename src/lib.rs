#![cfg_attr(not(test), no_std)]
#[cfg(test)]
extern crate std;
extern crate alloc;

pub mod error;
pub mod config;
pub mod log;
pub mod time;
pub mod drivers;
pub mod chip;

pub use paste;
