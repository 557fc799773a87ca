#![doc = include_str!("../README.md")]

pub mod alphabet;
pub mod calendar;
mod error;
mod interval;
pub mod radix;
pub mod timecode;

pub use error::{Error, Result};
pub use interval::{following_hour_minimal, represent_interval};
pub use timecode::{
    decode, describe, encode, Decoded, Description, Tc10, Tc8, Timecode, Variant, Year8,
};
