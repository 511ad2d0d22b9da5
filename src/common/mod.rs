//! Code shared by every part of the program that is not tied to windowing or rendering.

pub mod trace;
