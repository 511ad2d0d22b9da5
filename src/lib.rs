#![deny(missing_docs)]

//! A minimal windowed application shell.
//!
//! Opens a window, sets up [wgpu](https://docs.rs/wgpu/latest/wgpu/) on it and clears the
//! screen to a slowly drifting color until the window is closed or Escape is pressed.
//!
//! The loop lives in [`client::ApplicationState`] and runs on any
//! [`PresentationBackend`](client::core::PresentationBackend); the real one is
//! [`WgpuBackend`](client::core::graphics::WgpuBackend).

pub mod client;
pub mod common;
