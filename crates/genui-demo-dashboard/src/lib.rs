#![forbid(unsafe_code)]

//! Dashboard demo for the genui engine.
//!
//! Wires the engine to a concrete catalog (the classic analytics-dashboard
//! component set), a plain-text renderer registry, and a canned generation
//! stream that replays in uneven chunks to showcase progressive rendering.

pub mod catalog;
pub mod replay;
pub mod text_render;
