#![forbid(unsafe_code)]

//! Generation session runtime.
//!
//! One [`Session`] owns exactly one decode/apply pipeline: chunks go in
//! strictly in arrival order, and after every applied record a fresh
//! immutable tree snapshot is published. Rendering may run concurrently
//! with feeding — a renderer holds a [`TreeHandle`] and always loads the
//! latest published `Arc<Tree>`, so it can never observe a tree mid-mutation.
//!
//! # Lifecycle
//!
//! `begin` → `feed`* → (`finish` | `abort`), then `clear` to start over.
//! A second generation is rejected while one is active; `clear` is rejected
//! while the stream is in flight. Aborting keeps everything reconciled so
//! far — partial progress stays renderable, nothing rolls back.

pub mod session;

pub use session::{Session, SessionError, SessionPhase, TreeHandle};
