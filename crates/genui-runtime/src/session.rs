#![forbid(unsafe_code)]

//! The session state machine.

use genui_catalog::Catalog;
use genui_core::{Diagnostic, PatchRecord, Tree};
use genui_stream::{DecoderOptions, StreamDecoder};
use genui_tree::Reconciler;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info};

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    /// No generation has started (or `clear` ran).
    #[default]
    Idle,
    /// A stream is in flight; `feed` is accepted.
    Streaming,
    /// The stream finished or was aborted; the tree is final and renderable.
    Settled,
}

/// Host-level misuse of the session lifecycle.
///
/// These are the only hard errors in the engine; everything on the
/// streaming path itself degrades to diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    /// `begin` while a generation is active (streaming or settled but not
    /// cleared). At most one generation per tree.
    AlreadyStreaming,
    /// `feed`/`finish`/`abort` without an in-flight stream.
    NotStreaming,
    /// `clear` while the stream is in flight.
    StreamActive,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyStreaming => f.write_str("a generation is already active; clear first"),
            Self::NotStreaming => f.write_str("no stream in flight"),
            Self::StreamActive => f.write_str("cannot clear while a stream is in flight"),
        }
    }
}

impl std::error::Error for SessionError {}

/// Cheaply cloneable reader handle onto a session's published snapshots.
///
/// `load` never blocks writers for longer than one pointer copy and never
/// observes a half-applied record; it may be called from another thread
/// while feeding continues.
#[derive(Debug, Clone)]
pub struct TreeHandle {
    slot: Arc<RwLock<Arc<Tree>>>,
}

impl TreeHandle {
    /// The latest published snapshot.
    #[must_use]
    pub fn load(&self) -> Arc<Tree> {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// One generation session: decoder, reconciler, and snapshot publication.
#[derive(Debug)]
pub struct Session {
    catalog: Arc<Catalog>,
    decoder_options: DecoderOptions,
    decoder: StreamDecoder,
    reconciler: Reconciler,
    phase: SessionPhase,
    slot: Arc<RwLock<Arc<Tree>>>,
    diagnostics: Vec<Diagnostic>,
}

impl Session {
    /// Create an idle session validating against `catalog`.
    #[must_use]
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self::with_decoder_options(catalog, DecoderOptions::default())
    }

    /// Create an idle session with explicit decoder limits.
    #[must_use]
    pub fn with_decoder_options(catalog: Arc<Catalog>, options: DecoderOptions) -> Self {
        Self {
            reconciler: Reconciler::new(catalog.clone()),
            catalog,
            decoder_options: options,
            decoder: StreamDecoder::with_options(options),
            phase: SessionPhase::Idle,
            slot: Arc::new(RwLock::new(Arc::new(Tree::new()))),
            diagnostics: Vec::new(),
        }
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// A reader handle for concurrent rendering.
    #[must_use]
    pub fn handle(&self) -> TreeHandle {
        TreeHandle {
            slot: self.slot.clone(),
        }
    }

    /// The latest published snapshot.
    #[must_use]
    pub fn tree(&self) -> Arc<Tree> {
        self.handle().load()
    }

    /// Start a generation stream.
    pub fn begin(&mut self) -> Result<(), SessionError> {
        match self.phase {
            SessionPhase::Idle => {
                info!("generation stream started");
                self.phase = SessionPhase::Streaming;
                Ok(())
            }
            SessionPhase::Streaming | SessionPhase::Settled => Err(SessionError::AlreadyStreaming),
        }
    }

    /// Feed one chunk of the stream, in arrival order.
    ///
    /// Returns the number of records applied to the tree. Undecodable lines
    /// and rejected records degrade to diagnostics, never errors.
    pub fn feed(&mut self, chunk: &[u8]) -> Result<usize, SessionError> {
        if self.phase != SessionPhase::Streaming {
            return Err(SessionError::NotStreaming);
        }
        let records = self.decoder.feed(chunk);
        Ok(self.apply_records(records))
    }

    /// End the stream normally: flush the decoder tail, finalize pending
    /// updates, publish the final snapshot.
    pub fn finish(&mut self) -> Result<(), SessionError> {
        if self.phase != SessionPhase::Streaming {
            return Err(SessionError::NotStreaming);
        }
        let tail = self.decoder.finish();
        self.apply_records(tail);
        self.settle("generation stream finished");
        Ok(())
    }

    /// Abort mid-stream. Everything reconciled so far stays renderable;
    /// already-admitted elements are not rolled back.
    pub fn abort(&mut self) -> Result<(), SessionError> {
        if self.phase != SessionPhase::Streaming {
            return Err(SessionError::NotStreaming);
        }
        self.settle("generation stream aborted");
        Ok(())
    }

    /// Reset to empty. Discards the tree, buffered pending updates, and any
    /// undrained diagnostics. Only valid while no stream is in flight.
    pub fn clear(&mut self) -> Result<(), SessionError> {
        if self.phase == SessionPhase::Streaming {
            return Err(SessionError::StreamActive);
        }
        debug!("session cleared");
        self.decoder = StreamDecoder::with_options(self.decoder_options);
        self.reconciler = Reconciler::new(self.catalog.clone());
        self.diagnostics.clear();
        self.phase = SessionPhase::Idle;
        self.publish();
        Ok(())
    }

    /// Drain every diagnostic accumulated by the decoder and reconciler.
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        self.collect_diagnostics();
        std::mem::take(&mut self.diagnostics)
    }

    fn apply_records(&mut self, records: Vec<serde_json::Value>) -> usize {
        let mut applied = 0;
        for raw in records {
            match PatchRecord::from_wire(&raw) {
                Ok(record) => {
                    if self.reconciler.apply(record) {
                        applied += 1;
                        self.publish();
                    }
                }
                Err(err) => {
                    debug!(error = %err, "record skipped");
                    self.diagnostics.push(Diagnostic::DecodeFailure {
                        detail: err.to_string(),
                        excerpt: raw.to_string().chars().take(80).collect(),
                    });
                }
            }
        }
        self.collect_diagnostics();
        applied
    }

    fn settle(&mut self, message: &'static str) {
        self.reconciler.finalize();
        self.collect_diagnostics();
        self.publish();
        self.phase = SessionPhase::Settled;
        info!(
            elements = self.reconciler.tree().len(),
            diagnostics = self.diagnostics.len(),
            "{message}"
        );
    }

    fn collect_diagnostics(&mut self) {
        self.diagnostics.extend(self.decoder.take_diagnostics());
        self.diagnostics.extend(self.reconciler.take_diagnostics());
    }

    fn publish(&mut self) {
        let snapshot = Arc::new(self.reconciler.tree().clone());
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = snapshot;
    }
}
