//! Shared sink pool
//!
//! Every logger built through the same pool writes to one handle per sink
//! identifier, so two channels naming the same file share a writer and
//! their lines never tear.

use super::{Sink, SinkTarget};
use crate::core::{ConfigError, LoggerError};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

pub type SharedSink = Arc<Mutex<Box<dyn Sink>>>;

#[derive(Default)]
pub struct SinkPool {
    sinks: Mutex<HashMap<SinkTarget, SharedSink>>,
}

impl SinkPool {
    pub fn new() -> Self {
        Self {
            sinks: Mutex::new(HashMap::new()),
        }
    }

    /// Resolve every identifier to a shared sink, opening the ones not yet
    /// in the pool.
    ///
    /// All-or-nothing: when any identifier fails, the sinks opened by this
    /// call are closed and the pool is left unchanged.
    pub fn open_all(&self, ids: &[String]) -> Result<Vec<SharedSink>, ConfigError> {
        let targets = ids
            .iter()
            .map(|id| id.parse::<SinkTarget>())
            .collect::<Result<Vec<_>, _>>()?;

        let mut sinks = self.sinks.lock();
        let mut opened: Vec<(SinkTarget, SharedSink)> = Vec::new();
        let mut resolved = Vec::with_capacity(targets.len());

        for target in targets {
            let existing = sinks
                .get(&target)
                .or_else(|| opened.iter().find(|(t, _)| *t == target).map(|(_, s)| s))
                .map(Arc::clone);

            match existing {
                Some(sink) => resolved.push(sink),
                None => {
                    // On error `opened` and `resolved` drop here, closing
                    // whatever this call opened.
                    let sink: SharedSink = Arc::new(Mutex::new(target.open()?));
                    resolved.push(Arc::clone(&sink));
                    opened.push((target, sink));
                }
            }
        }

        sinks.extend(opened);
        Ok(resolved)
    }

    /// Flush every pooled sink, returning the failures.
    pub fn sync_all(&self) -> Vec<LoggerError> {
        let sinks: Vec<SharedSink> = self.sinks.lock().values().cloned().collect();
        sinks
            .iter()
            .filter_map(|sink| sink.lock().flush().err())
            .collect()
    }

    /// Release the pool's handles. Loggers still holding a sink keep it
    /// open until they are dropped.
    pub fn clear(&self) {
        self.sinks.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.sinks.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.lock().is_empty()
    }
}
