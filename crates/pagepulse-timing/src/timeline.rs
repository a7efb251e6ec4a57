use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use anyhow::Result;

use crate::{
    BatchSender, EntryCategory, NavigationSource, NavigationTimingRecord, ResourceTiming,
    TimingBatch, TimingError, TimingSource, UserTiming,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Measure {
    pub name: String,
    pub start_time: f64,
    pub duration: f64,
}

#[derive(Debug)]
struct TimelineState {
    subscribers: HashMap<EntryCategory, Vec<BatchSender>>,
    unsupported: HashSet<EntryCategory>,
    resource_history: Vec<ResourceTiming>,
    resource_buffer_size: Option<usize>,
    navigation: Option<NavigationTimingRecord>,
    marks: HashMap<String, f64>,
    measures: Vec<Measure>,
}

/// In-memory performance timeline for one page context.
///
/// Embedders feed it with [`PerformanceTimeline::dispatch`]; it fans each
/// batch out to the subscribers of the batch's category.
#[derive(Debug)]
pub struct PerformanceTimeline {
    origin: Instant,
    state: Mutex<TimelineState>,
}

impl Default for PerformanceTimeline {
    fn default() -> Self {
        Self::new()
    }
}

impl PerformanceTimeline {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            state: Mutex::new(TimelineState {
                subscribers: HashMap::new(),
                unsupported: HashSet::new(),
                resource_history: Vec::new(),
                resource_buffer_size: None,
                navigation: None,
                marks: HashMap::new(),
                measures: Vec::new(),
            }),
        }
    }

    /// Marks `category` as unavailable, like a host without that observer type.
    pub fn without_category(self, category: EntryCategory) -> Self {
        self.lock().unsupported.insert(category);
        self
    }

    fn lock(&self) -> MutexGuard<'_, TimelineState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Milliseconds since the timeline was created.
    pub fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }

    pub fn set_navigation(&self, record: NavigationTimingRecord) {
        self.lock().navigation = Some(record);
    }

    pub fn set_resource_buffer_size(&self, size: usize) {
        let mut state = self.lock();
        state.resource_buffer_size = Some(size);
        state.resource_history.truncate(size);
    }

    /// Delivers `batch` to every live subscriber of its category.
    ///
    /// Returns the number of subscribers that received it.
    pub fn dispatch(&self, batch: TimingBatch) -> usize {
        let category = batch.category();
        let mut state = self.lock();

        if state.unsupported.contains(&category) {
            return 0;
        }

        if let TimingBatch::Resource(entries) = &batch {
            let room = state
                .resource_buffer_size
                .map(|size| size.saturating_sub(state.resource_history.len()))
                .unwrap_or(usize::MAX);
            if room < entries.len() {
                tracing::debug!(
                    target: "pagepulse_timing",
                    dropped = entries.len() - room,
                    "resource timing buffer full"
                );
            }
            let kept = entries.iter().take(room).cloned().collect::<Vec<_>>();
            state.resource_history.extend(kept);
        }

        let Some(sinks) = state.subscribers.get_mut(&category) else {
            return 0;
        };
        sinks.retain(|sink| sink.send(batch.clone()).is_ok());
        sinks.len()
    }

    pub fn resource_history(&self) -> Vec<ResourceTiming> {
        self.lock().resource_history.clone()
    }

    pub fn measures(&self) -> Vec<Measure> {
        self.lock().measures.clone()
    }
}

impl TimingSource for PerformanceTimeline {
    fn subscribe(&self, category: EntryCategory, sink: BatchSender) -> Result<()> {
        let mut state = self.lock();
        if state.unsupported.contains(&category) {
            return Err(TimingError::Unsupported(category).into());
        }
        state.subscribers.entry(category).or_default().push(sink);
        Ok(())
    }

    fn discard_resource_history(&self) {
        self.lock().resource_history.clear();
    }
}

impl NavigationSource for PerformanceTimeline {
    fn navigation_record(&self) -> Option<NavigationTimingRecord> {
        self.lock().navigation
    }
}

impl UserTiming for PerformanceTimeline {
    fn mark(&self, name: &str) -> f64 {
        let at = self.now();
        self.lock().marks.insert(name.to_string(), at);
        at
    }

    fn measure(&self, name: &str, start_mark: &str, end_mark: &str) -> Result<f64> {
        let mut state = self.lock();
        let start = *state
            .marks
            .get(start_mark)
            .ok_or_else(|| TimingError::UnknownMark(start_mark.to_string()))?;
        let end = *state
            .marks
            .get(end_mark)
            .ok_or_else(|| TimingError::UnknownMark(end_mark.to_string()))?;
        let duration = end - start;
        state.measures.push(Measure {
            name: name.to_string(),
            start_time: start,
            duration,
        });
        Ok(duration)
    }
}
