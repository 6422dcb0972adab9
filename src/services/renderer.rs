//! Progressive grid rendering
//!
//! A render clears the view synchronously, then materializes the list in
//! fixed-size batches, one batch per frame tick. Every call to
//! [`ProgressiveRenderer::render`] bumps a generation counter; a batch is only
//! appended while its generation is still current, so a newer render always
//! discards whatever is left of an older one.

use std::sync::{Arc, Mutex, MutexGuard, RwLock};
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::models::{ChannelCard, ChannelRecord};
use crate::services::classifier::DEFAULT_ICON;
use crate::services::metrics;

/// Display surface the renderer materializes cards into
pub trait ViewSurface: Send + Sync + 'static {
    /// Remove every displayed card
    fn clear(&self);
    /// Append one batch of cards after the ones already displayed
    fn append(&self, cards: Vec<ChannelCard>);
    /// Number of cards currently displayed
    fn len(&self) -> usize;
}

/// In-memory grid, the view exposed over HTTP
#[derive(Debug, Default)]
pub struct GridView {
    cards: RwLock<Vec<ChannelCard>>,
}

impl GridView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Vec<ChannelCard> {
        self.cards.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Card at `position`, if it has been materialized already
    pub fn card_at(&self, position: usize) -> Option<ChannelCard> {
        self.cards
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(position)
            .cloned()
    }
}

impl ViewSurface for GridView {
    fn clear(&self) {
        self.cards.write().unwrap_or_else(|e| e.into_inner()).clear();
    }

    fn append(&self, cards: Vec<ChannelCard>) {
        self.cards
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .extend(cards);
    }

    fn len(&self) -> usize {
        self.cards.read().unwrap_or_else(|e| e.into_inner()).len()
    }
}

/// How a render ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Every batch was appended
    Completed { batches: usize, items: usize },
    /// A newer render took over before this one finished
    Superseded { generation: u64, items_flushed: usize },
    /// The batch task was cancelled or panicked
    Aborted,
}

/// Handle on a running render
#[derive(Debug)]
pub struct RenderHandle {
    pub generation: u64,
    task: JoinHandle<RenderOutcome>,
}

impl RenderHandle {
    /// Wait for the batch loop to finish
    pub async fn finished(self) -> RenderOutcome {
        match self.task.await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!("Render task {} failed: {}", self.generation, e);
                RenderOutcome::Aborted
            }
        }
    }
}

#[derive(Debug, Default)]
struct RenderState {
    generation: u64,
    in_flight: Option<u64>,
}

/// Batches a channel list into a view surface across frame ticks
pub struct ProgressiveRenderer<V: ViewSurface = GridView> {
    surface: Arc<V>,
    state: Arc<Mutex<RenderState>>,
    batch_size: usize,
    frame_interval: Duration,
}

impl<V: ViewSurface> ProgressiveRenderer<V> {
    pub fn new(surface: Arc<V>, batch_size: usize, frame_interval: Duration) -> Self {
        Self {
            surface,
            state: Arc::new(Mutex::new(RenderState::default())),
            batch_size: batch_size.max(1),
            frame_interval,
        }
    }

    pub fn surface(&self) -> &Arc<V> {
        &self.surface
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Generation of the most recent render
    pub fn generation(&self) -> u64 {
        lock(&self.state).generation
    }

    /// Whether batches of the current render are still pending
    pub fn is_rendering(&self) -> bool {
        lock(&self.state).in_flight.is_some()
    }

    /// Replace the displayed cards with a fresh incremental render of `list`
    ///
    /// Must be called from within a tokio runtime.
    pub fn render(&self, list: Vec<ChannelRecord>) -> RenderHandle {
        let generation = {
            let mut state = lock(&self.state);
            state.generation += 1;
            state.in_flight = Some(state.generation);
            self.surface.clear();
            state.generation
        };

        tracing::debug!("Render {} started ({} items)", generation, list.len());

        let task = tokio::spawn(run_batches(
            Arc::clone(&self.surface),
            Arc::clone(&self.state),
            generation,
            list,
            self.batch_size,
            self.frame_interval,
        ));

        RenderHandle { generation, task }
    }
}

fn lock(state: &Mutex<RenderState>) -> MutexGuard<'_, RenderState> {
    state.lock().unwrap_or_else(|e| e.into_inner())
}

fn to_card(position: usize, channel: ChannelRecord) -> ChannelCard {
    ChannelCard {
        position,
        name: channel.name.clone(),
        logo: channel.logo.clone(),
        fallback_logo: DEFAULT_ICON,
        category: channel.category,
        program: channel.program.clone(),
        channel,
    }
}

async fn next_frame(interval: Duration) {
    if interval.is_zero() {
        tokio::task::yield_now().await;
    } else {
        tokio::time::sleep(interval).await;
    }
}

async fn run_batches<V: ViewSurface>(
    surface: Arc<V>,
    state: Arc<Mutex<RenderState>>,
    generation: u64,
    list: Vec<ChannelRecord>,
    batch_size: usize,
    frame_interval: Duration,
) -> RenderOutcome {
    let mut queue = list.into_iter().enumerate().peekable();
    let mut batches = 0usize;
    let mut items = 0usize;

    while queue.peek().is_some() {
        next_frame(frame_interval).await;

        let batch: Vec<ChannelCard> = queue
            .by_ref()
            .take(batch_size)
            .map(|(position, channel)| to_card(position, channel))
            .collect();
        let count = batch.len();

        // Check and append under the same lock that render() clears under
        let guard = lock(&state);
        if guard.generation != generation {
            drop(guard);
            metrics::RENDERS_SUPERSEDED_TOTAL.inc();
            tracing::debug!(
                "Render {} superseded after {} items",
                generation,
                items
            );
            return RenderOutcome::Superseded {
                generation,
                items_flushed: items,
            };
        }
        surface.append(batch);
        drop(guard);

        metrics::RENDER_BATCHES_TOTAL.inc();
        batches += 1;
        items += count;
    }

    let mut guard = lock(&state);
    if guard.in_flight == Some(generation) {
        guard.in_flight = None;
    }
    drop(guard);

    tracing::debug!("Render {} complete: {} items in {} batches", generation, items, batches);

    RenderOutcome::Completed { batches, items }
}
