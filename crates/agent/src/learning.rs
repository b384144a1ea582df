//! Off-path decision tree rebuilds.
//!
//! The learning strategist never induces a tree on the decision path. It
//! hands a history snapshot to a [`TreeBuilder`], which runs the induction on
//! a [`TreeExecutor`] and publishes the result through a `watch` channel.
//! Readers clone the published `Arc` at the start of a cycle, so a cycle
//! always sees one complete tree.
//!
//! Design principles:
//! - At most one rebuild in flight; a trigger while busy is skipped
//! - No cancellation: a started rebuild runs to completion
//! - A failed induction keeps the previously published tree

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use decision_tree::InductionError;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::assess::Question;
use crate::directive::TreeLabel;
use crate::history::HistoryItem;
use crate::trees::{self, PolicyTree};

/// A boxed unit of rebuild work.
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// Where rebuild jobs run.
pub trait TreeExecutor: Send + Sync {
    fn execute(&self, job: Job);
}

/// Runs jobs immediately on the calling thread.
///
/// The result is still published through the channel, so the cycle that
/// triggered the rebuild keeps the tree it already holds. Useful for tests
/// and single-threaded hosts.
#[derive(Clone, Copy, Debug, Default)]
pub struct InlineExecutor;

impl TreeExecutor for InlineExecutor {
    fn execute(&self, job: Job) {
        job();
    }
}

/// Runs jobs on a tokio runtime's blocking pool.
#[derive(Clone, Debug)]
pub struct TokioExecutor {
    handle: Handle,
}

impl TokioExecutor {
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Executor bound to the runtime of the calling context.
    ///
    /// Returns `None` outside a tokio runtime.
    pub fn current() -> Option<Self> {
        Handle::try_current().ok().map(Self::new)
    }
}

impl TreeExecutor for TokioExecutor {
    fn execute(&self, job: Job) {
        // Fire and forget: completion is observed through the watch channel
        drop(self.handle.spawn_blocking(job));
    }
}

/// Builds a policy tree from recorded history.
pub trait TreeInducer: Send + Sync {
    fn induce(&self, history: &[HistoryItem]) -> Result<PolicyTree, InductionError>;
}

/// ID3 over [`Question::TRAINING`], labelled with each item's derived label.
///
/// The whole history is used. Penalized items keep the `Stop` label they
/// were recorded with.
#[derive(Clone, Copy, Debug, Default)]
pub struct Id3Inducer;

impl TreeInducer for Id3Inducer {
    fn induce(&self, history: &[HistoryItem]) -> Result<PolicyTree, InductionError> {
        let (features, labels): (Vec<Vec<bool>>, Vec<TreeLabel>) = history
            .iter()
            .map(|item| (item.assessment.features(&Question::TRAINING), item.derived))
            .unzip();

        decision_tree::induce(&features, &labels, &Question::TRAINING)
    }
}

/// Frees the in-flight slot when dropped, including when the job panics or
/// is dropped without running.
struct SlotGuard(Arc<AtomicBool>);

impl Drop for SlotGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Owns the published tree and the single in-flight rebuild slot.
pub struct TreeBuilder {
    published: Arc<watch::Sender<Arc<PolicyTree>>>,
    in_flight: Arc<AtomicBool>,
    inducer: Arc<dyn TreeInducer>,
    executor: Arc<dyn TreeExecutor>,
}

impl TreeBuilder {
    /// Starts with [`trees::fallback`] published.
    pub fn new(inducer: Arc<dyn TreeInducer>, executor: Arc<dyn TreeExecutor>) -> Self {
        let (published, _) = watch::channel(Arc::new(trees::fallback()));
        Self {
            published: Arc::new(published),
            in_flight: Arc::new(AtomicBool::new(false)),
            inducer,
            executor,
        }
    }

    /// The most recently published tree.
    pub fn current(&self) -> Arc<PolicyTree> {
        Arc::clone(&self.published.borrow())
    }

    /// Receiver notified on every publication.
    pub fn subscribe(&self) -> watch::Receiver<Arc<PolicyTree>> {
        self.published.subscribe()
    }

    pub fn is_building(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Dispatches a rebuild over `history`.
    ///
    /// Returns `false` without dispatching if a rebuild is already running.
    pub fn request_rebuild(&self, history: Vec<HistoryItem>) -> bool {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("tree rebuild already in flight, skipping");
            return false;
        }

        let published = Arc::clone(&self.published);
        let slot = SlotGuard(Arc::clone(&self.in_flight));
        let inducer = Arc::clone(&self.inducer);

        debug!(
            history_len = history.len(),
            penalized = history.iter().filter(|item| item.is_penalized()).count(),
            "dispatching tree rebuild"
        );
        self.executor.execute(Box::new(move || {
            let _slot = slot;
            match inducer.induce(&history) {
                Ok(tree) => {
                    info!(
                        history_len = history.len(),
                        depth = tree.depth(),
                        "published learned decision tree"
                    );
                    published.send_replace(Arc::new(tree));
                }
                Err(error) => {
                    warn!(%error, "tree induction failed, keeping current tree");
                }
            }
        }));

        true
    }
}

impl fmt::Debug for TreeBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeBuilder")
            .field("in_flight", &self.is_building())
            .finish_non_exhaustive()
    }
}
