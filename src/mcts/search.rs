//! Concurrent MCTS search controller.
//!
//! A run spawns a fixed pool of scoped worker threads that share one tree.
//! Each worker loops over independent passes:
//!
//! 1. build a root board from a fresh seed and cross its game-flow stages;
//! 2. descend the tree, creating edges for untried moves and otherwise
//!    following the selection policy, until a new node is expanded, the
//!    game ends, or the node budget is exhausted;
//! 3. roll out with the simulation policy;
//! 4. add the reward of the side that took each edge along the path.
//!
//! The calling thread only watches the clock and reports progress.

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, info, warn};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Move, RandomSource, Side};
use crate::error::SearchError;
use crate::games::BoardInitializer;
use crate::rules::{acting_side, GameContext};

use super::config::{MCTSConfig, SearchBudget};
use super::node::{Edge, EdgeSnapshot, MCTSNode};
use super::policy::{RandomSimulation, SelectionPolicy, SimulationPolicy, UCB1};
use super::stats::{SearchStats, Statistics};
use super::tree::{MCTSTree, RootMoveStats};

/// Outcome of a search run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Most visited root move. `None` only if the root board is already over.
    pub best_move: Option<Move>,

    /// Root moves, most visited first.
    pub root_moves: Vec<RootMoveStats>,

    /// Counters for this run only.
    pub stats: SearchStats,
}

/// Owns the shared tree and drives search runs over it.
///
/// The tree and the running counters persist across runs until
/// `reset_tree`.
pub struct MCTSController {
    /// Read-only game data shared by every worker.
    ctx: Arc<GameContext>,

    /// Search configuration.
    config: MCTSConfig,

    /// The search tree.
    tree: MCTSTree,

    /// Selection policy.
    selection: Box<dyn SelectionPolicy>,

    /// Simulation policy.
    simulation: Box<dyn SimulationPolicy>,

    /// Counters across all runs.
    statistics: Statistics,

    /// Completed runs; varies the worker seeds between runs.
    runs: u64,
}

impl MCTSController {
    /// Create a controller with UCB1 selection and random rollouts.
    pub fn new(ctx: Arc<GameContext>, config: MCTSConfig) -> Self {
        Self {
            ctx,
            tree: MCTSTree::new(config.max_nodes),
            config,
            selection: Box::new(UCB1),
            simulation: Box::new(RandomSimulation),
            statistics: Statistics::new(),
            runs: 0,
        }
    }

    /// Set a custom selection policy.
    pub fn with_selection<S: SelectionPolicy + 'static>(mut self, selection: S) -> Self {
        self.selection = Box::new(selection);
        self
    }

    /// Set a custom simulation policy.
    pub fn with_simulation<S: SimulationPolicy + 'static>(mut self, simulation: S) -> Self {
        self.simulation = Box::new(simulation);
        self
    }

    #[must_use]
    pub fn config(&self) -> &MCTSConfig {
        &self.config
    }

    #[must_use]
    pub fn context(&self) -> &Arc<GameContext> {
        &self.ctx
    }

    #[must_use]
    pub fn tree(&self) -> &MCTSTree {
        &self.tree
    }

    /// Running counters, accumulated over every run.
    #[must_use]
    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    /// Discard the tree. Counters are kept.
    pub fn reset_tree(&mut self) {
        self.tree.reset();
    }

    /// `run` without progress output.
    pub fn search<I>(
        &mut self,
        budget: SearchBudget,
        workers: usize,
        initializer: &I,
    ) -> Result<SearchResult, SearchError>
    where
        I: BoardInitializer + ?Sized,
    {
        self.run(budget, workers, initializer, &mut |_| {})
    }

    /// Search until `budget` runs out, using `workers` threads.
    ///
    /// Progress lines go to `sink` from the calling thread. Any failed or
    /// panicking pass aborts the run and its error is returned.
    pub fn run<I>(
        &mut self,
        budget: SearchBudget,
        workers: usize,
        initializer: &I,
        sink: &mut dyn FnMut(&str),
    ) -> Result<SearchResult, SearchError>
    where
        I: BoardInitializer + ?Sized,
    {
        if workers == 0 {
            return Err(SearchError::InvalidWorkerCount);
        }
        budget.validate()?;

        info!("search started: {workers} workers, budget {budget:?}");

        let start = Instant::now();
        let before = self.statistics.snapshot(0);
        let control = RunControl::new(start, budget);

        let mut base = RandomSource::new(self.config.seed.wrapping_add(self.runs));
        let streams: Vec<RandomSource> = (0..workers).map(|_| base.fork()).collect();
        self.runs += 1;

        let this = &*self;
        thread::scope(|scope| {
            let handles: Vec<_> = streams
                .into_iter()
                .enumerate()
                .map(|(worker, rng)| {
                    let control = &control;
                    scope.spawn(move || this.worker_loop(worker, initializer, rng, control))
                })
                .collect();

            this.watch(&control, start, before.iterations, sink, || {
                handles.iter().any(|handle| handle.is_finished())
            });

            for (worker, handle) in handles.into_iter().enumerate() {
                if handle.join().is_err() {
                    control.fail(SearchError::WorkerPanicked { worker });
                }
            }
        });

        let run_depth = control.max_depth.load(Ordering::Relaxed);
        if let Some(err) = control.error.into_inner() {
            warn!("search aborted: {err}");
            return Err(err);
        }

        let elapsed = start.elapsed().as_micros() as u64;
        let after = self.statistics.snapshot(elapsed);
        let stats = SearchStats {
            iterations: after.iterations - before.iterations,
            failed: after.failed - before.failed,
            nodes_expanded: after.nodes_expanded - before.nodes_expanded,
            max_depth: run_depth,
            time_us: elapsed,
        };

        let best_move = match self.tree.root().best_edge() {
            Some(edge) => Some(*edge.mv()),
            None => self.fallback_move(initializer)?,
        };

        info!(
            "search finished: {stats}; best move {}",
            best_move.map_or_else(|| "none".to_string(), |mv| mv.to_string())
        );

        Ok(SearchResult {
            best_move,
            root_moves: self.tree.root_moves(),
            stats,
        })
    }

    /// Poll until the run should end, reporting once per second.
    fn watch(
        &self,
        control: &RunControl,
        start: Instant,
        base_iterations: u64,
        sink: &mut dyn FnMut(&str),
        worker_exited: impl Fn() -> bool,
    ) {
        let interval = self.config.progress_interval.max(Duration::from_millis(1));
        let mut last_tick = None;

        loop {
            // Workers only exit on their own once the budget or an error
            // stops the run.
            if control.should_stop() || worker_exited() {
                control.stop();
                return;
            }

            let now = Instant::now();
            let tick = match control.deadline {
                Some(deadline) => deadline.saturating_duration_since(now).as_secs(),
                None => now.duration_since(start).as_secs(),
            };
            if last_tick != Some(tick) {
                last_tick = Some(tick);
                let iterations = self.statistics.succeeded() - base_iterations;
                if control.deadline.is_some() {
                    let line = format!("Rest seconds: {tick}");
                    debug!("{line}");
                    sink(&line);
                }
                let line = format!("Iterations: {iterations}");
                debug!("{line}");
                sink(&line);
            }

            let nap = match control.deadline {
                Some(deadline) => interval.min(deadline.saturating_duration_since(now)),
                None => interval,
            };
            thread::sleep(nap);
        }
    }

    fn worker_loop<I>(&self, worker: usize, initializer: &I, mut rng: RandomSource, control: &RunControl)
    where
        I: BoardInitializer + ?Sized,
    {
        while !control.should_stop() && control.claim_pass() {
            let pass = panic::catch_unwind(AssertUnwindSafe(|| self.run_pass(initializer, &mut rng)));
            match pass {
                Ok(Ok(depth)) => {
                    self.statistics.record_success(depth);
                    control.max_depth.fetch_max(depth, Ordering::Relaxed);
                }
                Ok(Err(err)) => {
                    self.statistics.record_failure();
                    warn!("worker {worker}: pass failed: {err}");
                    control.fail(err);
                    return;
                }
                Err(_) => {
                    self.statistics.record_failure();
                    warn!("worker {worker}: pass panicked");
                    control.fail(SearchError::WorkerPanicked { worker });
                    return;
                }
            }
        }
    }

    /// One select/expand/simulate/backpropagate pass. Returns its depth.
    fn run_pass<I>(&self, initializer: &I, rng: &mut RandomSource) -> Result<u64, SearchError>
    where
        I: BoardInitializer + ?Sized,
    {
        let mut board = initializer.initialize_board(rng.next_seed());
        board.advance_game_flow(&self.ctx, rng)?;

        let mut node = Arc::clone(self.tree.root());
        let mut visited = vec![Arc::clone(&node)];
        let mut path: Vec<(Arc<Edge>, Side)> = Vec::new();

        while board.outcome().is_none() {
            let side = acting_side(&board)?;
            let moves = board.enumerate_moves(&self.ctx)?;
            let Some(edge) = self.select_edge(&node, &moves, rng) else {
                break;
            };

            board.apply_move(&self.ctx, edge.mv())?;
            board.advance_game_flow(&self.ctx, rng)?;
            path.push((Arc::clone(&edge), side));

            match self.tree.expand(&edge) {
                Some((child, created)) => {
                    visited.push(Arc::clone(&child));
                    node = child;
                    if created {
                        self.statistics.record_expansion();
                        break;
                    }
                }
                // Tree is full: roll out from here.
                None => break,
            }
        }

        let rewards = match board.outcome() {
            Some(outcome) => outcome.rewards(),
            None => self.simulation.simulate(
                &self.ctx,
                &mut board,
                rng,
                self.config.max_rollout_moves,
            )?,
        };

        for (edge, side) in &path {
            edge.stats().record(rewards[*side]);
        }
        for node in &visited {
            node.record_visit();
        }

        Ok(path.len() as u64)
    }

    /// Pick the edge to descend, creating it if its move is untried.
    fn select_edge(
        &self,
        node: &MCTSNode,
        moves: &[Move],
        rng: &mut RandomSource,
    ) -> Option<Arc<Edge>> {
        let children = node.children();
        let mut untried: SmallVec<[usize; 16]> = SmallVec::new();
        let mut edges = Vec::with_capacity(moves.len());

        for (i, mv) in moves.iter().enumerate() {
            match children.get(mv.choice_key()) {
                Some(edge) => edges.push(edge),
                None => untried.push(i),
            }
        }

        if let Some(&i) = rng.choose(untried.as_slice()) {
            let mv = moves[i];
            return Some(children.get_or_create(mv.choice_key(), mv));
        }

        if edges.is_empty() {
            return None;
        }
        let snapshots: Vec<EdgeSnapshot> = edges.iter().map(|edge| edge.stats().snapshot()).collect();
        let i = self.selection.select(node.visits(), &snapshots, &self.config);
        edges.get(i).or_else(|| edges.first()).cloned()
    }

    /// First legal move of the root board built from the configured seed.
    fn fallback_move<I>(&self, initializer: &I) -> Result<Option<Move>, SearchError>
    where
        I: BoardInitializer + ?Sized,
    {
        let mut board = initializer.initialize_board(self.config.seed);
        let mut rng = RandomSource::new(self.config.seed);
        board.advance_game_flow(&self.ctx, &mut rng)?;
        Ok(board.enumerate_moves(&self.ctx)?.first().copied())
    }
}

impl std::fmt::Debug for MCTSController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MCTSController")
            .field("config", &self.config)
            .field("nodes", &self.tree.len())
            .field("runs", &self.runs)
            .finish_non_exhaustive()
    }
}

/// Stop conditions and the first error of one run.
struct RunControl {
    stop: AtomicBool,
    deadline: Option<Instant>,
    iteration_cap: Option<u64>,
    claimed: AtomicU64,
    max_depth: AtomicU64,
    error: Mutex<Option<SearchError>>,
}

impl RunControl {
    fn new(start: Instant, budget: SearchBudget) -> Self {
        Self {
            stop: AtomicBool::new(false),
            deadline: budget.time.map(|limit| start + limit),
            iteration_cap: budget.iterations,
            claimed: AtomicU64::new(0),
            max_depth: AtomicU64::new(0),
            error: Mutex::new(None),
        }
    }

    fn should_stop(&self) -> bool {
        self.stop.load(Ordering::Acquire)
            || self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }

    fn stop(&self) {
        self.stop.store(true, Ordering::Release);
    }

    /// Reserve one pass against the iteration cap.
    fn claim_pass(&self) -> bool {
        match self.iteration_cap {
            Some(cap) => self.claimed.fetch_add(1, Ordering::AcqRel) < cap,
            None => true,
        }
    }

    /// Keep the first error and stop everyone.
    fn fail(&self, err: SearchError) {
        let mut slot = self.error.lock();
        if slot.is_none() {
            *slot = Some(err);
        }
        self.stop();
    }
}
