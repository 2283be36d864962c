//! Pass orchestration: parallel producers, join, freeze, reconcile.

use std::time::Instant;

use crossbeam_channel::bounded;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use rewind_core::errors::PassError;
use rewind_core::types::Finding;
use rewind_core::{CancellationToken, CollectSink, DiagnosticSink, RewindConfig, SemanticModel};

use crate::entry_points::EntryPointScanner;
use crate::reachability::ReachabilitySet;
use crate::reconcile::Reconciler;
use crate::rules::{ObserverSet, RuleRegistry};

/// Counters from one analysis pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassStats {
    pub declarations: usize,
    pub entry_points: usize,
    pub reachable_symbols: usize,
    pub operations: usize,
    /// Rule matches recorded program-wide, before reachability filtering.
    pub candidates: usize,
    pub findings: usize,
    pub duration_ms: u64,
}

/// Everything a pass produced: the findings plus its counters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassReport {
    pub findings: Vec<Finding>,
    pub stats: PassStats,
}

enum WorkerOutcome {
    Entries(usize),
    Operations(usize),
}

/// One configured analysis pass over one program snapshot.
///
/// The pass runs two producers: the entry scan (marker discovery plus
/// call-closure exploration) and the operation walk (rule matching).
/// Both run to completion before the reachability set is frozen and the
/// reconciler emits findings, so rule observation never needs to know
/// whether reachability has caught up with it.
pub struct AnalysisPass<'a, M: SemanticModel + ?Sized> {
    model: &'a M,
    config: &'a RewindConfig,
    token: CancellationToken,
}

impl<'a, M: SemanticModel + ?Sized> AnalysisPass<'a, M> {
    pub fn new(model: &'a M, config: &'a RewindConfig) -> Self {
        Self {
            model,
            config,
            token: CancellationToken::new(),
        }
    }

    /// Use an externally controlled cancellation token.
    pub fn with_token(mut self, token: CancellationToken) -> Self {
        self.token = token;
        self
    }

    /// Run the pass, reporting findings into `sink`.
    ///
    /// Any producer error aborts the pass; partially accumulated state is
    /// dropped without reconciliation, so a failed pass emits nothing.
    pub fn execute(&self, sink: &mut dyn DiagnosticSink) -> Result<PassStats, PassError> {
        let started = Instant::now();
        if self.token.is_cancelled() {
            return Err(PassError::Cancelled);
        }

        let registry = RuleRegistry::from_config(&self.config.rules)?;
        let marker = self.config.pass.effective_entry_marker();
        let parallel = self.config.pass.effective_parallel();
        debug!(marker, rules = registry.len(), parallel, "pass started");

        let reachable = ReachabilitySet::new();
        let observers = ObserverSet::new(&registry);

        let entry_points;
        let operations_walked;
        if parallel {
            let model = self.model;
            let token = &self.token;
            let reachable_ref = &reachable;
            let observers_ref = &observers;

            // Producers hand their outcome over a channel; draining it
            // after the scope joins is the explicit completion barrier.
            let (outcome_tx, outcome_rx) = bounded::<Result<WorkerOutcome, PassError>>(2);
            rayon::scope(|scope| {
                let entry_tx = outcome_tx.clone();
                scope.spawn(move |_| {
                    let scanner = EntryPointScanner::new(model, marker, token);
                    let outcome = scanner.scan(reachable_ref).map(WorkerOutcome::Entries);
                    let _ = entry_tx.send(outcome);
                });
                let walk_tx = outcome_tx.clone();
                scope.spawn(move |_| {
                    let outcome = walk_operations(model, observers_ref, token, true)
                        .map(WorkerOutcome::Operations);
                    let _ = walk_tx.send(outcome);
                });
            });
            drop(outcome_tx);

            let mut entries = 0;
            let mut operations = 0;
            for outcome in outcome_rx.iter() {
                match outcome? {
                    WorkerOutcome::Entries(count) => entries = count,
                    WorkerOutcome::Operations(count) => operations = count,
                }
            }
            entry_points = entries;
            operations_walked = operations;
        } else {
            let scanner = EntryPointScanner::new(self.model, marker, &self.token);
            entry_points = scanner.scan(&reachable)?;
            operations_walked = walk_operations(self.model, &observers, &self.token, false)?;
        }

        let candidates = observers.candidate_count();
        let frozen = reachable.freeze();
        let reachable_symbols = frozen.len();
        let findings = Reconciler::new(frozen).reconcile(observers.drain(), sink);

        let stats = PassStats {
            declarations: self.model.declarations().len(),
            entry_points,
            reachable_symbols,
            operations: operations_walked,
            candidates,
            findings,
            duration_ms: started.elapsed().as_millis() as u64,
        };
        info!(
            entry_points = stats.entry_points,
            reachable = stats.reachable_symbols,
            candidates = stats.candidates,
            findings = stats.findings,
            duration_ms = stats.duration_ms,
            "pass complete"
        );
        Ok(stats)
    }

    /// Run the pass, buffering findings into a report.
    pub fn run(&self) -> Result<PassReport, PassError> {
        let mut sink = CollectSink::new();
        let stats = self.execute(&mut sink)?;
        Ok(PassReport {
            findings: sink.into_findings(),
            stats,
        })
    }
}

/// Walk every operation site once, feeding each through the observer set.
fn walk_operations<M: SemanticModel + ?Sized>(
    model: &M,
    observers: &ObserverSet<'_>,
    token: &CancellationToken,
    parallel: bool,
) -> Result<usize, PassError> {
    let operations = model.operations();
    if observers.rules().is_empty() || operations.is_empty() {
        return Ok(operations.len());
    }
    if parallel {
        operations.par_iter().try_for_each(|&operation| {
            if token.is_cancelled() {
                return Err(PassError::Cancelled);
            }
            observers.observe(model, operation).map_err(PassError::from)
        })?;
    } else {
        for &operation in operations {
            if token.is_cancelled() {
                return Err(PassError::Cancelled);
            }
            observers.observe(model, operation)?;
        }
    }
    Ok(operations.len())
}

/// Analyze `model` under `config`, returning every finding.
///
/// The convenience surface over [`AnalysisPass`]: fresh cancellation
/// token, findings buffered in memory, counters discarded.
pub fn run_pass<M: SemanticModel + ?Sized>(
    model: &M,
    config: &RewindConfig,
) -> Result<Vec<Finding>, PassError> {
    AnalysisPass::new(model, config)
        .run()
        .map(|report| report.findings)
}
