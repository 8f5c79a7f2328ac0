use std::time::Instant;

use crate::evaluation::EvaluationOptions;
use crate::forbidden_cache::ForbiddenCache;
use crate::trasposition::TTable;

use super::history::HistoryTable;
use super::killers::KillerTable;

/// Search instrumentation (spec.md §3's `SearchContext` "search statistics"
/// field). Reset for every top-level search.
#[derive(Debug, Default, Clone, Copy)]
pub struct SearchStats {
    pub nodes: u64,
    pub tt_hits: u64,
    pub tt_cutoffs: u64,
    pub beta_cutoffs: u64,
    pub null_move_cutoffs: u64,
    pub futility_prunes: u64,
    pub forbidden_checks: u64,
    pub board_copies: u64,
    pub threat_checks: u64,
    pub eval_calls: u64,
}

/// Every node-local piece of state a search needs (spec.md §3's
/// `SearchContext`): the long-lived TT and forbidden cache (borrowed from
/// the owning `Engine`), move-ordering tables that reset every search, the
/// evaluation option bundle, statistics, and the dual-deadline / node-budget
/// cancellation state checked every 4th node (spec.md §5).
pub struct SearchContext<'a> {
    pub tt: &'a mut TTable,
    pub forbidden_cache: &'a mut ForbiddenCache,
    pub killers: KillerTable,
    pub history: HistoryTable,
    pub eval_options: EvaluationOptions,
    pub stats: SearchStats,

    soft_deadline: Instant,
    absolute_deadline: Instant,
    node_budget: Option<u64>,

    pub soft_deadline_exceeded: bool,
    pub absolute_deadline_exceeded: bool,
    pub node_budget_exceeded: bool,
}

impl<'a> SearchContext<'a> {
    pub fn new(
        tt: &'a mut TTable,
        forbidden_cache: &'a mut ForbiddenCache,
        eval_options: EvaluationOptions,
        soft_deadline: Instant,
        absolute_deadline: Instant,
        node_budget: Option<u64>,
    ) -> Self {
        Self {
            tt,
            forbidden_cache,
            killers: KillerTable::new(),
            history: HistoryTable::new(),
            eval_options,
            stats: SearchStats::default(),
            soft_deadline,
            absolute_deadline,
            node_budget,
            soft_deadline_exceeded: false,
            absolute_deadline_exceeded: false,
            node_budget_exceeded: false,
        }
    }

    /// Entry bookkeeping for one recursion level (spec.md §4.8 step 1):
    /// bumps the node counter, checks the node budget on every node, and
    /// the wall-clock deadlines every 4th node.
    pub fn enter_node(&mut self) {
        self.stats.nodes += 1;

        if let Some(budget) = self.node_budget {
            if self.stats.nodes >= budget {
                self.node_budget_exceeded = true;
            }
        }

        if self.stats.nodes % 4 == 0 {
            let now = Instant::now();
            if now >= self.soft_deadline {
                self.soft_deadline_exceeded = true;
            }
            if now >= self.absolute_deadline {
                self.absolute_deadline_exceeded = true;
            }
        }
    }

    pub fn interrupted(&self) -> bool {
        self.soft_deadline_exceeded || self.absolute_deadline_exceeded || self.node_budget_exceeded
    }

    pub fn soft_deadline(&self) -> Instant {
        self.soft_deadline
    }

    pub fn absolute_deadline(&self) -> Instant {
        self.absolute_deadline
    }
}
