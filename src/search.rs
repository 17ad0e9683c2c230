//! Constrained path search over candidate venues.
//!
//! Depth-first backtracking: from a start venue, extend the path along the
//! current venue's neighbor list (nearest first), pruning branches that
//! arrive at a closed venue or run out of time, and stop at the first path
//! that meets the venue-count bounds, includes every required venue and
//! covers every criterion. This is a satisficing search: the first feasible
//! path wins, not the shortest one.
//!
//! Each branch owns a copy of its path, so siblings never observe each
//! other's partial state.

use chrono::{Duration, NaiveDateTime};
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::criteria::{CriterionSet, all_covered};
use crate::hours::WeeklyHours;
use crate::matrix::Neighbor;

/// Bounds and timing for one search.
#[derive(Debug, Clone)]
pub struct SearchParams {
    /// Maximum elapsed minutes at the last arrival.
    pub time_budget_minutes: u32,
    /// Minutes spent at each venue before moving on.
    pub dwell_minutes: u32,
    /// Wall-clock arrival at the first venue.
    pub start_time: NaiveDateTime,
    pub min_venues: usize,
    pub max_venues: usize,
    /// Candidate indices that every returned path must contain.
    pub required: Vec<usize>,
}

/// How the driver walks the start candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    #[default]
    Sequential,
    /// Start candidates are searched on the rayon pool. The lowest start
    /// index that succeeds still wins, so results match `Sequential`.
    Parallel,
}

/// Everything the search reads. Immutable for the duration of a search.
#[derive(Debug, Clone)]
pub struct SearchInput {
    neighbors: Vec<Vec<Neighbor>>,
    hours: Vec<WeeklyHours>,
    criteria: Vec<CriterionSet>,
    params: SearchParams,
}

/// A successful search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Candidate indices in visiting order.
    pub path: Vec<usize>,
    /// Elapsed minutes at which each venue of `path` was reached.
    pub arrivals: Vec<u32>,
    pub start_index: usize,
    /// Frames explored from the winning start.
    pub frames_visited: usize,
}

impl SearchOutcome {
    pub fn elapsed_minutes(&self) -> u32 {
        self.arrivals.last().copied().unwrap_or(0)
    }
}

#[derive(Debug, Clone)]
struct SearchFrame {
    path: Vec<usize>,
    arrivals: Vec<u32>,
    elapsed: u32,
    required_met: bool,
    criteria_met: bool,
}

impl SearchFrame {
    fn start(index: usize) -> Self {
        Self {
            path: vec![index],
            arrivals: vec![0],
            elapsed: 0,
            required_met: false,
            criteria_met: false,
        }
    }

    fn extend(&self, neighbor: &Neighbor, dwell_minutes: u32) -> Self {
        let elapsed = self
            .elapsed
            .saturating_add(dwell_minutes)
            .saturating_add(neighbor.minutes);

        let mut path = Vec::with_capacity(self.path.len() + 1);
        path.extend_from_slice(&self.path);
        path.push(neighbor.index);

        let mut arrivals = Vec::with_capacity(self.arrivals.len() + 1);
        arrivals.extend_from_slice(&self.arrivals);
        arrivals.push(elapsed);

        Self {
            path,
            arrivals,
            elapsed,
            required_met: self.required_met,
            criteria_met: self.criteria_met,
        }
    }

    fn visits(&self, index: usize) -> bool {
        self.path.contains(&index)
    }
}

impl SearchInput {
    /// `neighbors`, `hours` and the members of `criteria` are all indexed by
    /// candidate position.
    pub fn new(
        neighbors: Vec<Vec<Neighbor>>,
        hours: Vec<WeeklyHours>,
        criteria: Vec<CriterionSet>,
        params: SearchParams,
    ) -> Self {
        Self {
            neighbors,
            hours,
            criteria,
            params,
        }
    }

    pub fn params(&self) -> &SearchParams {
        &self.params
    }

    pub fn candidate_count(&self) -> usize {
        self.hours.len()
    }

    /// Search paths beginning at `start`. `None` when no feasible path exists.
    pub fn search_from(&self, start: usize) -> Option<Vec<usize>> {
        self.outcome_from(start).map(|outcome| outcome.path)
    }

    fn outcome_from(&self, start: usize) -> Option<SearchOutcome> {
        if start >= self.candidate_count() {
            return None;
        }

        let mut frames_visited = 0;
        let found = self.explore(SearchFrame::start(start), &mut frames_visited);
        trace!(start_index = start, frames_visited, found = found.is_some(), "searched start");

        found.map(|frame| SearchOutcome {
            path: frame.path,
            arrivals: frame.arrivals,
            start_index: start,
            frames_visited,
        })
    }

    fn explore(&self, mut frame: SearchFrame, frames_visited: &mut usize) -> Option<SearchFrame> {
        *frames_visited += 1;
        let params = &self.params;
        let current = *frame.path.last()?;

        let arrival = params.start_time + Duration::minutes(i64::from(frame.elapsed));
        if !self.hours.get(current)?.is_open_at(arrival) {
            return None;
        }

        if frame.elapsed > params.time_budget_minutes {
            return None;
        }

        let at_budget = frame.elapsed == params.time_budget_minutes;
        if at_budget && frame.path.len() < params.min_venues {
            return None;
        }

        if frame.path.len() >= params.min_venues {
            // Satisfaction is monotonic along a path, so a flag proven by an
            // ancestor is never re-checked.
            if !frame.required_met {
                frame.required_met = params.required.iter().all(|index| frame.visits(*index));
            }
            if !frame.criteria_met {
                frame.criteria_met = all_covered(&self.criteria, &frame.path);
            }
            if frame.required_met && frame.criteria_met {
                return Some(frame);
            }
        }

        if frame.path.len() >= params.max_venues || at_budget {
            return None;
        }

        for neighbor in self.neighbors.get(current)? {
            if frame.visits(neighbor.index) {
                continue;
            }
            let child = frame.extend(neighbor, params.dwell_minutes);
            if let Some(found) = self.explore(child, frames_visited) {
                return Some(found);
            }
        }

        None
    }
}

/// Try every start candidate in index order; the first one that yields a
/// path wins. `None` means the search was exhausted.
pub fn find_route(input: &SearchInput, mode: SearchMode) -> Option<SearchOutcome> {
    let starts = 0..input.candidate_count();

    let outcome = match mode {
        SearchMode::Sequential => starts.clone().find_map(|start| input.outcome_from(start)),
        SearchMode::Parallel => starts
            .into_par_iter()
            .find_map_first(|start| input.outcome_from(start)),
    };

    match &outcome {
        Some(found) => debug!(
            start_index = found.start_index,
            venues = found.path.len(),
            elapsed_minutes = found.elapsed_minutes(),
            frames_visited = found.frames_visited,
            "route search succeeded"
        ),
        None => debug!(
            candidates = input.candidate_count(),
            "route search exhausted every start"
        ),
    }

    outcome
}
