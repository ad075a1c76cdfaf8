use std::{
    fmt::Display,
    time::{Duration, Instant},
};

/// Bookkeeping for a single shortest-path search.
#[derive(Debug, Default)]
pub struct SearchStats {
    pub nodes_settled: usize,
    pub duration: Option<Duration>,
    start_time: Option<Instant>,
}

impl SearchStats {
    pub fn init(&mut self) {
        self.nodes_settled = 0;
        self.start_timer();
    }

    fn start_timer(&mut self) {
        self.start_time = Some(Instant::now());
    }

    pub fn finish(&mut self) {
        if let Some(start_time) = self.start_time {
            self.duration = Some(start_time.elapsed());
        }
    }
}

impl Display for SearchStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Stats: {} nodes settled in {:?}",
            self.nodes_settled, self.duration
        )
    }
}

/// Bookkeeping for a single planning call.
#[derive(Debug, Default)]
pub struct PlanStats {
    pub orderings_considered: usize,
    pub duration: Option<Duration>,
    start_time: Option<Instant>,
}

impl PlanStats {
    pub fn init(&mut self) {
        self.orderings_considered = 0;
        self.start_time = Some(Instant::now());
    }

    pub fn finish(&mut self) {
        if let Some(start_time) = self.start_time {
            self.duration = Some(start_time.elapsed());
        }
    }
}

impl Display for PlanStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Stats: {} orderings considered in {:?}",
            self.orderings_considered, self.duration
        )
    }
}
