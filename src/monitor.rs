use crate::collectors::SnapshotReader;
use crate::models::row::Row;
use crate::models::snapshot::Snapshot;
use crate::rates;
use crate::shutdown::StopFlag;
use anyhow::Result;
use chrono::{DateTime, Local};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Longest single sleep while waiting for the next tick, so a stop request
/// is noticed promptly.
const WAIT_SLICE: Duration = Duration::from_millis(100);

/// Wait used when the next tick lies beyond what `Instant` can represent.
const MAX_WAIT: Duration = Duration::from_secs(86_400);

/// Rows produced by one cycle, in display order.
#[derive(Debug, Clone)]
pub struct RowSet {
    pub rows:     Vec<Row>,
    pub taken_at: DateTime<Local>,
    pub cycle:    u64,
    pub interval: Duration,
}

/// Consumer of row sets: a terminal view, a text printer, a JSON stream.
pub trait RowSink {
    fn emit(&mut self, set: &RowSet) -> Result<()>;

    /// Block until `deadline` or until a stop is requested.
    fn wait_until(&mut self, deadline: Instant, stop: &StopFlag) -> Result<()> {
        while !stop.is_requested() {
            let now = Instant::now();
            if now >= deadline { break; }
            std::thread::sleep((deadline - now).min(WAIT_SLICE));
        }
        Ok(())
    }
}

/// Polls snapshots, pairs each with the one before it and turns the pair
/// into rows. Holds the previous snapshot and the row order, nothing else.
#[derive(Debug)]
pub struct Monitor {
    interval:   Duration,
    max_cycles: Option<u64>,
    previous:   Option<Snapshot>,
    /// Mount points in display order.
    order:      Vec<String>,
    cycle:      u64,
}

impl Monitor {
    pub fn new(interval: Duration) -> Self {
        Self { interval, max_cycles: None, previous: None, order: Vec::new(), cycle: 0 }
    }

    /// Stop after `n` cycles instead of running until told to stop.
    pub fn with_max_cycles(mut self, n: Option<u64>) -> Self {
        self.max_cycles = n;
        self
    }

    pub fn run<R: SnapshotReader, S: RowSink>(
        &mut self,
        reader: &mut R,
        sink: &mut S,
        stop: &StopFlag,
    ) -> Result<()> {
        info!("monitor loop starting, interval {:?}", self.interval);
        let mut next_tick = Instant::now();

        while !stop.is_requested() {
            let set = self.advance(reader.read());
            sink.emit(&set)?;
            if self.max_cycles.is_some_and(|n| set.cycle >= n) { break; }

            next_tick = next_tick_after(next_tick, self.interval, Instant::now());
            sink.wait_until(next_tick, stop)?;
        }
        info!("monitor loop stopped after {} cycle(s)", self.cycle);
        Ok(())
    }

    /// Pair `current` with the retained snapshot and build this cycle's rows.
    /// `current` then becomes the retained snapshot.
    pub fn advance(&mut self, current: Snapshot) -> RowSet {
        self.cycle += 1;
        self.reconcile_order(&current);

        let previous = self.previous.as_ref();
        let rows: Vec<Row> = self.order.iter()
            .filter_map(|mount| current.capacities.get(mount))
            .map(|cap| {
                let rates = current.device(&cap.io_device).and_then(|curr| {
                    let prev = previous.and_then(|p| p.device(&cap.io_device));
                    rates::compute_between(prev, curr)
                });
                Row::new(cap, rates)
            })
            .collect();

        let set = RowSet {
            rows,
            taken_at: current.taken_at,
            cycle:    self.cycle,
            interval: self.interval,
        };
        self.previous = Some(current);
        set
    }

    /// Drop mounts that vanished, append new ones (sorted among themselves),
    /// and leave the relative order of the rest untouched.
    fn reconcile_order(&mut self, current: &Snapshot) {
        self.order.retain(|mount| {
            let present = current.capacities.contains_key(mount);
            if !present { info!(mount = %mount, "mount point gone"); }
            present
        });
        let fresh: Vec<String> = current.capacities.keys()
            .filter(|m| !self.order.contains(m))
            .cloned()
            .collect();
        for mount in &fresh {
            if self.cycle > 1 { info!(mount = %mount, "mount point appeared"); }
        }
        self.order.extend(fresh);
    }
}

/// First tick after `tick` that is still ahead of `now`. Ticks missed by a
/// slow read or a suspend are skipped, not replayed.
fn next_tick_after(tick: Instant, interval: Duration, now: Instant) -> Instant {
    if interval.is_zero() { return now; }
    let mut next = tick;
    let mut skipped = 0u64;
    let ahead = loop {
        match next.checked_add(interval) {
            Some(t) if t > now => break t,
            Some(t) => { next = t; skipped += 1; }
            None => {
                debug!("interval {:?} overflows the clock, waiting {:?}", interval, MAX_WAIT);
                return now.checked_add(MAX_WAIT).unwrap_or(now);
            }
        }
    };
    if skipped > 0 {
        debug!("fell behind schedule, skipped {} tick(s)", skipped);
    }
    ahead
}
