//! Nested wall clock timers for profiling a solve.
//!
//! Timers are identified by static string keys and nest according to the
//! order in which they are started.  The [`timeit!`] macro wraps a block in
//! a named timer, and [`notimeit!`] pauses every running timer for the
//! duration of a block, e.g. while printing progress output.

use std::collections::HashMap;
use std::io::Write;
use std::time::{Duration, Instant};

#[derive(Debug, Default)]
struct InnerTimer {
    start: Option<Instant>,
    elapsed: Duration,
    children: HashMap<&'static str, InnerTimer>,
}

impl InnerTimer {
    fn start(&mut self) {
        self.start = Some(Instant::now());
    }

    fn stop(&mut self) {
        if let Some(instant) = self.start.take() {
            self.elapsed += instant.elapsed();
        }
    }

    // bank the elapsed time of an active timer and
    // its children without marking them as stopped
    fn suspend(&mut self) {
        if let Some(instant) = self.start {
            self.elapsed += instant.elapsed();
            self.children.values_mut().for_each(|t| t.suspend());
        }
    }

    fn resume(&mut self) {
        if self.start.is_some() {
            self.start = Some(Instant::now());
            self.children.values_mut().for_each(|t| t.resume());
        }
    }

    fn print(&self, out: &mut dyn Write, key: &str, depth: usize) -> std::io::Result<()> {
        let tabs = format!("{: <1$}", "", 4 * depth);
        writeln!(out, "{}{} : {:?}", tabs, key, self.elapsed)?;
        let mut keys: Vec<_> = self.children.keys().collect();
        keys.sort();
        for key in keys {
            self.children[key].print(out, key, depth + 1)?;
        }
        Ok(())
    }
}

/// A collection of nested timers
#[derive(Default, Debug)]
pub struct Timers {
    stack: Vec<&'static str>,
    root: HashMap<&'static str, InnerTimer>,
}

impl Timers {
    fn active_children(&mut self) -> &mut HashMap<&'static str, InnerTimer> {
        let mut children = &mut self.root;
        for key in self.stack.iter() {
            children = &mut children.entry(*key).or_default().children;
        }
        children
    }

    /// Clear a top level timer and everything nested beneath it
    pub fn reset_timer(&mut self, key: &'static str) {
        self.root.insert(key, InnerTimer::default());
    }

    /// Start a timer nested within the currently running one
    pub fn start_as_current(&mut self, key: &'static str) {
        self.active_children().entry(key).or_default().start();
        self.stack.push(key);
    }

    /// Stop the most recently started timer
    pub fn stop_current(&mut self) {
        if let Some(key) = self.stack.pop() {
            if let Some(timer) = self.active_children().get_mut(key) {
                timer.stop();
            }
        }
    }

    pub fn suspend(&mut self) {
        self.root.values_mut().for_each(|t| t.suspend());
    }

    pub fn resume(&mut self) {
        self.root.values_mut().for_each(|t| t.resume());
    }

    /// Elapsed time of a top level timer, or zero if it has never run.
    /// A running timer includes time up to its last suspension only.
    pub fn elapsed(&self, key: &'static str) -> Duration {
        self.root.get(key).map_or(Duration::ZERO, |t| t.elapsed)
    }

    /// Elapsed time of a top level timer including the time
    /// since it was last started or resumed.
    pub fn elapsed_live(&self, key: &'static str) -> Duration {
        self.root.get(key).map_or(Duration::ZERO, |t| {
            t.elapsed + t.start.map_or(Duration::ZERO, |s| s.elapsed())
        })
    }

    pub fn total_time(&self) -> Duration {
        self.root
            .values()
            .fold(Duration::ZERO, |acc, t| acc + t.elapsed)
    }

    /// Write the timer tree to `out`, one line per timer
    pub fn print(&self, out: &mut dyn Write) -> std::io::Result<()> {
        let mut keys: Vec<_> = self.root.keys().collect();
        keys.sort();
        for key in keys {
            self.root[key].print(out, key, 0)?;
        }
        Ok(())
    }
}

macro_rules! timeit {
    ($timer:ident => $key:literal; $($tt:tt)+) => {

        $timer.start_as_current($key);
        $(
            $tt
        )+
        $timer.stop_current();
    }
}
pub(crate) use timeit;

macro_rules! notimeit {
    ($timer:ident; $($tt:tt)+) => {

        $timer.suspend();
        $(
            $tt
        )+
        $timer.resume();
    }
}
pub(crate) use notimeit;
