//! One play session over a generated level.
//!
//! The session owns the finished grid and is the only place gameplay
//! mutates it: picking up a folder removes it from the room's items.
//! Restarting throws the grid away and generates a fresh one.

use std::collections::BTreeSet;

use log::info;
use rand::Rng;

use crate::config::GeneratorConfig;
use crate::error::GenerationError;
use crate::generator::{generate_with_retries, GeneratedLevel};
use crate::grid::{Coord, Grid, Item};
use crate::rng::level_rng;

#[derive(Debug, Clone)]
pub struct Session {
    config: GeneratorConfig,
    max_attempts: u32,
    level: GeneratedLevel,
    collected: BTreeSet<Coord>,
    restarts: u32,
}

impl Session {
    /// Generate the first level and start collecting.
    pub fn new(config: GeneratorConfig, max_attempts: u32) -> Result<Self, GenerationError> {
        let level = generate_with_retries(&config, max_attempts)?;
        Ok(Self {
            config,
            max_attempts,
            level,
            collected: BTreeSet::new(),
            restarts: 0,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.level.grid
    }

    pub fn level(&self) -> &GeneratedLevel {
        &self.level
    }

    pub fn restarts(&self) -> u32 {
        self.restarts
    }

    /// Pick up the folder in the room at `c`.
    ///
    /// Returns `true` only the first time a folder is taken from that room;
    /// repeated or misdirected pickups change nothing.
    pub fn collect(&mut self, c: Coord) -> bool {
        if !self.level.grid.remove_item(c, Item::RedFolder) {
            return false;
        }
        self.collected.insert(c);
        info!(
            "Collected folder at {} ({} remaining)",
            c,
            self.remaining()
        );
        true
    }

    /// Rooms a folder has been taken from, row-major.
    pub fn collected(&self) -> impl Iterator<Item = Coord> + '_ {
        self.collected.iter().copied()
    }

    /// Folders still lying in the level.
    pub fn remaining(&self) -> usize {
        self.level
            .grid
            .rooms()
            .filter(|r| r.has_item(Item::RedFolder))
            .count()
    }

    pub fn is_complete(&self) -> bool {
        self.remaining() == 0
    }

    /// Discard the level and generate a new one.
    ///
    /// Seeded sessions derive the next seed from the current one, so a
    /// restart sequence replays exactly. On failure the current level is
    /// kept.
    pub fn restart(&mut self) -> Result<(), GenerationError> {
        let mut config = self.config.clone();
        if self.config.seed.is_some() {
            config.seed = self.level.seed.map(|s| level_rng(Some(s)).gen());
        }
        let level = generate_with_retries(&config, self.max_attempts)?;

        self.level = level;
        self.collected.clear();
        self.restarts += 1;
        info!(
            "Session restarted ({} so far), seed {:?}",
            self.restarts, self.level.seed
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(seed: u64) -> Session {
        Session::new(GeneratorConfig::default().with_seed(seed), 5).unwrap()
    }

    fn objective_coords(s: &Session) -> Vec<Coord> {
        s.grid().objectives().map(|r| r.coord).collect()
    }

    #[test]
    fn starts_with_every_folder_in_place() {
        let s = session(1);
        assert_eq!(s.remaining(), 3);
        assert!(!s.is_complete());
        assert_eq!(s.collected().count(), 0);
    }

    #[test]
    fn collecting_is_idempotent() {
        let mut s = session(2);
        let target = objective_coords(&s)[0];
        let before_topology: Vec<_> = s.grid().rooms().map(|r| r.boundaries).collect();

        assert!(s.collect(target));
        let after_first = s.grid().clone();
        assert!(!s.collect(target));
        assert_eq!(s.grid(), &after_first);
        assert_eq!(s.remaining(), 2);

        // pickups never touch boundaries or types
        let after_topology: Vec<_> = s.grid().rooms().map(|r| r.boundaries).collect();
        assert_eq!(before_topology, after_topology);
        assert_eq!(s.grid().objectives().count(), 3);
    }

    #[test]
    fn collecting_elsewhere_does_nothing() {
        let mut s = session(3);
        let start = s.grid().start().unwrap().coord;
        assert!(!s.collect(start));
        assert!(!s.collect(Coord::new(-5, 40)));
        assert_eq!(s.remaining(), 3);
    }

    #[test]
    fn completes_after_all_folders() {
        let mut s = session(4);
        for c in objective_coords(&s) {
            assert!(s.collect(c));
        }
        assert!(s.is_complete());
        assert_eq!(s.collected().count(), 3);
    }

    #[test]
    fn restart_replaces_the_level() {
        let mut s = session(5);
        let first = s.grid().clone();
        let c = objective_coords(&s)[0];
        s.collect(c);

        s.restart().unwrap();
        assert_eq!(s.restarts(), 1);
        assert_eq!(s.remaining(), 3);
        assert_eq!(s.collected().count(), 0);
        assert_ne!(s.grid(), &first);
    }

    #[test]
    fn seeded_restarts_replay() {
        let mut a = session(6);
        let mut b = session(6);
        a.restart().unwrap();
        b.restart().unwrap();
        assert_eq!(a.grid(), b.grid());
    }
}
