use std::{iter::Sum, ops::Add};

use serde::Serialize;

use super::TranslationStatus;

/// Message counts per completion status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub finished: usize,
    pub unfinished: usize,
    pub obsolete: usize,
    pub vanished: usize,
}

impl CatalogStats {
    pub fn record(&mut self, status: TranslationStatus) {
        match status {
            TranslationStatus::Finished => self.finished += 1,
            TranslationStatus::Unfinished => self.unfinished += 1,
            TranslationStatus::Obsolete => self.obsolete += 1,
            TranslationStatus::Vanished => self.vanished += 1,
        }
    }

    /// Messages still present in the application sources.
    pub fn active(&self) -> usize {
        self.finished + self.unfinished
    }

    pub fn total(&self) -> usize {
        self.active() + self.obsolete + self.vanished
    }

    /// Share of active messages that are finished. An empty catalog is complete.
    pub fn completion_percent(&self) -> f64 {
        let active = self.active();
        if active == 0 {
            100.0
        } else {
            self.finished as f64 * 100.0 / active as f64
        }
    }
}

impl Add for CatalogStats {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            finished: self.finished + rhs.finished,
            unfinished: self.unfinished + rhs.unfinished,
            obsolete: self.obsolete + rhs.obsolete,
            vanished: self.vanished + rhs.vanished,
        }
    }
}

impl Sum for CatalogStats {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}
