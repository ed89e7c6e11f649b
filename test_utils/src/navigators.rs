//! Navigators that record or script their answers.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use glam::Vec2;
use strider::{DirectNavigator, NavigationError, Navigator};

/// Open-floor navigator that counts how often it was queried.
#[derive(Debug, Default)]
pub struct CountingNavigator {
    queries: AtomicUsize,
}

impl CountingNavigator {
    /// Number of queries answered so far.
    ///
    /// # Examples
    /// ```
    /// use glam::Vec2;
    /// use strider::Navigator;
    /// use test_utils::CountingNavigator;
    /// let navigator = CountingNavigator::default();
    /// navigator.query_path(Vec2::ZERO, Vec2::ONE).expect("open floor");
    /// assert_eq!(navigator.queries(), 1);
    /// ```
    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

impl Navigator for CountingNavigator {
    fn query_path(&self, origin: Vec2, goal: Vec2) -> Result<Vec<Vec2>, NavigationError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        DirectNavigator.query_path(origin, goal)
    }
}

/// Answers queries from a script, then falls back to open floor.
///
/// Every query is logged with its origin and goal.
#[derive(Debug, Default)]
pub struct ScriptedNavigator {
    script: Mutex<VecDeque<Result<Vec<Vec2>, NavigationError>>>,
    log: Mutex<Vec<(Vec2, Vec2)>>,
}

impl ScriptedNavigator {
    /// Creates a navigator answering with `answers` in order.
    pub fn new(answers: impl IntoIterator<Item = Result<Vec<Vec2>, NavigationError>>) -> Self {
        Self {
            script: Mutex::new(answers.into_iter().collect()),
            log: Mutex::default(),
        }
    }

    /// Creates a navigator that fails the first `count` queries.
    pub fn failing(count: usize) -> Self {
        Self::new((0..count).map(|_| {
            Err(NavigationError::NoPathFound {
                origin: Vec2::ZERO,
                goal: Vec2::ZERO,
            })
        }))
    }

    /// Origins and goals of every query so far.
    ///
    /// # Panics
    /// Panics if a previous query panicked while holding the log.
    pub fn queries(&self) -> Vec<(Vec2, Vec2)> {
        self.log.lock().expect("query log").clone()
    }
}

impl Navigator for ScriptedNavigator {
    fn query_path(&self, origin: Vec2, goal: Vec2) -> Result<Vec<Vec2>, NavigationError> {
        self.log.lock().expect("query log").push((origin, goal));
        let next = self.script.lock().expect("script").pop_front();
        next.unwrap_or_else(|| DirectNavigator.query_path(origin, goal))
    }
}
