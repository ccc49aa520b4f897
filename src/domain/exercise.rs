use crate::domain::user::User;
use time::Date;

/// One logged exercise. Entries are owned by a single user and never change
/// once appended.
#[derive(Debug, Clone, PartialEq)]
pub struct Exercise {
    pub(crate) description: String,
    /// Minutes.
    pub(crate) duration: f64,
    pub(crate) date: Date,
}

impl Exercise {
    #[must_use]
    pub fn new(description: String, duration: f64, date: Date) -> Self {
        Self { description, duration, date }
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub const fn duration(&self) -> f64 {
        self.duration
    }

    #[must_use]
    pub const fn date(&self) -> Date {
        self.date
    }
}

/// A user together with a view of their log.
#[derive(Debug, Clone)]
pub struct ExerciseLog {
    pub(crate) user: User,
    pub(crate) entries: Vec<Exercise>,
}

impl ExerciseLog {
    #[must_use]
    pub fn entries(&self) -> &[Exercise] {
        &self.entries
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.entries.len()
    }
}

/// Optional bounds applied when reading a log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogQuery {
    pub from: Option<Date>,
    pub to: Option<Date>,
    pub limit: Option<usize>,
}

impl LogQuery {
    /// Narrows a log kept in insertion order.
    ///
    /// The limit is taken from the head of the log before the date bounds are
    /// checked, so fewer than `limit` entries may come back even when later
    /// entries fall inside the range. Order is never changed.
    #[must_use]
    pub fn apply(&self, mut entries: Vec<Exercise>) -> Vec<Exercise> {
        if let Some(limit) = self.limit {
            entries.truncate(limit);
        }
        entries.retain(|entry| self.includes(entry.date));
        entries
    }

    /// Both bounds are inclusive.
    #[must_use]
    pub fn includes(&self, date: Date) -> bool {
        match (self.from, self.to) {
            (Some(from), Some(to)) => from <= date && date <= to,
            (Some(from), None) => date >= from,
            (None, Some(to)) => date <= to,
            (None, None) => true,
        }
    }
}
