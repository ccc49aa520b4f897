use crate::domain::exercise::Exercise;
use time::Date;

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct ExerciseRecord {
    pub description: String,
    pub duration: f64,
    pub date: Date,
}

impl From<ExerciseRecord> for Exercise {
    fn from(record: ExerciseRecord) -> Self {
        Self { description: record.description, duration: record.duration, date: record.date }
    }
}
