pub mod exercise;
pub mod user;

pub(crate) use exercise::ExerciseRecord;
pub(crate) use user::UserRecord;
