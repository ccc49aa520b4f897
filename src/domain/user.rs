use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub(crate) id: Uuid,
    pub(crate) username: String,
}
