use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Workshop {
    pub id: i32,
    pub name: String,
    pub kind: String,
}
