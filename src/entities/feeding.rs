use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A single feeding row. `date` and `time` hold packed `YYYYMMDD` / `HHMM`
/// integers, see [`crate::utils::packed`].
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "feedings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(indexed)]
    pub date: i32,
    pub time: i32,
    pub breast: i32,
    pub additions: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
