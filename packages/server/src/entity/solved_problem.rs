use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One entry of a user's solved set. Append-only; the composite key makes
/// repeat accepted submissions collapse onto the existing row.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "solved_problem")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub user_id: i32,
    #[sea_orm(primary_key)]
    pub problem_id: i32,
    #[sea_orm(belongs_to, from = "user_id", to = "id")]
    pub user: Option<super::user::Entity>,
    #[sea_orm(belongs_to, from = "problem_id", to = "id")]
    pub problem: Option<super::problem::Entity>,

    pub solved_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
