use common::SubmissionStatus;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "submission")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(column_type = "Text")]
    pub code: String,
    /// Canonical language name (e.g., "cpp", "python").
    pub language: String,
    /// Pending until judged, then exactly one of:
    /// Accepted, WrongAnswer, RuntimeError.
    pub status: SubmissionStatus,

    pub test_cases_total: i32,
    pub test_cases_passed: i32,
    /// Summed accepted-case runtime in milliseconds; NULL until judged.
    pub runtime: Option<i32>,
    /// Peak accepted-case memory in kilobytes; NULL until judged.
    pub memory: Option<i32>,
    pub error_message: Option<String>,

    pub user_id: i32,
    #[sea_orm(belongs_to, from = "user_id", to = "id")]
    pub user: HasOne<super::user::Entity>,

    pub problem_id: i32,
    #[sea_orm(belongs_to, from = "problem_id", to = "id")]
    pub problem: HasOne<super::problem::Entity>,

    pub created_at: DateTimeUtc,
    pub judged_at: Option<DateTimeUtc>,
}

impl ActiveModelBehavior for ActiveModel {}
