use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Identity provider account key. Unique; the creation race backstop.
    #[sea_orm(unique)]
    pub subject_id: String,
    #[sea_orm(unique)]
    pub email: String,
    pub username: String,
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub college: Option<String>,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,

    // Locally managed admin flag, independent of the token claim
    pub is_admin: bool,

    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
