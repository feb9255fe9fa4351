//! Profile entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use pharmacy_core::domain::{Profile, Role};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "profiles")]
pub struct Model {
    /// Same id as the owning `users` row.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub email: String,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    /// Free-form in the table; unknown values read back as no role.
    pub role: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::credential::Entity",
        from = "Column::Id",
        to = "super::credential::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Credential,
    #[sea_orm(has_many = "super::post::Entity")]
    Post,
}

impl Related<super::credential::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Credential.def()
    }
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Profile {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            full_name: model.full_name,
            avatar_url: model.avatar_url,
            role: model.role.as_deref().and_then(Role::parse),
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<Profile> for ActiveModel {
    fn from(profile: Profile) -> Self {
        Self {
            id: Set(profile.id),
            email: Set(profile.email),
            full_name: Set(profile.full_name),
            avatar_url: Set(profile.avatar_url),
            role: Set(profile.role.map(|r| r.as_str().to_string())),
            created_at: Set(profile.created_at.into()),
            updated_at: Set(profile.updated_at.into()),
        }
    }
}
