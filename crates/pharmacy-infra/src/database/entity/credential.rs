//! Sign-in credential entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use pharmacy_core::domain::Credential;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::profile::Entity")]
    Profile,
}

impl Related<super::profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Profile.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Credential {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            password_hash: model.password_hash,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<Credential> for ActiveModel {
    fn from(credential: Credential) -> Self {
        Self {
            id: Set(credential.id),
            email: Set(credential.email),
            password_hash: Set(credential.password_hash),
            created_at: Set(credential.created_at.into()),
            updated_at: Set(credential.updated_at.into()),
        }
    }
}
