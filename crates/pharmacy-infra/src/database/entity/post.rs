//! Post entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use pharmacy_core::domain::{Post, PostStatus, SeoOverrides};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub slug: String,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub excerpt: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub published_at: Option<DateTimeWithTimeZone>,
    pub author_id: Option<Uuid>,
    pub author_name: String,
    pub category: String,
    pub featured_image: Option<String>,
    pub read_time: Option<String>,
    pub status: String,
    pub seo_title: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub seo_description: Option<String>,
    pub seo_canonical: Option<String>,
    pub og_image: Option<String>,
    pub no_index: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::profile::Entity",
        from = "Column::AuthorId",
        to = "super::profile::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Author,
}

impl Related<super::profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Post {
    fn from(model: Model) -> Self {
        let status = model.status.parse().unwrap_or_else(|e| {
            tracing::warn!(post_id = %model.id, error = %e, "Treating post as draft");
            PostStatus::Draft
        });

        Self {
            id: model.id,
            slug: model.slug,
            title: model.title,
            excerpt: model.excerpt,
            content: model.content,
            published_at: model.published_at.map(Into::into),
            author_id: model.author_id,
            author_name: model.author_name,
            category: model.category,
            featured_image: model.featured_image,
            read_time: model.read_time,
            status,
            seo: SeoOverrides {
                title: model.seo_title,
                description: model.seo_description,
                canonical: model.seo_canonical,
                og_image: model.og_image,
                no_index: model.no_index,
            },
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<Post> for ActiveModel {
    fn from(post: Post) -> Self {
        Self {
            id: Set(post.id),
            slug: Set(post.slug),
            title: Set(post.title),
            excerpt: Set(post.excerpt),
            content: Set(post.content),
            published_at: Set(post.published_at.map(Into::into)),
            author_id: Set(post.author_id),
            author_name: Set(post.author_name),
            category: Set(post.category),
            featured_image: Set(post.featured_image),
            read_time: Set(post.read_time),
            status: Set(post.status.as_str().to_string()),
            seo_title: Set(post.seo.title),
            seo_description: Set(post.seo.description),
            seo_canonical: Set(post.seo.canonical),
            og_image: Set(post.seo.og_image),
            no_index: Set(post.seo.no_index),
            created_at: Set(post.created_at.into()),
            updated_at: Set(post.updated_at.into()),
        }
    }
}
