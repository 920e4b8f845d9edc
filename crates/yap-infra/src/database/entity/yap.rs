//! Yap entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use yap_core::domain::{Yap, YapId};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "yaps")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub region: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::vote::Entity")]
    Votes,
}

impl Related<super::vote::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Votes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Yap.
impl From<Model> for Yap {
    fn from(model: Model) -> Self {
        Yap::restore(YapId::from(model.id), model.content, model.region)
    }
}

/// Conversion from Domain Yap to SeaORM ActiveModel.
impl From<&Yap> for ActiveModel {
    fn from(yap: &Yap) -> Self {
        Self {
            id: Set(yap.id().as_uuid()),
            content: Set(yap.content().as_str().to_string()),
            region: Set(yap.region().as_str().to_string()),
        }
    }
}
