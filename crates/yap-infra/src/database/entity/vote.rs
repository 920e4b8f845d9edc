//! Vote entity for SeaORM. Rows are only ever inserted.

use sea_orm::entity::prelude::*;

use yap_core::domain::{Direction, Vote, YapId};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "votes")]
pub struct Model {
    /// Insertion order of the ledger.
    #[sea_orm(primary_key)]
    pub id: i64,
    pub yap: Uuid,
    /// `true` for an up vote.
    #[sea_orm(column_name = "score")]
    pub upvote: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::yap::Entity",
        from = "Column::Yap",
        to = "super::yap::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Yap,
}

impl Related<super::yap::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Yap.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Vote {
    fn from(model: Model) -> Self {
        Vote::new(YapId::from(model.yap), Direction::from_up(model.upvote))
    }
}
