use sea_orm::entity::prelude::*;

// 1:1 with gear; the gear id is the primary key.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "gear_pricing")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub gear_id: Uuid,
    pub hourly_rate: i64,
    pub daily_rate: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::gear::Entity",
        from = "Column::GearId",
        to = "super::gear::Column::Id"
    )]
    Gear,
}

impl Related<super::gear::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Gear.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
