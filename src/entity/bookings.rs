use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub gear_id: Uuid,
    pub renter_id: Uuid,
    pub owner_id: Uuid,
    pub start_date: DateTimeWithTimeZone,
    pub end_date: DateTimeWithTimeZone,
    pub rental_type: String,
    pub total_price: i64,
    pub payment_status: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::gear::Entity",
        from = "Column::GearId",
        to = "super::gear::Column::Id"
    )]
    Gear,
    #[sea_orm(
        belongs_to = "super::profiles::Entity",
        from = "Column::RenterId",
        to = "super::profiles::Column::Id"
    )]
    Renter,
}

impl Related<super::gear::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Gear.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
