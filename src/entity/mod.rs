pub mod audit_logs;
pub mod bookings;
pub mod gear;
pub mod gear_images;
pub mod gear_pricing;
pub mod profiles;

pub use audit_logs::Entity as AuditLogs;
pub use bookings::Entity as Bookings;
pub use gear::Entity as Gear;
pub use gear_images::Entity as GearImages;
pub use gear_pricing::Entity as GearPricing;
pub use profiles::Entity as Profiles;
