pub mod booking_service;
pub mod gear_service;
pub mod profile_service;
