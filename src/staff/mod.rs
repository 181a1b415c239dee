pub mod staff_model;
pub mod staff_repository;
pub mod staff_service;
pub mod staff_traits;

pub use staff_model::{NewStaff, Staff};
pub use staff_repository::StaffRepository;
pub use staff_service::StaffService;
pub use staff_traits::{StaffRepositoryTrait, StaffServiceTrait};
