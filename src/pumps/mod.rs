pub mod pumps_model;
pub mod pumps_repository;
pub mod pumps_service;
pub mod pumps_traits;

pub use pumps_model::{NewPump, NewTankCapacity, Pump, TankCapacity};
pub use pumps_repository::PumpRepository;
pub use pumps_service::PumpService;
pub use pumps_traits::{PumpRepositoryTrait, PumpServiceTrait};
