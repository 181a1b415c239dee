pub mod prices_model;
pub mod prices_repository;
pub mod prices_service;
pub mod prices_traits;

pub use prices_model::{NewProductPrice, ProductPrice};
pub use prices_repository::PriceRepository;
pub use prices_service::PriceService;
pub use prices_traits::{PriceRepositoryTrait, PriceServiceTrait};
