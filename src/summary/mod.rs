pub mod summary_model;
pub mod summary_service;
pub mod summary_traits;


pub use summary_model::{
    DailySummary, NetSalesPage, NetSalesRecord, ProductSalesSummary, TankLevel, TrendPeriod,
    VolumeTrendPoint,
};
pub use summary_service::SummaryService;
pub use summary_traits::SummaryServiceTrait;
