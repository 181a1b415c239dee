#[cfg(test)]
mod tests {
    use crate::errors::{Error, Result};
    use crate::ledger::ledger_errors::LedgerError;
    use crate::ledger::ledger_model::{
        monetary_total, FuelRecord, InputMode, MeterReadingInput, MonthlyStock, NewFuelRecord,
        NewMonthlyStock, Propagation,
    };
    use crate::ledger::ledger_service::LedgerService;
    use crate::ledger::ledger_traits::{LedgerRepositoryTrait, LedgerServiceTrait};
    use crate::prices::prices_model::{NewProductPrice, ProductPrice};
    use crate::prices::PriceServiceTrait;
    use crate::pumps::pumps_model::{NewPump, NewTankCapacity, Pump, TankCapacity};
    use crate::pumps::PumpServiceTrait;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    const STATION: &str = "ST01";

    // --- Mock repository over an in-memory map keyed (pump_id, date) ---
    #[derive(Default)]
    struct MockLedgerRepository {
        records: Mutex<HashMap<(String, String), FuelRecord>>,
        monthly: Mutex<Vec<MonthlyStock>>,
        next_id: Mutex<u32>,
    }

    impl MockLedgerRepository {
        fn new() -> Self {
            Self::default()
        }

        fn materialize(&self, new_record: NewFuelRecord) -> FuelRecord {
            let id = new_record.id.unwrap_or_else(|| {
                let mut counter = self.next_id.lock().unwrap();
                *counter += 1;
                format!("rec-{}", counter)
            });
            FuelRecord {
                id,
                station_code: new_record.station_code,
                pump_id: new_record.pump_id,
                product_type: new_record.product_type,
                record_date: new_record.record_date,
                meter_opening: new_record.meter_opening,
                meter_closing: new_record.meter_closing,
                sales_volume: new_record.sales_volume,
                price_per_litre: new_record.price_per_litre,
                total_sales: new_record.total_sales,
                opening_stock: new_record.opening_stock,
                closing_stock: new_record.closing_stock,
                input_mode: new_record.input_mode,
                created_at: None,
            }
        }

        fn upsert(&self, new_record: NewFuelRecord) -> FuelRecord {
            let key = (new_record.pump_id.clone(), new_record.record_date.clone());
            let mut records = self.records.lock().unwrap();
            let existing_id = records.get(&key).map(|r| r.id.clone());
            let mut row = self.materialize(new_record);
            if let Some(id) = existing_id {
                row.id = id;
            }
            records.insert(key, row.clone());
            row
        }

        fn record_count(&self) -> usize {
            self.records.lock().unwrap().len()
        }

        fn by_id(&self, id: &str) -> Option<FuelRecord> {
            self.records
                .lock()
                .unwrap()
                .values()
                .find(|r| r.id == id)
                .cloned()
        }
    }

    #[async_trait]
    impl LedgerRepositoryTrait for MockLedgerRepository {
        fn get_record(
            &self,
            _station: &str,
            pump_id: &str,
            date: &str,
        ) -> Result<Option<FuelRecord>> {
            Ok(self
                .records
                .lock()
                .unwrap()
                .get(&(pump_id.to_string(), date.to_string()))
                .cloned())
        }

        fn get_records_for_date(&self, station: &str, date: &str) -> Result<Vec<FuelRecord>> {
            Ok(self
                .records
                .lock()
                .unwrap()
                .values()
                .filter(|r| r.station_code == station && r.record_date == date)
                .cloned()
                .collect())
        }

        fn get_records_in_range(
            &self,
            station: &str,
            from: &str,
            to: &str,
        ) -> Result<Vec<FuelRecord>> {
            Ok(self
                .records
                .lock()
                .unwrap()
                .values()
                .filter(|r| {
                    r.station_code == station
                        && r.record_date.as_str() >= from
                        && r.record_date.as_str() <= to
                })
                .cloned()
                .collect())
        }

        fn get_pump_records_in_range(
            &self,
            station: &str,
            pump_id: &str,
            from: &str,
            to: &str,
        ) -> Result<Vec<FuelRecord>> {
            Ok(self
                .get_records_in_range(station, from, to)?
                .into_iter()
                .filter(|r| r.pump_id == pump_id)
                .collect())
        }

        fn get_most_recent_before(
            &self,
            _station: &str,
            pump_id: &str,
            date: &str,
        ) -> Result<Option<FuelRecord>> {
            Ok(self
                .records
                .lock()
                .unwrap()
                .values()
                .filter(|r| r.pump_id == pump_id && r.record_date.as_str() < date)
                .max_by(|a, b| a.record_date.cmp(&b.record_date))
                .cloned())
        }

        fn get_record_dates(&self, station: &str) -> Result<Vec<String>> {
            let mut dates: Vec<String> = self
                .records
                .lock()
                .unwrap()
                .values()
                .filter(|r| r.station_code == station)
                .map(|r| r.record_date.clone())
                .collect();
            dates.sort();
            dates.dedup();
            dates.reverse();
            Ok(dates)
        }

        fn get_latest_record_for_product(
            &self,
            station: &str,
            product_type: &str,
        ) -> Result<Option<FuelRecord>> {
            Ok(self
                .records
                .lock()
                .unwrap()
                .values()
                .filter(|r| {
                    r.station_code == station && r.product_type.as_deref() == Some(product_type)
                })
                .max_by(|a, b| a.record_date.cmp(&b.record_date))
                .cloned())
        }

        async fn upsert_record(&self, record: NewFuelRecord) -> Result<FuelRecord> {
            Ok(self.upsert(record))
        }

        async fn commit_reading(
            &self,
            today: NewFuelRecord,
            propagation: Propagation,
        ) -> Result<FuelRecord> {
            let saved = self.upsert(today);
            match propagation {
                Propagation::Update(update) => {
                    let mut records = self.records.lock().unwrap();
                    let row = records
                        .values_mut()
                        .find(|r| r.id == update.id)
                        .expect("propagation target should exist");
                    row.opening_stock = update.opening_stock;
                    row.meter_opening = Some(update.meter_opening);
                    row.sales_volume = update.sales_volume;
                    row.total_sales = update.total_sales;
                    row.closing_stock = update.closing_stock;
                }
                Propagation::Create(placeholder) => {
                    self.upsert(placeholder);
                }
            }
            Ok(saved)
        }

        async fn update_stock(
            &self,
            id: &str,
            opening_stock: f64,
            closing_stock: f64,
        ) -> Result<()> {
            let mut records = self.records.lock().unwrap();
            let row = records
                .values_mut()
                .find(|r| r.id == id)
                .expect("update target should exist");
            row.opening_stock = opening_stock;
            row.closing_stock = closing_stock;
            Ok(())
        }

        async fn update_closing_stock(&self, id: &str, closing_stock: f64) -> Result<()> {
            let mut records = self.records.lock().unwrap();
            let row = records
                .values_mut()
                .find(|r| r.id == id)
                .expect("update target should exist");
            row.closing_stock = closing_stock;
            Ok(())
        }

        async fn delete_record(&self, id: &str) -> Result<usize> {
            let mut records = self.records.lock().unwrap();
            let key = records
                .iter()
                .find(|(_, r)| r.id == id)
                .map(|(k, _)| k.clone());
            match key {
                Some(key) => {
                    records.remove(&key);
                    Ok(1)
                }
                None => Ok(0),
            }
        }

        async fn upsert_monthly_stock(&self, row: NewMonthlyStock) -> Result<MonthlyStock> {
            let mut monthly = self.monthly.lock().unwrap();
            monthly.retain(|m| {
                !(m.station_id == row.station_id
                    && m.product_type == row.product_type
                    && m.month_year == row.month_year)
            });
            let saved = MonthlyStock {
                id: row.id.unwrap_or_else(|| "ms-1".to_string()),
                station_id: row.station_id,
                product_type: row.product_type,
                month_year: row.month_year,
                opening_stock: row.opening_stock,
                actual_closing_stock: row.actual_closing_stock,
                excess: row.excess,
                created_at: None,
            };
            monthly.push(saved.clone());
            Ok(saved)
        }
    }

    // --- Mock pump directory ---
    struct MockPumpService {
        pumps: Vec<Pump>,
    }

    impl MockPumpService {
        fn new(pumps: Vec<Pump>) -> Self {
            MockPumpService { pumps }
        }
    }

    fn pump(id: &str, number: i32, product: &str, tank: &str) -> Pump {
        Pump {
            id: id.to_string(),
            station_id: STATION.to_string(),
            pump_number: number,
            product_type: product.to_string(),
            tank_id: tank.to_string(),
            capacity: 33000.0,
            created_at: None,
        }
    }

    #[async_trait]
    impl PumpServiceTrait for MockPumpService {
        fn get_pump(&self, pump_id: &str) -> Result<Pump> {
            self.pumps
                .iter()
                .find(|p| p.id == pump_id)
                .cloned()
                .ok_or_else(|| Error::Ledger(LedgerError::NotFound(pump_id.to_string())))
        }

        fn get_pumps_for_station(&self, _station_id: &str) -> Result<Vec<Pump>> {
            Ok(self.pumps.clone())
        }

        fn get_pumps_for_tank(&self, tank_id: &str) -> Result<Vec<Pump>> {
            Ok(self
                .pumps
                .iter()
                .filter(|p| p.tank_id == tank_id)
                .cloned()
                .collect())
        }

        async fn create_pump(&self, _new_pump: NewPump) -> Result<Pump> {
            unimplemented!("not used by ledger tests")
        }

        async fn set_tank_capacity(&self, _tank_id: &str, _capacity: f64) -> Result<usize> {
            unimplemented!("not used by ledger tests")
        }

        fn get_tank_capacities(&self, _station_code: &str) -> Result<Vec<TankCapacity>> {
            Ok(Vec::new())
        }

        async fn upsert_tank_capacity(&self, _capacity: NewTankCapacity) -> Result<TankCapacity> {
            unimplemented!("not used by ledger tests")
        }
    }

    // --- Mock price list ---
    struct MockPriceService {
        prices: HashMap<String, f64>,
    }

    impl MockPriceService {
        fn new(prices: &[(&str, f64)]) -> Self {
            MockPriceService {
                prices: prices
                    .iter()
                    .map(|(k, v)| (k.to_string(), *v))
                    .collect(),
            }
        }
    }

    #[async_trait]
    impl PriceServiceTrait for MockPriceService {
        fn latest_price(&self, product_type: &str, _as_of: NaiveDate) -> Result<Option<f64>> {
            Ok(self.prices.get(product_type).copied())
        }

        fn latest_prices(&self) -> Result<Vec<ProductPrice>> {
            Ok(Vec::new())
        }

        fn price_history(&self, _product_type: &str) -> Result<Vec<ProductPrice>> {
            Ok(Vec::new())
        }

        async fn set_price(&self, _new_price: NewProductPrice) -> Result<ProductPrice> {
            unimplemented!("not used by ledger tests")
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn service_with(
        pumps: Vec<Pump>,
        prices: &[(&str, f64)],
    ) -> (Arc<MockLedgerRepository>, LedgerService) {
        let repository = Arc::new(MockLedgerRepository::new());
        let service = LedgerService::new(
            repository.clone(),
            Arc::new(MockPumpService::new(pumps)),
            Arc::new(MockPriceService::new(prices)),
        );
        (repository, service)
    }

    fn seed_record(
        repository: &MockLedgerRepository,
        pump_id: &str,
        date: &str,
        opening_stock: f64,
        closing_stock: f64,
        meter_closing: f64,
    ) -> FuelRecord {
        repository.upsert(NewFuelRecord {
            id: None,
            station_code: STATION.to_string(),
            pump_id: pump_id.to_string(),
            product_type: Some("PMS".to_string()),
            record_date: date.to_string(),
            meter_opening: Some(0.0),
            meter_closing: Some(meter_closing),
            sales_volume: opening_stock - closing_stock,
            price_per_litre: Some(650.0),
            total_sales: Some(monetary_total(opening_stock - closing_stock, 650.0)),
            opening_stock,
            closing_stock,
            input_mode: InputMode::Manual.as_str().to_string(),
            created_at: None,
        })
    }

    fn reading(pump_id: &str, day: NaiveDate, opening: f64, closing: f64) -> MeterReadingInput {
        MeterReadingInput {
            station_code: STATION.to_string(),
            pump_id: pump_id.to_string(),
            date: day,
            meter_opening: opening,
            meter_closing: closing,
        }
    }

    #[tokio::test]
    async fn reading_derives_volume_money_and_stock() {
        let (repository, service) = service_with(vec![pump("p1", 1, "PMS", "t1")], &[("PMS", 650.0)]);
        seed_record(&repository, "p1", "2026-03-09", 5000.0, 5000.0, 1000.0);

        let record = service
            .record_meter_reading(reading("p1", date(2026, 3, 10), 1000.0, 1500.0))
            .await
            .unwrap();

        assert_eq!(record.sales_volume, 500.0);
        assert_eq!(record.total_sales, Some(monetary_total(500.0, 650.0)));
        assert_eq!(record.opening_stock, 5000.0);
        assert_eq!(record.closing_stock, 4500.0);
        assert_eq!(record.input_mode(), InputMode::Manual);
    }

    #[tokio::test]
    async fn reading_rejects_regressing_meter() {
        let (_, service) = service_with(vec![pump("p1", 1, "PMS", "t1")], &[("PMS", 650.0)]);

        let err = service
            .record_meter_reading(reading("p1", date(2026, 3, 10), 1500.0, 1400.0))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Ledger(LedgerError::InvalidReading)));
    }

    #[tokio::test]
    async fn closing_stock_floors_at_zero_when_sales_exceed_stock() {
        let (repository, service) = service_with(vec![pump("p1", 1, "PMS", "t1")], &[("PMS", 650.0)]);
        seed_record(&repository, "p1", "2026-03-09", 300.0, 300.0, 1000.0);

        let record = service
            .record_meter_reading(reading("p1", date(2026, 3, 10), 1000.0, 1500.0))
            .await
            .unwrap();

        assert_eq!(record.sales_volume, 500.0);
        assert_eq!(record.closing_stock, 0.0);
    }

    #[tokio::test]
    async fn same_day_reading_is_an_upsert_with_pinned_opening() {
        let (repository, service) = service_with(vec![pump("p1", 1, "PMS", "t1")], &[("PMS", 650.0)]);
        seed_record(&repository, "p1", "2026-03-09", 5000.0, 5000.0, 1000.0);

        let first = service
            .record_meter_reading(reading("p1", date(2026, 3, 10), 1000.0, 1200.0))
            .await
            .unwrap();
        let second = service
            .record_meter_reading(reading("p1", date(2026, 3, 10), 1000.0, 1500.0))
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        // Opening stock stays where the first write put it.
        assert_eq!(second.opening_stock, 5000.0);
        assert_eq!(second.sales_volume, 500.0);
        assert_eq!(second.closing_stock, 4500.0);
        // 3 rows total: the seed, the day's row, tomorrow's placeholder.
        assert_eq!(repository.record_count(), 3);
    }

    #[tokio::test]
    async fn reading_creates_tomorrows_placeholder() {
        let (repository, service) = service_with(vec![pump("p1", 1, "PMS", "t1")], &[("PMS", 650.0)]);
        seed_record(&repository, "p1", "2026-03-09", 5000.0, 5000.0, 1000.0);

        service
            .record_meter_reading(reading("p1", date(2026, 3, 10), 1000.0, 1500.0))
            .await
            .unwrap();

        let tomorrow = repository
            .get_record(STATION, "p1", "2026-03-11")
            .unwrap()
            .expect("placeholder should exist");
        assert_eq!(tomorrow.opening_stock, 4500.0);
        assert_eq!(tomorrow.closing_stock, 4500.0);
        assert_eq!(tomorrow.meter_opening, Some(1500.0));
        assert_eq!(tomorrow.sales_volume, 0.0);
        assert_eq!(tomorrow.input_mode(), InputMode::Auto);
    }

    #[tokio::test]
    async fn editing_yesterday_recomputes_existing_manual_tomorrow() {
        let (repository, service) = service_with(vec![pump("p1", 1, "PMS", "t1")], &[("PMS", 650.0)]);
        seed_record(&repository, "p1", "2026-03-09", 5000.0, 5000.0, 1000.0);

        service
            .record_meter_reading(reading("p1", date(2026, 3, 10), 1000.0, 1500.0))
            .await
            .unwrap();
        service
            .record_meter_reading(reading("p1", date(2026, 3, 11), 1500.0, 1700.0))
            .await
            .unwrap();

        // Revise day 10: closing meter moves from 1500 to 1400.
        service
            .record_meter_reading(reading("p1", date(2026, 3, 10), 1000.0, 1400.0))
            .await
            .unwrap();

        let tomorrow = repository
            .get_record(STATION, "p1", "2026-03-11")
            .unwrap()
            .unwrap();
        // Day 10 closes at 5000 - 400 = 4600; day 11 re-anchors on it and its
        // volume is recomputed from its own closing meter: 1700 - 1400 = 300.
        assert_eq!(tomorrow.opening_stock, 4600.0);
        assert_eq!(tomorrow.meter_opening, Some(1400.0));
        assert_eq!(tomorrow.sales_volume, 300.0);
        assert_eq!(tomorrow.closing_stock, 4300.0);
        assert_eq!(tomorrow.total_sales, Some(monetary_total(300.0, 650.0)));
    }

    #[tokio::test]
    async fn restock_raises_same_day_opening_by_exact_amount() {
        let (repository, service) = service_with(
            vec![pump("p1", 1, "PMS", "t1"), pump("p2", 2, "PMS", "t1")],
            &[("PMS", 650.0)],
        );
        seed_record(&repository, "p1", "2026-03-10", 4000.0, 3500.0, 1500.0);
        seed_record(&repository, "p2", "2026-03-10", 4000.0, 3800.0, 800.0);

        let outcome = service
            .restock(STATION, "t1", date(2026, 3, 10), 2000.0)
            .await
            .unwrap();

        assert_eq!(outcome.new_opening_stock, 6000.0);
        assert_eq!(outcome.updated_pumps.len(), 2);
        assert!(outcome.skipped_pumps.is_empty());

        let p1 = repository.get_record(STATION, "p1", "2026-03-10").unwrap().unwrap();
        assert_eq!(p1.opening_stock, 6000.0);
        assert_eq!(p1.closing_stock, 5500.0);
        let p2 = repository.get_record(STATION, "p2", "2026-03-10").unwrap().unwrap();
        assert_eq!(p2.opening_stock, 6000.0);
        assert_eq!(p2.closing_stock, 5800.0);
    }

    #[tokio::test]
    async fn restock_without_same_day_row_rewrites_prior_closing() {
        let (repository, service) =
            service_with(vec![pump("p1", 1, "PMS", "t1")], &[("PMS", 650.0)]);
        let prior = seed_record(&repository, "p1", "2026-03-08", 4000.0, 3500.0, 1500.0);

        service
            .restock(STATION, "t1", date(2026, 3, 10), 2000.0)
            .await
            .unwrap();

        // No row exists for the 10th, so the restock lands on the most recent
        // prior closing and the rollover chain carries it forward.
        let rewritten = repository.by_id(&prior.id).unwrap();
        assert_eq!(rewritten.closing_stock, 5500.0);
        assert!(repository
            .get_record(STATION, "p1", "2026-03-10")
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn restock_with_no_history_fails() {
        let (_, service) = service_with(vec![pump("p1", 1, "PMS", "t1")], &[("PMS", 650.0)]);

        let err = service
            .restock(STATION, "t1", date(2026, 3, 10), 2000.0)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Ledger(LedgerError::NoHistoryToRestock(_))
        ));
    }

    #[tokio::test]
    async fn restock_rejects_non_positive_amount() {
        let (_, service) = service_with(vec![pump("p1", 1, "PMS", "t1")], &[("PMS", 650.0)]);

        let err = service
            .restock(STATION, "t1", date(2026, 3, 10), 0.0)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Ledger(LedgerError::InvalidRestockAmount)
        ));
    }

    #[tokio::test]
    async fn restock_then_reading_keeps_raised_opening() {
        let (repository, service) = service_with(vec![pump("p1", 1, "PMS", "t1")], &[("PMS", 650.0)]);
        seed_record(&repository, "p1", "2026-03-09", 5000.0, 4500.0, 1000.0);

        service
            .record_meter_reading(reading("p1", date(2026, 3, 10), 1000.0, 1500.0))
            .await
            .unwrap();
        service
            .restock(STATION, "t1", date(2026, 3, 10), 2000.0)
            .await
            .unwrap();

        // A later meter correction must not re-derive opening from yesterday.
        let revised = service
            .record_meter_reading(reading("p1", date(2026, 3, 10), 1000.0, 1700.0))
            .await
            .unwrap();
        assert_eq!(revised.opening_stock, 6500.0);
        assert_eq!(revised.sales_volume, 700.0);
        assert_eq!(revised.closing_stock, 5800.0);
    }

    #[tokio::test]
    async fn day_stock_resolution_falls_back_in_order() {
        let (repository, service) = service_with(vec![pump("p1", 1, "PMS", "t1")], &[("PMS", 650.0)]);
        seed_record(&repository, "p1", "2026-03-07", 4000.0, 3200.0, 900.0);

        // Gap of three days: the most recent prior record anchors the view.
        let resolved = service
            .resolve_day_stock(STATION, "p1", date(2026, 3, 10))
            .unwrap();
        assert_eq!(resolved.opening_stock, 3200.0);
        assert_eq!(resolved.sales_volume, 0.0);
        assert_eq!(resolved.closing_stock, 3200.0);
        assert_eq!(resolved.opening_meter, 900.0);

        // Yesterday beats older history.
        seed_record(&repository, "p1", "2026-03-09", 3200.0, 3000.0, 950.0);
        let resolved = service
            .resolve_day_stock(STATION, "p1", date(2026, 3, 10))
            .unwrap();
        assert_eq!(resolved.opening_stock, 3000.0);

        // A same-day row beats both.
        seed_record(&repository, "p1", "2026-03-10", 2800.0, 2700.0, 980.0);
        let resolved = service
            .resolve_day_stock(STATION, "p1", date(2026, 3, 10))
            .unwrap();
        assert_eq!(resolved.opening_stock, 2800.0);
        assert_eq!(resolved.sales_volume, 100.0);
    }

    #[tokio::test]
    async fn day_stock_resolution_with_no_history_is_zero() {
        let (_, service) = service_with(vec![pump("p1", 1, "PMS", "t1")], &[("PMS", 650.0)]);

        let resolved = service
            .resolve_day_stock(STATION, "p1", date(2026, 3, 10))
            .unwrap();
        assert_eq!(resolved.opening_stock, 0.0);
        assert_eq!(resolved.closing_stock, 0.0);
    }

    #[tokio::test]
    async fn reconciliation_requires_month_start() {
        let (repository, service) = service_with(vec![pump("p1", 1, "PMS", "t1")], &[("PMS", 650.0)]);
        seed_record(&repository, "p1", "2026-03-09", 5000.0, 5000.0, 1000.0);

        let err = service
            .reconcile_month_open(STATION, "t1", date(2026, 3, 10), 5050.0)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Ledger(LedgerError::NotMonthStart(_))
        ));
    }

    #[tokio::test]
    async fn reconciliation_records_excess_and_rewrites_opening() {
        let (repository, service) = service_with(vec![pump("p1", 1, "PMS", "t1")], &[("PMS", 650.0)]);
        seed_record(&repository, "p1", "2026-03-01", 1000.0, 900.0, 1000.0);

        let outcome = service
            .reconcile_month_open(STATION, "t1", date(2026, 3, 1), 1050.0)
            .await
            .unwrap();
        assert_eq!(outcome.excess, 50.0);
        assert_eq!(outcome.updated_pumps, vec!["p1".to_string()]);

        let row = repository.get_record(STATION, "p1", "2026-03-01").unwrap().unwrap();
        assert_eq!(row.opening_stock, 1050.0);
        assert_eq!(row.closing_stock, 950.0);

        let monthly = repository.monthly.lock().unwrap();
        assert_eq!(monthly.len(), 1);
        assert_eq!(monthly[0].month_year, "2026-03");
        assert_eq!(monthly[0].opening_stock, 1000.0);
        assert_eq!(monthly[0].actual_closing_stock, Some(1050.0));
        assert_eq!(monthly[0].excess, Some(50.0));
    }

    #[tokio::test]
    async fn reconciliation_excess_is_real_minus_recorded() {
        let (repository, service) = service_with(vec![pump("p1", 1, "PMS", "t1")], &[("PMS", 650.0)]);
        seed_record(&repository, "p1", "2026-03-01", 1000.0, 900.0, 1000.0);

        let excess = service
            .reconciliation_excess(STATION, "t1", date(2026, 3, 1), 980.0)
            .unwrap();
        assert_eq!(excess, -20.0);
    }

    #[tokio::test]
    async fn seed_day_anchors_on_prior_closing_and_skips_existing() {
        let (repository, service) = service_with(
            vec![pump("p1", 1, "PMS", "t1"), pump("p2", 2, "AGO", "t2")],
            &[("PMS", 650.0), ("AGO", 700.0)],
        );
        seed_record(&repository, "p1", "2026-03-08", 4000.0, 3600.0, 1200.0);
        seed_record(&repository, "p2", "2026-03-10", 2000.0, 1900.0, 500.0);

        let created = service.seed_day(STATION, date(2026, 3, 10)).await.unwrap();
        assert_eq!(created, 1);

        let seeded = repository.get_record(STATION, "p1", "2026-03-10").unwrap().unwrap();
        assert_eq!(seeded.opening_stock, 3600.0);
        assert_eq!(seeded.closing_stock, 3600.0);
        assert_eq!(seeded.input_mode(), InputMode::Auto);
        assert!(seeded.is_placeholder());

        // The pre-existing row was left alone.
        let existing = repository.get_record(STATION, "p2", "2026-03-10").unwrap().unwrap();
        assert_eq!(existing.opening_stock, 2000.0);
    }

    #[tokio::test]
    async fn tank_groups_share_stock_and_sum_sales() {
        let (repository, service) = service_with(
            vec![
                pump("p1", 1, "PMS", "t1"),
                pump("p2", 2, "PMS", "t1"),
                pump("p3", 3, "AGO", "t2"),
            ],
            &[("PMS", 650.0), ("AGO", 700.0)],
        );
        seed_record(&repository, "p1", "2026-03-10", 4000.0, 3700.0, 1500.0);
        seed_record(&repository, "p2", "2026-03-10", 4000.0, 3900.0, 800.0);
        seed_record(&repository, "p3", "2026-03-10", 2000.0, 1950.0, 400.0);

        let groups = service.tank_groups(STATION, date(2026, 3, 10)).unwrap();
        assert_eq!(groups.len(), 2);

        let t1 = groups.iter().find(|g| g.tank_id == "t1").unwrap();
        assert_eq!(t1.opening_stock, 4000.0);
        assert_eq!(t1.sales_volume, 400.0);
        assert_eq!(t1.closing_stock, 3600.0);
        assert_eq!(t1.pumps.len(), 2);

        let t2 = groups.iter().find(|g| g.tank_id == "t2").unwrap();
        assert_eq!(t2.sales_volume, 50.0);
    }

    #[tokio::test]
    async fn records_for_date_join_and_sort_by_pump_number() {
        let (repository, service) = service_with(
            vec![pump("p2", 2, "PMS", "t1"), pump("p1", 1, "PMS", "t1")],
            &[("PMS", 650.0)],
        );
        seed_record(&repository, "p2", "2026-03-10", 4000.0, 3900.0, 800.0);
        seed_record(&repository, "p1", "2026-03-10", 4000.0, 3700.0, 1500.0);

        let rows = service.records_for_date(STATION, date(2026, 3, 10)).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].pump_number, 1);
        assert_eq!(rows[1].pump_number, 2);
    }

    #[test]
    fn monetary_total_rounds_half_away_from_zero() {
        assert_eq!(monetary_total(500.0, 650.0), 325000.0);
        assert_eq!(monetary_total(1.5, 0.07), 0.11);
        assert_eq!(monetary_total(0.0, 650.0), 0.0);
    }
}
