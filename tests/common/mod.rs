use diesel::prelude::*;
use std::sync::Arc;
use tempfile::TempDir;

use fuelstation_core::db::{self, DbPool, WriteHandle};
use fuelstation_core::schema::{pumps, stations};

pub struct TestDb {
    // Held so the database directory outlives the test.
    pub _dir: TempDir,
    pub pool: Arc<DbPool>,
    pub writer: WriteHandle,
}

/// Creates a fresh migrated sqlite database in a temp directory and spawns
/// the writer actor for it. Must run inside a tokio runtime.
pub fn setup() -> TestDb {
    let dir = tempfile::tempdir().expect("Failed to create temp dir for test database");
    let db_path = db::init(dir.path().to_str().unwrap()).expect("Failed to initialize database");
    let pool = db::create_pool(&db_path).expect("Failed to create database pool");
    db::run_migrations(&pool).expect("Failed to run migrations");
    let writer = db::spawn_writer((*pool).clone());

    TestDb {
        _dir: dir,
        pool,
        writer,
    }
}

pub fn seed_station(pool: &DbPool, id: &str) {
    let mut conn = pool.get().unwrap();
    diesel::insert_into(stations::table)
        .values((stations::id.eq(id), stations::name.eq("Test Station")))
        .execute(&mut conn)
        .unwrap();
}

pub fn seed_pump(pool: &DbPool, id: &str, station: &str, number: i32, product: &str, tank: &str) {
    let mut conn = pool.get().unwrap();
    diesel::insert_into(pumps::table)
        .values((
            pumps::id.eq(id),
            pumps::station_id.eq(station),
            pumps::pump_number.eq(number),
            pumps::product_type.eq(product),
            pumps::tank_id.eq(tank),
            pumps::capacity.eq(33000.0),
        ))
        .execute(&mut conn)
        .unwrap();
}
