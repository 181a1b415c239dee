use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use crate::db::{get_connection, WriteHandle};
use crate::errors::Result;
use crate::schema::staff;
use crate::staff::staff_model::{NewStaff, Staff};
use crate::staff::staff_traits::StaffRepositoryTrait;

pub struct StaffRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl StaffRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        StaffRepository { pool, writer }
    }
}

#[async_trait]
impl StaffRepositoryTrait for StaffRepository {
    fn get_staff_member(&self, staff_id: &str) -> Result<Staff> {
        let mut conn = get_connection(&self.pool)?;
        Ok(staff::table.find(staff_id).first::<Staff>(&mut conn)?)
    }

    fn get_staff_for_station(&self, station_id: &str) -> Result<Vec<Staff>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(staff::table
            .filter(staff::station_id.eq(station_id))
            .order(staff::date_of_employment.desc())
            .load::<Staff>(&mut conn)?)
    }

    async fn upsert_staff(&self, member: NewStaff) -> Result<Staff> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Staff> {
                let now = Utc::now().to_rfc3339();

                if let Some(id) = member.id.clone() {
                    let existing: Option<Staff> = staff::table
                        .find(&id)
                        .first::<Staff>(conn)
                        .optional()?;
                    if let Some(mut row) = existing {
                        row.name = member.name;
                        row.position = member.position;
                        row.phone = member.phone;
                        row.social_media = member.social_media;
                        row.picture = member.picture;
                        row.date_of_employment = member.date_of_employment;
                        row.birthday = member.birthday;
                        row.updated_at = Some(now);

                        diesel::update(staff::table.find(&id))
                            .set(&row)
                            .execute(conn)?;
                        return Ok(staff::table.find(&id).first::<Staff>(conn)?);
                    }
                }

                let new_member = NewStaff {
                    id: Some(member.id.unwrap_or_else(|| Uuid::new_v4().to_string())),
                    inserted_at: Some(now.clone()),
                    updated_at: Some(now),
                    ..member
                };
                Ok(diesel::insert_into(staff::table)
                    .values(&new_member)
                    .get_result::<Staff>(conn)?)
            })
            .await
    }

    async fn delete_staff(&self, staff_id: &str) -> Result<usize> {
        let staff_id = staff_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(staff::table.find(staff_id)).execute(conn)?)
            })
            .await
    }
}
