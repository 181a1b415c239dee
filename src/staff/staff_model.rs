use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::schema::staff;

#[derive(
    Queryable, Identifiable, AsChangeset, Selectable, Serialize, Deserialize, Debug, Clone, PartialEq,
)]
#[diesel(table_name = staff)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct Staff {
    pub id: String,
    pub station_id: String,
    pub name: String,
    pub position: String,
    pub phone: Option<String>,
    /// JSON map of platform name to handle.
    pub social_media: Option<String>,
    pub picture: Option<String>,
    pub date_of_employment: Option<String>,
    pub birthday: Option<String>,
    pub inserted_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = staff)]
#[serde(rename_all = "camelCase")]
pub struct NewStaff {
    pub id: Option<String>,
    pub station_id: String,
    pub name: String,
    pub position: String,
    pub phone: Option<String>,
    pub social_media: Option<String>,
    pub picture: Option<String>,
    pub date_of_employment: Option<String>,
    pub birthday: Option<String>,
    pub inserted_at: Option<String>,
    pub updated_at: Option<String>,
}
