use rand::seq::SliceRandom;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use serde::Deserialize;
use tracing::{debug, info, warn};

use models::cafe::{self, Entity as CafeEntity, NewCafe};
use crate::errors::ServiceError;

/// Raw `/add/` form. Field names follow the public form contract.
#[derive(Debug, Default, Deserialize)]
pub struct AddCafeInput {
    pub name: Option<String>,
    pub map_url: Option<String>,
    pub img_url: Option<String>,
    pub loc: Option<String>,
    pub seats: Option<String>,
    pub toilet: Option<String>,
    pub wifi: Option<String>,
    pub sockets: Option<String>,
    pub calls: Option<String>,
    pub coffee_price: Option<String>,
}

/// Checkbox semantics: any present, non-empty value is `true`, including the text "false".
pub fn checkbox(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

fn required(value: Option<String>, field: &str) -> Result<String, ServiceError> {
    value.ok_or_else(|| ServiceError::Validation(format!("{field} is required")))
}

impl AddCafeInput {
    pub fn into_new_cafe(self) -> Result<NewCafe, ServiceError> {
        Ok(NewCafe {
            has_toilet: checkbox(self.toilet.as_deref()),
            has_wifi: checkbox(self.wifi.as_deref()),
            has_sockets: checkbox(self.sockets.as_deref()),
            can_take_calls: checkbox(self.calls.as_deref()),
            name: required(self.name, "name")?,
            map_url: required(self.map_url, "map_url")?,
            img_url: required(self.img_url, "img_url")?,
            location: required(self.loc, "loc")?,
            seats: required(self.seats, "seats")?,
            coffee_price: self.coffee_price,
        })
    }
}

/// All cafes ordered by name.
pub async fn list_cafes(db: &DatabaseConnection) -> Result<Vec<cafe::Model>, ServiceError> {
    let rows = CafeEntity::find().order_by_asc(cafe::Column::Name).all(db).await?;
    Ok(rows)
}

/// One cafe picked uniformly at random.
pub async fn random_cafe(db: &DatabaseConnection) -> Result<cafe::Model, ServiceError> {
    let rows = CafeEntity::find().all(db).await?;
    let picked = rows.choose(&mut rand::thread_rng()).cloned();
    picked.ok_or(ServiceError::EmptyCollection("cafes"))
}

/// Cafes whose location equals `location` exactly (case-sensitive).
pub async fn search_cafes(db: &DatabaseConnection, location: &str) -> Result<Vec<cafe::Model>, ServiceError> {
    let rows = CafeEntity::find()
        .filter(cafe::Column::Location.eq(location))
        .all(db)
        .await?;
    debug!(%location, count = rows.len(), "cafe search");
    Ok(rows)
}

/// Insert a new cafe.
pub async fn add_cafe(db: &DatabaseConnection, new_cafe: NewCafe) -> Result<cafe::Model, ServiceError> {
    let created = cafe::create(db, new_cafe).await?;
    info!(id = created.id, name = %created.name, "cafe added");
    Ok(created)
}

pub async fn get_cafe(db: &DatabaseConnection, id: i32) -> Result<Option<cafe::Model>, ServiceError> {
    Ok(CafeEntity::find_by_id(id).one(db).await?)
}

/// Set `coffee_price` of cafe `id`. With no price the row is returned untouched.
pub async fn update_price(
    db: &DatabaseConnection,
    id: i32,
    new_price: Option<String>,
) -> Result<cafe::Model, ServiceError> {
    let existing = get_cafe(db, id).await?.ok_or_else(|| ServiceError::not_found("cafe"))?;
    let Some(price) = new_price else {
        debug!(id, "update_price without new_price; nothing written");
        return Ok(existing);
    };
    let updated = cafe::set_coffee_price(db, existing, Some(price)).await?;
    info!(id, price = ?updated.coffee_price, "cafe price updated");
    Ok(updated)
}

/// `Forbidden` unless `api_key` equals the configured secret.
pub fn check_api_key(api_key: Option<&str>, secret: &str) -> Result<(), ServiceError> {
    if api_key != Some(secret) {
        warn!("api key mismatch");
        return Err(ServiceError::Forbidden);
    }
    Ok(())
}

/// Remove cafe `id`. The key is checked before any row is touched.
pub async fn delete_cafe(
    db: &DatabaseConnection,
    id: i32,
    api_key: Option<&str>,
    secret: &str,
) -> Result<(), ServiceError> {
    check_api_key(api_key, secret)?;
    let res = CafeEntity::delete_by_id(id).exec(db).await?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("cafe"));
    }
    info!(id, "cafe deleted");
    Ok(())
}
