use sea_orm::{entity::prelude::*, DatabaseConnection, NotSet, Set, SqlErr};
use serde::{Deserialize, Serialize};

use crate::errors;

/// One cafe row. Serializes as a flat object of every column, `id` included.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cafe")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub map_url: String,
    pub img_url: String,
    pub location: String,
    pub seats: String,
    pub has_toilet: bool,
    pub has_wifi: bool,
    pub has_sockets: bool,
    pub can_take_calls: bool,
    pub coffee_price: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Column values for a row that has not been assigned an id yet.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct NewCafe {
    pub name: String,
    pub map_url: String,
    pub img_url: String,
    pub location: String,
    pub seats: String,
    pub has_toilet: bool,
    pub has_wifi: bool,
    pub has_sockets: bool,
    pub can_take_calls: bool,
    pub coffee_price: Option<String>,
}

impl From<NewCafe> for ActiveModel {
    fn from(c: NewCafe) -> Self {
        ActiveModel {
            id: NotSet,
            name: Set(c.name),
            map_url: Set(c.map_url),
            img_url: Set(c.img_url),
            location: Set(c.location),
            seats: Set(c.seats),
            has_toilet: Set(c.has_toilet),
            has_wifi: Set(c.has_wifi),
            has_sockets: Set(c.has_sockets),
            can_take_calls: Set(c.can_take_calls),
            coffee_price: Set(c.coffee_price),
        }
    }
}

fn map_db_err(e: DbErr, name: &str) -> errors::ModelError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => errors::ModelError::Duplicate(name.to_string()),
        _ => errors::ModelError::Db(e.to_string()),
    }
}

/// Insert a cafe; the store assigns the id. A taken `name` yields `ModelError::Duplicate`.
pub async fn create(db: &DatabaseConnection, new_cafe: NewCafe) -> Result<Model, errors::ModelError> {
    let name = new_cafe.name.clone();
    let am: ActiveModel = new_cafe.into();
    am.insert(db).await.map_err(|e| map_db_err(e, &name))
}

/// Overwrite `coffee_price` of an existing row.
pub async fn set_coffee_price(
    db: &DatabaseConnection,
    existing: Model,
    price: Option<String>,
) -> Result<Model, errors::ModelError> {
    let mut am: ActiveModel = existing.into();
    am.coffee_price = Set(price);
    am.update(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}
