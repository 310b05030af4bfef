use sea_orm::{entity::prelude::*, ActiveValue::{Set, Unchanged}, ConnectionTrait};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub price: f64,
    pub available: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub async fn insert<C: ConnectionTrait>(db: &C, row: Model) -> Result<Model, ModelError> {
    let am = ActiveModel {
        id: Set(row.id),
        name: Set(row.name),
        description: Set(row.description),
        price: Set(row.price),
        available: Set(row.available),
    };
    am.insert(db).await.map_err(|e| ModelError::Db(e.to_string()))
}

pub async fn find<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<Option<Model>, ModelError> {
    Entity::find_by_id(id).one(db).await.map_err(|e| ModelError::Db(e.to_string()))
}

pub async fn all<C: ConnectionTrait>(db: &C) -> Result<Vec<Model>, ModelError> {
    Entity::find().all(db).await.map_err(|e| ModelError::Db(e.to_string()))
}

/// Overwrite every mutable column of the row with `row.id` in one statement.
/// Returns `Ok(None)` when no such row exists.
pub async fn replace<C: ConnectionTrait>(db: &C, row: Model) -> Result<Option<Model>, ModelError> {
    let am = ActiveModel {
        id: Unchanged(row.id),
        name: Set(row.name),
        description: Set(row.description),
        price: Set(row.price),
        available: Set(row.available),
    };
    match am.update(db).await {
        Ok(m) => Ok(Some(m)),
        Err(DbErr::RecordNotUpdated) => Ok(None),
        Err(e) => Err(ModelError::Db(e.to_string())),
    }
}

/// Delete by id; returns whether a row was removed.
pub async fn remove<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<bool, ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await.map_err(|e| ModelError::Db(e.to_string()))?;
    Ok(res.rows_affected > 0)
}
