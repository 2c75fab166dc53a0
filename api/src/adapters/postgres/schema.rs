//! Table bootstrap
//!
//! Creates any missing table straight from the SeaORM entity definitions.

use sea_orm::{ConnectionTrait, DatabaseConnection, EntityTrait, Schema};

use crate::entity::{dishes, orders, promotions};
use crate::error::DomainError;

/// Create the dishes, promotions and orders tables if they do not exist
pub async fn ensure_schema(db: &DatabaseConnection) -> Result<(), DomainError> {
    create_table(db, dishes::Entity).await?;
    create_table(db, promotions::Entity).await?;
    create_table(db, orders::Entity).await?;
    Ok(())
}

async fn create_table<E>(db: &DatabaseConnection, entity: E) -> Result<(), DomainError>
where
    E: EntityTrait,
{
    let table = entity.table_name().to_owned();
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);
    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();

    db.execute(backend.build(&statement))
        .await
        .map_err(|e| DomainError::Database(format!("Failed to create table {}: {}", table, e)))?;

    tracing::debug!("Table {} ready", table);
    Ok(())
}
