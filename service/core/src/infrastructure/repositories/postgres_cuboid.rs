// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Postgres Cuboid
//!
//! # Architecture
//!
//! - **Layer:** Infrastructure Layer
//! - **Purpose:** Implements `CuboidRepository` over PostgreSQL

use async_trait::async_trait;
use sqlx::postgres::PgPool;
use sqlx::Row;
use crate::domain::bag::BagId;
use crate::domain::cuboid::{Cuboid, CuboidId, Dimensions, NewCuboid};
use crate::domain::repository::{CuboidRepository, RepositoryError};

pub struct PostgresCuboidRepository {
    pool: PgPool,
}

impl PostgresCuboidRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CuboidRepository for PostgresCuboidRepository {
    async fn insert(&self, cuboid: NewCuboid) -> Result<Cuboid, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(
            r#"
            INSERT INTO cuboids (width, height, depth, bag_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#
        )
        .bind(cuboid.dimensions.width())
        .bind(cuboid.dimensions.height())
        .bind(cuboid.dimensions.depth())
        .bind(cuboid.bag_id.0)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        let id: i64 = row.get("id");
        Ok(Cuboid::new(CuboidId(id), cuboid.dimensions, cuboid.bag_id))
    }

    async fn save(&self, cuboid: &Cuboid) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE cuboids
            SET width = $2, height = $3, depth = $4, bag_id = $5
            WHERE id = $1
            "#
        )
        .bind(cuboid.id.0)
        .bind(cuboid.dimensions.width())
        .bind(cuboid.dimensions.height())
        .bind(cuboid.dimensions.depth())
        .bind(cuboid.bag_id.0)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("Cuboid {} not found", cuboid.id)));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: CuboidId) -> Result<Option<Cuboid>, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT id, width, height, depth, bag_id
            FROM cuboids
            WHERE id = $1
            "#
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        row.map(parse_cuboid_row).transpose()
    }

    async fn find_by_bag(&self, bag_id: BagId) -> Result<Vec<Cuboid>, RepositoryError> {
        let rows = sqlx::query(
            r#"
            SELECT id, width, height, depth, bag_id
            FROM cuboids
            WHERE bag_id = $1
            ORDER BY id ASC
            "#
        )
        .bind(bag_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        rows.into_iter().map(parse_cuboid_row).collect()
    }

    async fn list_all(&self) -> Result<Vec<Cuboid>, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let rows = sqlx::query(
            r#"
            SELECT id, width, height, depth, bag_id
            FROM cuboids
            ORDER BY id ASC
            "#
        )
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        rows.into_iter().map(parse_cuboid_row).collect()
    }

    async fn delete(&self, id: CuboidId) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"
            DELETE FROM cuboids
            WHERE id = $1
            "#
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("Cuboid {} not found", id)));
        }

        Ok(())
    }
}

/// Parse a cuboid from a database row
pub(crate) fn parse_cuboid_row(row: sqlx::postgres::PgRow) -> Result<Cuboid, RepositoryError> {
    let id: i64 = row.try_get("id")?;
    let width: f64 = row.try_get("width")?;
    let height: f64 = row.try_get("height")?;
    let depth: f64 = row.try_get("depth")?;
    let bag_id: i64 = row.try_get("bag_id")?;

    let dimensions = Dimensions::new(width, height, depth)
        .map_err(|e| RepositoryError::Unknown(format!("Corrupt cuboid row {}: {}", id, e)))?;

    Ok(Cuboid::new(CuboidId(id), dimensions, BagId(bag_id)))
}
