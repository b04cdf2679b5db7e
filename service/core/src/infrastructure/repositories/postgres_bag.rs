// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Postgres Bag
//!
//! PostgreSQL persistence for the bag aggregate. A bag is always loaded
//! together with its cuboids so the derived volumes are accurate.
//!
//! # Architecture
//!
//! - **Layer:** Infrastructure Layer
//! - **Purpose:** Implements `BagRepository` over PostgreSQL

use async_trait::async_trait;
use sqlx::postgres::PgPool;
use sqlx::Row;
use tracing::debug;
use crate::domain::bag::{Bag, BagId, NewBag};
use crate::domain::cuboid::Cuboid;
use crate::domain::repository::{BagRepository, RepositoryError};
use super::postgres_cuboid::parse_cuboid_row;

pub struct PostgresBagRepository {
    pool: PgPool,
}

impl PostgresBagRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BagRepository for PostgresBagRepository {
    async fn insert(&self, bag: NewBag) -> Result<Bag, RepositoryError> {
        let row = sqlx::query(
            r#"
            INSERT INTO bags (title, volume)
            VALUES ($1, $2)
            RETURNING id
            "#
        )
        .bind(&bag.title)
        .bind(bag.volume)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(format!("Failed to save bag: {}", e)))?;

        let id: i64 = row.get("id");
        Ok(Bag::restore(BagId(id), bag.title, bag.volume, Vec::new()))
    }

    async fn find_by_id(&self, id: BagId) -> Result<Option<Bag>, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(
            r#"
            SELECT id, title, volume
            FROM bags
            WHERE id = $1
            "#
        )
        .bind(id.0)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = row else {
            tx.commit().await?;
            return Ok(None);
        };

        let cuboid_rows = sqlx::query(
            r#"
            SELECT id, width, height, depth, bag_id
            FROM cuboids
            WHERE bag_id = $1
            ORDER BY id ASC
            "#
        )
        .bind(id.0)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        let cuboids = cuboid_rows
            .into_iter()
            .map(parse_cuboid_row)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(parse_bag_row(row, cuboids)))
    }

    async fn list_all(&self) -> Result<Vec<Bag>, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let bag_rows = sqlx::query(
            r#"
            SELECT id, title, volume
            FROM bags
            ORDER BY id ASC
            "#
        )
        .fetch_all(&mut *tx)
        .await?;

        let cuboid_rows = sqlx::query(
            r#"
            SELECT id, width, height, depth, bag_id
            FROM cuboids
            ORDER BY id ASC
            "#
        )
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        let mut cuboids = cuboid_rows
            .into_iter()
            .map(parse_cuboid_row)
            .collect::<Result<Vec<_>, _>>()?;

        let mut bags = Vec::with_capacity(bag_rows.len());
        for row in bag_rows {
            let bag_id = BagId(row.get("id"));
            let (owned, rest): (Vec<Cuboid>, Vec<Cuboid>) =
                cuboids.into_iter().partition(|c| c.bag_id == bag_id);
            cuboids = rest;
            bags.push(parse_bag_row(row, owned));
        }
        Ok(bags)
    }

    async fn delete(&self, id: BagId) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let removed = sqlx::query(
            r#"
            DELETE FROM cuboids
            WHERE bag_id = $1
            "#
        )
        .bind(id.0)
        .execute(&mut *tx)
        .await?;

        let result = sqlx::query(
            r#"
            DELETE FROM bags
            WHERE id = $1
            "#
        )
        .bind(id.0)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(RepositoryError::NotFound(format!("Bag {} not found", id)));
        }

        tx.commit().await?;
        debug!("Deleted bag {} and {} cuboid(s)", id, removed.rows_affected());
        Ok(())
    }
}

fn parse_bag_row(row: sqlx::postgres::PgRow, cuboids: Vec<Cuboid>) -> Bag {
    let id: i64 = row.get("id");
    let title: String = row.get("title");
    let volume: f64 = row.get("volume");
    Bag::restore(BagId(id), title, volume, cuboids)
}
