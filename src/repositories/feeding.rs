//! Feeding repository for database operations.

use anyhow::Result;
use chrono::NaiveDate;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, TransactionTrait,
};

use crate::entities::feeding;
use crate::feeding::Feeding;
use crate::utils::packed;

/// Rows per multi-row insert, five bound columns each
const INSERT_BATCH_SIZE: usize = 500;

/// Repository for feeding-related database operations.
pub struct FeedingRepository;

impl FeedingRepository {
    /// Insert a new feeding and return it with its assigned id.
    pub async fn insert<C>(conn: &C, feeding: &Feeding) -> Result<Feeding>
    where
        C: ConnectionTrait,
    {
        let model = feeding.to_active_model()?.insert(conn).await?;
        log::debug!("Inserted feeding {} at {} {}", model.id, model.date, model.time);
        Ok(Feeding::try_from(model)?)
    }

    /// Insert feedings, replacing existing rows that share an id.
    ///
    /// All rows are written in one transaction: if any row fails, nothing is
    /// stored. Returns the number of feedings written. An empty slice is a no-op.
    pub async fn insert_many<C>(conn: &C, feedings: &[Feeding]) -> Result<usize>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        if feedings.is_empty() {
            return Ok(0);
        }

        let (with_id, without_id): (Vec<&Feeding>, Vec<&Feeding>) = feedings.iter().partition(|f| f.id.is_some());
        let txn = conn.begin().await?;

        let models = with_id
            .iter()
            .map(|f| f.to_active_model())
            .collect::<Result<Vec<_>, _>>()?;

        // SQLite caps the number of bound variables per statement
        for chunk in models.chunks(INSERT_BATCH_SIZE) {
            feeding::Entity::insert_many(chunk.iter().cloned())
                .on_conflict(
                    OnConflict::column(feeding::Column::Id)
                        .update_columns([
                            feeding::Column::Date,
                            feeding::Column::Time,
                            feeding::Column::Breast,
                            feeding::Column::Additions,
                        ])
                        .to_owned(),
                )
                .exec(&txn)
                .await?;
        }

        for feeding in &without_id {
            feeding.to_active_model()?.insert(&txn).await?;
        }

        txn.commit().await?;
        log::debug!("Stored {} feedings in one transaction", feedings.len());
        Ok(feedings.len())
    }

    /// Get a single feeding by id.
    pub async fn get_by_id<C>(conn: &C, id: i32) -> Result<Option<Feeding>>
    where
        C: ConnectionTrait,
    {
        let model = feeding::Entity::find_by_id(id).one(conn).await?;
        Ok(model.map(Feeding::try_from).transpose()?)
    }

    /// Get all feedings of one day, latest first.
    pub async fn get_by_date<C>(conn: &C, date: NaiveDate) -> Result<Vec<Feeding>>
    where
        C: ConnectionTrait,
    {
        let models = feeding::Entity::find()
            .filter(feeding::Column::Date.eq(packed::encode_date(date)?))
            .order_by_desc(feeding::Column::Time)
            .order_by_desc(feeding::Column::Id)
            .all(conn)
            .await?;

        decode_all(models)
    }

    /// Get the most recent feeding, if any.
    pub async fn get_last<C>(conn: &C) -> Result<Option<Feeding>>
    where
        C: ConnectionTrait,
    {
        let model = feeding::Entity::find()
            .order_by_desc(feeding::Column::Date)
            .order_by_desc(feeding::Column::Time)
            .order_by_desc(feeding::Column::Id)
            .one(conn)
            .await?;

        Ok(model.map(Feeding::try_from).transpose()?)
    }

    /// Get every feeding in chronological order.
    pub async fn get_all<C>(conn: &C) -> Result<Vec<Feeding>>
    where
        C: ConnectionTrait,
    {
        let models = feeding::Entity::find()
            .order_by_asc(feeding::Column::Date)
            .order_by_asc(feeding::Column::Time)
            .order_by_asc(feeding::Column::Id)
            .all(conn)
            .await?;

        decode_all(models)
    }

    /// Get feedings strictly before `date`, in chronological order.
    pub async fn get_before<C>(conn: &C, date: NaiveDate) -> Result<Vec<Feeding>>
    where
        C: ConnectionTrait,
    {
        let models = feeding::Entity::find()
            .filter(feeding::Column::Date.lt(packed::encode_date(date)?))
            .order_by_asc(feeding::Column::Date)
            .order_by_asc(feeding::Column::Time)
            .all(conn)
            .await?;

        decode_all(models)
    }

    /// Number of stored feedings.
    pub async fn count<C>(conn: &C) -> Result<u64>
    where
        C: ConnectionTrait,
    {
        Ok(feeding::Entity::find().count(conn).await?)
    }

    /// Delete a feeding. Returns whether a row was removed.
    pub async fn delete<C>(conn: &C, id: i32) -> Result<bool>
    where
        C: ConnectionTrait,
    {
        let result = feeding::Entity::delete_by_id(id).exec(conn).await?;
        Ok(result.rows_affected > 0)
    }
}

fn decode_all(models: Vec<feeding::Model>) -> Result<Vec<Feeding>> {
    Ok(models
        .into_iter()
        .map(Feeding::try_from)
        .collect::<Result<Vec<_>, _>>()?)
}
