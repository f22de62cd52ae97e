use async_trait::async_trait;
use calculations_sdk::Calculation;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

use crate::domain::repo::CalculationRepository;

use super::entity::{self, Entity as CalculationEntity};
use super::mapper::to_active_model;

pub struct SeaOrmCalculationRepository {
    db: DatabaseConnection,
}

impl SeaOrmCalculationRepository {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CalculationRepository for SeaOrmCalculationRepository {
    async fn list(&self) -> anyhow::Result<Vec<Calculation>> {
        let rows = CalculationEntity::find()
            .order_by_asc(entity::Column::CreatedAt)
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: &str) -> anyhow::Result<Option<Calculation>> {
        let row = CalculationEntity::find_by_id(id.to_owned())
            .one(&self.db)
            .await?;

        Ok(row.map(Into::into))
    }

    async fn insert(&self, calculation: Calculation) -> anyhow::Result<Calculation> {
        let model = to_active_model(calculation).insert(&self.db).await?;
        Ok(model.into())
    }

    async fn update(&self, calculation: Calculation) -> anyhow::Result<Option<Calculation>> {
        // Zero affected rows: the record was deleted in the meantime.
        let res = CalculationEntity::update_many()
            .col_expr(
                entity::Column::Expression,
                Expr::value(calculation.expression.clone()),
            )
            .col_expr(entity::Column::Result, Expr::value(calculation.result.clone()))
            .col_expr(entity::Column::UpdatedAt, Expr::value(calculation.updated_at))
            .filter(entity::Column::Id.eq(calculation.id.as_str()))
            .exec(&self.db)
            .await?;

        Ok((res.rows_affected > 0).then_some(calculation))
    }

    async fn delete(&self, id: &str) -> anyhow::Result<bool> {
        let res = CalculationEntity::delete_by_id(id.to_owned())
            .exec(&self.db)
            .await?;

        Ok(res.rows_affected > 0)
    }
}
