use calculations_sdk::Calculation;
use sea_orm::ActiveValue;

use super::entity;

impl From<entity::Model> for Calculation {
    fn from(m: entity::Model) -> Self {
        Self {
            id: m.id,
            expression: m.expression,
            result: m.result,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// Fully populated active model, used for inserts.
pub fn to_active_model(c: Calculation) -> entity::ActiveModel {
    entity::ActiveModel {
        id: ActiveValue::Set(c.id),
        expression: ActiveValue::Set(c.expression),
        result: ActiveValue::Set(c.result),
        created_at: ActiveValue::Set(c.created_at),
        updated_at: ActiveValue::Set(c.updated_at),
    }
}
