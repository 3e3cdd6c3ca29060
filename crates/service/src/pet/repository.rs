use async_trait::async_trait;
use chrono::Utc;
use models::pet::{self, NewPet};
use sea_orm::{
    sea_query::{Expr, Func, LikeExpr},
    ActiveModelTrait, Condition, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder,
};
use uuid::Uuid;

use crate::errors::ServiceError;

/// Document Store operations the pet service relies on.
#[async_trait]
pub trait PetRepository: Send + Sync {
    /// Assign a fresh id, stamp timestamps and store the document.
    async fn insert(&self, new_pet: NewPet) -> Result<pet::Model, ServiceError>;
    /// Every document, oldest first.
    async fn find_all(&self) -> Result<Vec<pet::Model>, ServiceError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<pet::Model>, ServiceError>;
    /// Overwrite an existing document and bump `updated_at`.
    async fn save(&self, model: pet::Model) -> Result<pet::Model, ServiceError>;
    /// Remove a document, returning it if it existed.
    async fn delete(&self, id: Uuid) -> Result<Option<pet::Model>, ServiceError>;
    /// Case-insensitive substring match on petname OR pettype OR petbreed.
    async fn search(&self, term: &str) -> Result<Vec<pet::Model>, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmPetRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmPetRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

fn db_err(e: sea_orm::DbErr) -> ServiceError { ServiceError::Db(e.to_string()) }

/// `%term%` with LIKE metacharacters escaped by `\`.
pub fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

fn lower_like(col: pet::Column, pattern: &str) -> sea_orm::sea_query::SimpleExpr {
    Expr::expr(Func::lower(Expr::col(col))).like(LikeExpr::new(pattern).escape('\\'))
}

#[async_trait]
impl PetRepository for SeaOrmPetRepository {
    async fn insert(&self, new_pet: NewPet) -> Result<pet::Model, ServiceError> {
        let model = new_pet.into_model(Uuid::new_v4(), Utc::now().into());
        model.into_active_model().reset_all().insert(&self.db).await.map_err(db_err)
    }

    async fn find_all(&self) -> Result<Vec<pet::Model>, ServiceError> {
        pet::Entity::find()
            .order_by_asc(pet::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<pet::Model>, ServiceError> {
        pet::Entity::find_by_id(id).one(&self.db).await.map_err(db_err)
    }

    async fn save(&self, mut model: pet::Model) -> Result<pet::Model, ServiceError> {
        model.updated_at = Utc::now().into();
        match model.into_active_model().reset_all().update(&self.db).await {
            Ok(m) => Ok(m),
            Err(sea_orm::DbErr::RecordNotUpdated) => Err(ServiceError::not_found("Pet")),
            Err(e) => Err(db_err(e)),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<Option<pet::Model>, ServiceError> {
        let Some(existing) = self.find_by_id(id).await? else { return Ok(None) };
        let res = pet::Entity::delete_by_id(id).exec(&self.db).await.map_err(db_err)?;
        // a concurrent delete won the race; report it the same way as absent
        Ok((res.rows_affected > 0).then_some(existing))
    }

    async fn search(&self, term: &str) -> Result<Vec<pet::Model>, ServiceError> {
        let pattern = like_pattern(term);
        let cond = Condition::any()
            .add(lower_like(pet::Column::Petname, &pattern))
            .add(lower_like(pet::Column::Pettype, &pattern))
            .add(lower_like(pet::Column::Petbreed, &pattern));
        pet::Entity::find()
            .filter(cond)
            .order_by_asc(pet::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)
    }
}
