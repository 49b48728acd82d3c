use sea_orm::{DatabaseConnection, EntityTrait};
use uuid::Uuid;

use models::user::{self, NewUser};
use crate::auth::domain::{AuthUser, UserRecord};
use crate::auth::errors::AuthError;
use crate::auth::repository::AuthRepository;

pub struct SeaOrmAuthRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl AuthRepository for SeaOrmAuthRepository {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, AuthError> {
        let res = user::find_by_email(&self.db, email).await?;
        Ok(res.map(UserRecord::from))
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<AuthUser>, AuthError> {
        let res = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(res.map(AuthUser::from))
    }

    async fn create_user(&self, new: NewUser) -> Result<AuthUser, AuthError> {
        let created = user::create(&self.db, new).await?;
        Ok(AuthUser::from(created))
    }
}
