use async_trait::async_trait;
use models::user::NewUser;
use uuid::Uuid;

use super::domain::{AuthUser, UserRecord};
use super::errors::AuthError;

/// Repository abstraction for auth-related persistence.
///
/// `create_user` must report a duplicate email as `AuthError::Conflict`
/// even when the caller's own lookup found nothing.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, AuthError>;
    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<AuthUser>, AuthError>;
    async fn create_user(&self, new: NewUser) -> Result<AuthUser, AuthError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    use chrono::Utc;

    #[derive(Default)]
    pub struct MockAuthRepository {
        users: Mutex<HashMap<String, UserRecord>>, // key: email
    }

    impl MockAuthRepository {
        pub fn len(&self) -> usize {
            self.users.lock().unwrap().len()
        }

        pub fn is_empty(&self) -> bool {
            self.len() == 0
        }

        pub fn stored_hash(&self, email: &str) -> Option<String> {
            self.users.lock().unwrap().get(email).map(|r| r.password_hash.clone())
        }
    }

    #[async_trait]
    impl AuthRepository for MockAuthRepository {
        async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, AuthError> {
            let users = self.users.lock().unwrap();
            Ok(users.get(email).cloned())
        }

        async fn find_user_by_id(&self, id: Uuid) -> Result<Option<AuthUser>, AuthError> {
            let users = self.users.lock().unwrap();
            Ok(users.values().find(|r| r.user.id == id).map(|r| r.user.clone()))
        }

        async fn create_user(&self, new: NewUser) -> Result<AuthUser, AuthError> {
            let mut users = self.users.lock().unwrap();
            if users.contains_key(&new.email) {
                return Err(AuthError::Conflict);
            }
            let now = Utc::now().into();
            let user = AuthUser {
                id: Uuid::new_v4(),
                email: new.email.clone(),
                first_name: new.first_name,
                last_name: new.last_name,
                phone: new.phone,
                birth_date: new.birth_date,
                role: new.role,
                created_at: now,
                updated_at: now,
            };
            users.insert(new.email, UserRecord { user: user.clone(), password_hash: new.password_hash });
            Ok(user)
        }
    }
}
