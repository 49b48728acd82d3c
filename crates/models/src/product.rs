use sea_orm::{
    entity::prelude::*, sea_query::OnConflict, DatabaseConnection, QueryFilter, Set,
};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub slug: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub price: Decimal,
    pub images: Vec<String>,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    pub stock: i32,
    pub active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Fields supplied when a catalog entry is first written.
#[derive(Clone, Debug)]
pub struct NewProduct {
    pub name: String,
    pub slug: String,
    pub description: String,
    pub price: Decimal,
    pub images: Vec<String>,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    pub stock: i32,
    pub active: bool,
}

pub fn validate(p: &NewProduct) -> Result<(), ModelError> {
    if p.name.trim().is_empty() {
        return Err(ModelError::Validation("name required".into()));
    }
    if p.slug.trim().is_empty() || p.slug.chars().any(|c| c.is_whitespace() || c.is_ascii_uppercase()) {
        return Err(ModelError::Validation("slug must be non-empty, lowercase, without spaces".into()));
    }
    if p.price.is_sign_negative() {
        return Err(ModelError::Validation("price must be >= 0".into()));
    }
    if p.stock < 0 {
        return Err(ModelError::Validation("stock must be >= 0".into()));
    }
    Ok(())
}

impl NewProduct {
    fn into_active_model(self) -> ActiveModel {
        let now = Utc::now().into();
        ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(self.name),
            slug: Set(self.slug),
            description: Set(self.description),
            price: Set(self.price),
            images: Set(self.images),
            sizes: Set(self.sizes),
            colors: Set(self.colors),
            stock: Set(self.stock),
            active: Set(self.active),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }
}

pub async fn find_by_slug(db: &DatabaseConnection, slug: &str) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find().filter(Column::Slug.eq(slug)).one(db).await?)
}

/// Insert keyed by slug; an existing row with the same slug is left untouched
/// and returned as-is.
pub async fn insert_if_absent(db: &DatabaseConnection, p: NewProduct) -> Result<Model, ModelError> {
    validate(&p)?;
    let slug = p.slug.clone();
    Entity::insert(p.into_active_model())
        .on_conflict(OnConflict::column(Column::Slug).do_nothing().to_owned())
        .exec_without_returning(db)
        .await?;
    find_by_slug(db, &slug)
        .await?
        .ok_or_else(|| ModelError::Db(format!("product {slug} missing after upsert")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NewProduct {
        NewProduct {
            name: "Git Commit Cap".into(),
            slug: "git-commit-cap".into(),
            description: "cap".into(),
            price: Decimal::new(2250, 2),
            images: vec![],
            sizes: vec!["Adjustable".into()],
            colors: vec!["Black".into()],
            stock: 40,
            active: true,
        }
    }

    #[test]
    fn validate_accepts_catalog_entry() {
        assert!(validate(&sample()).is_ok());
    }

    #[test]
    fn validate_rejects_negative_price_and_stock() {
        let mut p = sample();
        p.price = Decimal::new(-1, 2);
        assert!(matches!(validate(&p), Err(ModelError::Validation(_))));
        let mut p = sample();
        p.stock = -3;
        assert!(matches!(validate(&p), Err(ModelError::Validation(_))));
    }

    #[test]
    fn validate_rejects_bad_slug() {
        let mut p = sample();
        p.slug = "Git Commit".into();
        assert!(validate(&p).is_err());
    }

    #[test]
    fn model_serializes_camel_case() {
        let now = Utc::now().into();
        let m = Model {
            id: Uuid::new_v4(),
            name: "n".into(),
            slug: "n".into(),
            description: "d".into(),
            price: Decimal::new(1999, 2),
            images: vec![],
            sizes: vec![],
            colors: vec![],
            stock: 1,
            active: true,
            created_at: now,
            updated_at: now,
        };
        let v = serde_json::to_value(&m).unwrap();
        assert!(v.get("createdAt").is_some());
        assert_eq!(v["price"], "19.99");
    }
}
