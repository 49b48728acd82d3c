use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::{Expr, Order};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Select,
};

use models::product;

use crate::errors::ServiceError;
use crate::products::domain::{ProductQuery, SortField, SortOrder};
use crate::products::repository::ProductRepository;

pub struct SeaOrmProductRepository {
    pub db: DatabaseConnection,
}

/// Translate the listing predicate into a SeaORM condition. Only the
/// constraints present in `query` are emitted, besides `active = true`.
pub fn product_condition(query: &ProductQuery) -> Condition {
    let mut cond = Condition::all().add(product::Column::Active.eq(true));
    if let Some(min) = query.price.min {
        cond = cond.add(product::Column::Price.gte(min));
    }
    if let Some(max) = query.price.max {
        cond = cond.add(product::Column::Price.lte(max));
    }
    if let Some(search) = &query.search {
        let pattern = like_pattern(search);
        cond = cond.add(
            Condition::any()
                .add(Expr::col((product::Entity, product::Column::Name)).ilike(pattern.clone()))
                .add(Expr::col((product::Entity, product::Column::Description)).ilike(pattern)),
        );
    }
    cond
}

/// `%text%` with LIKE metacharacters escaped (backslash is the Postgres default escape).
pub fn like_pattern(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('%');
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('%');
    out
}

fn sort_column(field: SortField) -> product::Column {
    match field {
        SortField::Price => product::Column::Price,
        SortField::Name => product::Column::Name,
        SortField::CreatedAt => product::Column::CreatedAt,
    }
}

fn sort_order(order: SortOrder) -> Order {
    match order {
        SortOrder::Asc => Order::Asc,
        SortOrder::Desc => Order::Desc,
    }
}

/// Filtered and ordered select, without pagination.
pub fn listing_select(query: &ProductQuery) -> Select<product::Entity> {
    product::Entity::find()
        .filter(product_condition(query))
        .order_by(sort_column(query.sort.field), sort_order(query.sort.order))
        .order_by_asc(product::Column::Id)
}

#[async_trait::async_trait]
impl ProductRepository for SeaOrmProductRepository {
    async fn find_page(&self, query: &ProductQuery) -> Result<Vec<product::Model>, ServiceError> {
        let rows = listing_select(query)
            .offset(query.pagination.offset())
            .limit(query.pagination.limit)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    async fn count(&self, query: &ProductQuery) -> Result<u64, ServiceError> {
        let total = product::Entity::find()
            .filter(product_condition(query))
            .count(&self.db)
            .await?;
        Ok(total)
    }
}
