use sea_orm::sea_query::{Expr, LikeExpr};
use sea_orm::{ColumnTrait, EntityTrait, Order, QueryFilter, QueryOrder, QuerySelect, Select};

use models::property;

use crate::pagination::Window;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// `desc` (any case) sorts descending; everything else ascending.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some(s) if s.eq_ignore_ascii_case("desc") => SortOrder::Desc,
            _ => SortOrder::Asc,
        }
    }
}

impl From<SortOrder> for Order {
    fn from(o: SortOrder) -> Self {
        match o {
            SortOrder::Asc => Order::Asc,
            SortOrder::Desc => Order::Desc,
        }
    }
}

/// Listing filter, sort and window.
#[derive(Clone, Debug, Default)]
pub struct ListProperties {
    /// Exact match; empty means any type.
    pub property_type: String,
    /// Case-insensitive substring of the title; empty means any title.
    pub title_like: String,
    pub window: Window,
    pub sort: Option<String>,
    pub order: SortOrder,
}

/// One page of properties plus the size of the whole filtered set.
#[derive(Clone, Debug)]
pub struct ListPage {
    pub items: Vec<property::Model>,
    pub total: u64,
}

/// Map a client-facing sort field to a column; unknown fields are ignored.
pub fn sort_column(field: &str) -> Option<property::Column> {
    match field {
        "_id" | "id" => Some(property::Column::Id),
        "title" => Some(property::Column::Title),
        "description" => Some(property::Column::Description),
        "propertyType" | "property_type" => Some(property::Column::PropertyType),
        "location" => Some(property::Column::Location),
        "price" => Some(property::Column::Price),
        "createdAt" | "created_at" => Some(property::Column::CreatedAt),
        "updatedAt" | "updated_at" => Some(property::Column::UpdatedAt),
        _ => None,
    }
}

/// Escape LIKE wildcards so user input matches literally. The needle is
/// folded with [`property::search_key`], like the stored `title_search`.
pub fn like_pattern(needle: &str) -> String {
    let mut out = String::with_capacity(needle.len() + 2);
    out.push('%');
    for c in property::search_key(needle).chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('%');
    out
}

impl ListProperties {
    /// Filtered select without window or ordering; shared by the count query.
    pub fn filtered(&self) -> Select<property::Entity> {
        let mut select = property::Entity::find();
        if !self.property_type.is_empty() {
            select = select.filter(property::Column::PropertyType.eq(self.property_type.clone()));
        }
        if !self.title_like.is_empty() {
            let title = Expr::col((property::Entity, property::Column::TitleSearch));
            select = select.filter(title.like(LikeExpr::new(like_pattern(&self.title_like)).escape('\\')));
        }
        select
    }

    /// Filtered, sorted and windowed select for the page itself.
    pub fn page(&self) -> Select<property::Entity> {
        let mut select = self.filtered();
        if let Some(col) = self.sort.as_deref().and_then(sort_column) {
            select = select.order_by(col, self.order.into());
        }
        // Stable ordering between pages
        select
            .order_by_asc(property::Column::Id)
            .offset(self.window.offset())
            .limit(self.window.effective_limit())
    }
}
