use serde::Deserialize;
use utoipa::IntoParams;

use crate::application::dto::pagination::PageRequestDTO;
use crate::infra::constants::DEFAULT_PER_PAGE;

#[derive(Debug, Deserialize, IntoParams)]
pub struct PaginationQuery {
    #[param(minimum = 1, default = 1)]
    pub page: Option<i64>,
    #[param(minimum = 1, maximum = 100, default = 20)]
    pub per_page: Option<i64>,
}

impl From<PaginationQuery> for PageRequestDTO {
    fn from(query: PaginationQuery) -> Self {
        Self {
            page: query.page.unwrap_or(1),
            per_page: query.per_page.unwrap_or(DEFAULT_PER_PAGE),
        }
    }
}

/// Declares a `{ total, page, per_page, items }` response for one item type.
macro_rules! page_response {
    ($name:ident, $item:ty) => {
        #[derive(Debug, serde::Serialize, utoipa::ToSchema)]
        pub struct $name {
            pub total: i64,
            pub page: i64,
            pub per_page: i64,
            pub items: Vec<$item>,
        }

        impl<T> From<$crate::application::dto::pagination::PageDTO<T>> for $name
        where
            $item: From<T>,
        {
            fn from(page: $crate::application::dto::pagination::PageDTO<T>) -> Self {
                Self {
                    total: page.total,
                    page: page.page,
                    per_page: page.per_page,
                    items: page.items.into_iter().map(<$item>::from).collect(),
                }
            }
        }
    };
}

pub(crate) use page_response;

#[cfg(test)]
mod tests {
    use crate::adapter::http::schema::pagination::PaginationQuery;
    use crate::application::dto::pagination::PageRequestDTO;

    #[test]
    fn test_missing_query_uses_defaults() {
        let dto: PageRequestDTO = PaginationQuery {
            page: None,
            per_page: None,
        }
        .into();

        assert_eq!(dto.page, 1);
        assert_eq!(dto.per_page, 20);
    }
}
