use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct Pagination {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl Pagination {
    pub fn normalize(&self) -> (i64, i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let per_page = self.per_page.unwrap_or(20).clamp(1, 100);
        let offset = (page - 1) * per_page;
        (page, per_page, offset)
    }
}

#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Browse filters. `category` of "All" (or absent) means no category filter;
/// `q` is matched case-insensitively against name and description.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct GearQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub category: Option<String>,
    pub q: Option<String>,
    pub sort_order: Option<SortOrder>,
}

impl GearQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            per_page: self.per_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_defaults_and_bounds() {
        let default = Pagination {
            page: None,
            per_page: None,
        };
        assert_eq!(default.normalize(), (1, 20, 0));

        let clamped = Pagination {
            page: Some(0),
            per_page: Some(1000),
        };
        assert_eq!(clamped.normalize(), (1, 100, 0));

        let third_page = Pagination {
            page: Some(3),
            per_page: Some(10),
        };
        assert_eq!(third_page.normalize(), (3, 10, 20));
    }
}
