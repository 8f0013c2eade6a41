use serde::Deserialize;

const DEFAULT_LIMIT: i64 = 10;
const DEFAULT_PAGE: i64 = 1;

/// Paginación por límite y número de página (base 1)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    limit: i64,
    page: i64,
}

impl Pagination {
    /// `limit` se acota a 0 como mínimo y `page` a 1.
    pub fn new(limit: i64, page: i64) -> Self {
        Self {
            limit: limit.max(0),
            page: page.max(1),
        }
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    /// Satura en `i64::MAX`: una página enorme da una página vacía.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT, DEFAULT_PAGE)
    }
}

/// Parámetros `?limit=&page=` tal como llegan en la query
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub limit: Option<String>,
    pub page: Option<String>,
}

impl PageQuery {
    /// Valores no numéricos, ausentes o cero caen al valor por defecto.
    pub fn pagination(&self) -> Pagination {
        Pagination::new(
            parse_or_default(self.limit.as_deref(), DEFAULT_LIMIT),
            parse_or_default(self.page.as_deref(), DEFAULT_PAGE),
        )
    }
}

fn parse_or_default(raw: Option<&str>, default: i64) -> i64 {
    raw.and_then(|value| value.trim().parse::<i64>().ok())
        .filter(|value| *value != 0)
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset() {
        assert_eq!(Pagination::new(10, 2).offset(), 10);
        assert_eq!(Pagination::new(5, 1).offset(), 0);
        assert_eq!(Pagination::new(25, 4).offset(), 75);
    }

    #[test]
    fn test_floors() {
        let pagination = Pagination::new(-3, -7);
        assert_eq!(pagination.limit(), 0);
        assert_eq!(pagination.page(), 1);
        assert_eq!(pagination.offset(), 0);
    }

    #[test]
    fn test_huge_page_saturates_offset() {
        assert_eq!(Pagination::new(10, i64::MAX).offset(), i64::MAX);
        assert_eq!(Pagination::new(0, i64::MAX).offset(), 0);

        let query = PageQuery {
            limit: Some("10".to_string()),
            page: Some(i64::MAX.to_string()),
        };
        assert_eq!(query.pagination().offset(), i64::MAX);
    }

    #[test]
    fn test_page_query_defaults() {
        let query = PageQuery::default();
        assert_eq!(query.pagination(), Pagination::new(10, 1));

        let query = PageQuery {
            limit: Some("abc".to_string()),
            page: Some("0".to_string()),
        };
        assert_eq!(query.pagination(), Pagination::new(10, 1));
    }

    #[test]
    fn test_page_query_parses_values() {
        let query = PageQuery {
            limit: Some("5".to_string()),
            page: Some("3".to_string()),
        };
        assert_eq!(query.pagination().offset(), 10);

        let query = PageQuery {
            limit: Some("-4".to_string()),
            page: Some("-2".to_string()),
        };
        assert_eq!(query.pagination(), Pagination::new(0, 1));
    }
}
