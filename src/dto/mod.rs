//! DTOs compartidos de la API
//!
//! Metadatos de paginación y normalización de query params.

use serde::Serialize;

/// Metadatos de paginación calculados con el COUNT(*) acompañante
#[derive(Debug, Clone, Serialize)]
pub struct PaginationMeta {
    pub page: i64,
    pub limit: i64,
    #[serde(rename = "totalItems")]
    pub total_items: i64,
    #[serde(rename = "totalPages")]
    pub total_pages: i64,
}

impl PaginationMeta {
    pub fn new(page: i64, limit: i64, total_items: i64) -> Self {
        let total_pages = if total_items == 0 {
            0
        } else {
            (total_items + limit - 1) / limit
        };
        Self {
            page,
            limit,
            total_items,
            total_pages,
        }
    }
}

/// Normalizar parámetros page/limit de query string
pub fn normalize_page_limit(page: Option<i64>, limit: Option<i64>) -> (i64, i64, i64) {
    let page = page.unwrap_or(1).max(1);
    let limit = limit.unwrap_or(10).clamp(1, 100);
    let offset = (page - 1) * limit;
    (page, limit, offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_meta_rounds_up() {
        let meta = PaginationMeta::new(1, 10, 25);
        assert_eq!(meta.total_pages, 3);
        assert_eq!(PaginationMeta::new(1, 10, 30).total_pages, 3);
        assert_eq!(PaginationMeta::new(1, 10, 0).total_pages, 0);
    }

    #[test]
    fn test_normalize_page_limit_defaults_and_clamps() {
        assert_eq!(normalize_page_limit(None, None), (1, 10, 0));
        assert_eq!(normalize_page_limit(Some(3), Some(20)), (3, 20, 40));
        assert_eq!(normalize_page_limit(Some(0), Some(1000)), (1, 100, 0));
    }
}
