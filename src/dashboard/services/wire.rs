//! # Wire Schema
//!
//! JSON shapes exchanged with the record store. Responses are decoded into
//! these types before anything else sees them.

use crate::dashboard::models::{Page, Record};
use crate::dashboard::services::ServiceError;
use serde::Deserialize;

/// Body of `GET /api/records`
#[derive(Debug, Clone, Deserialize)]
pub struct ListResponse {
    pub data: Vec<Record>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PaginationInfo {
    pub total: usize,
}

impl ListResponse {
    /// Decode a list body, failing on any shape mismatch
    pub fn decode(body: &str) -> Result<Self, ServiceError> {
        let response: ListResponse = serde_json::from_str(body)?;
        if response.data.len() > response.pagination.total {
            return Err(ServiceError::decode(format!(
                "page holds {} records but total is {}",
                response.data.len(),
                response.pagination.total
            )));
        }
        Ok(response)
    }

    pub fn into_page(self, page_index: usize, page_size: usize) -> Page {
        Page::new(self.data, page_index, page_size, self.pagination.total)
    }
}

/// Decode the record echoed back by an upsert. The store must assign an id.
pub fn decode_stored_record(body: &str) -> Result<Record, ServiceError> {
    let record: Record = serde_json::from_str(body)?;
    if record.is_new() {
        return Err(ServiceError::decode("stored record has no id"));
    }
    Ok(record)
}

/// Refuse page arguments the store must never see
pub fn check_page_args(page_index: usize, page_size: usize) -> Result<(), ServiceError> {
    if page_index == 0 {
        return Err(ServiceError::validation("page index starts at 1"));
    }
    if page_size == 0 {
        return Err(ServiceError::validation("page size must be positive"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::models::ErrorKind;

    #[test]
    fn list_response_should_decode_into_page() {
        let body = r#"{
            "data": [{"id": 1, "title": "A", "description": "B", "location": "C"}],
            "pagination": {"total": 11}
        }"#;
        let page = ListResponse::decode(body).unwrap().into_page(2, 10);
        assert_eq!(page.page_index, 2);
        assert_eq!(page.total_count, 11);
        assert_eq!(page.total_pages(), 2);
        assert_eq!(page.items[0].title, "A");
    }

    #[test]
    fn list_response_without_pagination_should_fail() {
        let body = r#"{"data": [], "total": 4}"#;
        let error = ListResponse::decode(body).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Decode);
    }

    #[test]
    fn list_response_with_more_items_than_total_should_fail() {
        let body = r#"{
            "data": [{"id": 1, "title": "A", "description": "B", "location": "C"}],
            "pagination": {"total": 0}
        }"#;
        assert!(ListResponse::decode(body).is_err());
    }

    #[test]
    fn stored_record_without_id_should_fail() {
        let body = r#"{"title": "A", "description": "B", "location": "C"}"#;
        let error = decode_stored_record(body).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Decode);
    }

    #[test]
    fn page_args_should_be_checked() {
        assert!(check_page_args(1, 10).is_ok());
        assert_eq!(check_page_args(0, 10).unwrap_err().kind(), ErrorKind::Validation);
        assert_eq!(check_page_args(1, 0).unwrap_err().kind(), ErrorKind::Validation);
    }
}
