//! 抽出バックエンドのレスポンスパーサー
//!
//! 成功時は `ExtractionResponse`、失敗時は `{ "error": "..." }` を読む

use crate::error::Result;
use crate::types::{ErrorBody, ExtractionResponse};

/// 成功レスポンスをパース
///
/// # Examples
/// ```
/// use receipt_itemizer_common::parse_extraction_response;
///
/// let body = r#"{"vendor": "Store A", "items": [], "imageUrl": "/uploads/a.jpg"}"#;
/// let response = parse_extraction_response(body).unwrap();
/// assert_eq!(response.vendor, "Store A");
/// ```
pub fn parse_extraction_response(body: &str) -> Result<ExtractionResponse> {
    Ok(serde_json::from_str(body.trim())?)
}

/// 失敗レスポンスからサーバー提供のエラーメッセージを取り出す
///
/// JSONでない、`error` がない、空文字列のいずれも `None`
pub fn extract_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body.trim())
        .ok()
        .and_then(|b| b.error)
        .filter(|m| !m.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_parse_extraction_response() {
        let body = r#"
            {
              "vendor": "Store A",
              "items": [
                {"quantity": "1", "name": "Milk", "itemNumber": "100", "price": "3.50"},
                {"quantity": "2", "name": "Bread", "itemNumber": "200", "price": "2.00"}
              ],
              "imageUrl": "/uploads/receipt.jpg"
            }
        "#;

        let response = parse_extraction_response(body).unwrap();
        assert_eq!(response.items.len(), 2);
        assert_eq!(response.items[1].name, "Bread");
    }

    #[test]
    fn test_parse_extraction_response_invalid() {
        let result = parse_extraction_response("not json");
        assert!(matches!(result, Err(Error::Json(_))));
    }

    #[test]
    fn test_extract_error_message() {
        assert_eq!(
            extract_error_message(r#"{"error": "bad image"}"#),
            Some("bad image".to_string())
        );
        assert_eq!(extract_error_message(r#"{"error": ""}"#), None);
        assert_eq!(extract_error_message(r#"{"detail": "x"}"#), None);
        assert_eq!(extract_error_message(r#"{"error": 42}"#), None);
        assert_eq!(extract_error_message(""), None);
        assert_eq!(extract_error_message("<html>502 Bad Gateway</html>"), None);
    }
}
