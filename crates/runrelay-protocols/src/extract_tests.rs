
    use super::*;
    use serde_json::json;

    fn result_with(content: Value) -> Value {
        json!({"data": {"message": {"content": content}}})
    }

    #[test]
    fn test_single_block() {
        let result = result_with(json!([{"text": "Hi there"}]));
        assert_eq!(extract_text(&result).unwrap(), "Hi there");
    }

    #[test]
    fn test_blocks_joined_with_newlines_in_order() {
        let result = result_with(json!([
            {"type": "text", "text": "First"},
            {"type": "text", "text": "Second"},
            {"type": "text", "text": "Third"}
        ]));
        assert_eq!(extract_text(&result).unwrap(), "First\nSecond\nThird");
    }

    #[test]
    fn test_outer_whitespace_trimmed() {
        let result = result_with(json!([{"text": "  padded  "}, {"text": "\n"}]));
        assert_eq!(extract_text(&result).unwrap(), "padded");
    }

    #[test]
    fn test_non_text_blocks_skipped() {
        let result = result_with(json!([
            {"type": "image", "url": "https://example.com/a.png"},
            "bare string",
            42,
            {"text": 7},
            {"text": "kept"}
        ]));
        assert_eq!(extract_text(&result).unwrap(), "kept");
    }

    #[test]
    fn test_empty_content_list() {
        let result = result_with(json!([]));
        assert!(matches!(extract_text(&result), Err(RelayError::EmptyContent)));
    }

    #[test]
    fn test_whitespace_only_is_empty() {
        let result = result_with(json!([{"text": "   "}, {"text": ""}]));
        assert!(matches!(extract_text(&result), Err(RelayError::EmptyContent)));
    }

    #[test]
    fn test_missing_data_is_malformed() {
        let result = json!({"other": {}});
        match extract_text(&result) {
            Err(RelayError::MalformedResult(msg)) => assert_eq!(msg, "result.data is missing"),
            other => panic!("Expected MalformedResult, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_message_is_malformed() {
        let result = json!({"data": {}});
        match extract_text(&result) {
            Err(RelayError::MalformedResult(msg)) => {
                assert_eq!(msg, "result.data.message is missing")
            }
            other => panic!("Expected MalformedResult, got {:?}", other),
        }
    }

    #[test]
    fn test_content_not_list_is_malformed() {
        let result = json!({"data": {"message": {"content": "plain"}}});
        match extract_text(&result) {
            Err(RelayError::MalformedResult(msg)) => assert!(msg.contains("not a list")),
            other => panic!("Expected MalformedResult, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_content_is_malformed() {
        let result = json!({"data": {"message": {"role": "assistant"}}});
        assert!(matches!(
            extract_text(&result),
            Err(RelayError::MalformedResult(_))
        ));
    }

    #[test]
    fn test_result_not_object_is_malformed() {
        match extract_text(&json!([1, 2, 3])) {
            Err(RelayError::MalformedResult(msg)) => assert_eq!(msg, "result is not an object"),
            other => panic!("Expected MalformedResult, got {:?}", other),
        }
    }

    #[test]
    fn test_data_wrong_type_is_malformed() {
        let result = json!({"data": "oops"});
        match extract_text(&result) {
            Err(RelayError::MalformedResult(msg)) => {
                assert_eq!(msg, "result.data is not an object")
            }
            other => panic!("Expected MalformedResult, got {:?}", other),
        }
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let result = result_with(json!([{"text": "a"}, {"text": "b"}]));
        let first = extract_text(&result).unwrap();
        let second = extract_text(&result).unwrap();
        assert_eq!(first, second);
    }
