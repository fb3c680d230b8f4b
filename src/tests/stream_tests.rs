#[cfg(test)]
mod tests {
    use crate::{JsonStreamParser, ParserConfig, StreamError};
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, serde::Deserialize, PartialEq)]
    struct Bookmark {
        cursor: String,
        starred: bool,
    }

    // --- Fragment reassembly ---

    #[test]
    fn test_fragmented_string() {
        let mut parser = JsonStreamParser::new();
        let mut entities = parser.stream("{\"test\": \"this is ").unwrap();
        entities.extend(parser.stream("a test\"} [1,2,3]").unwrap());
        entities.extend(parser.flush().unwrap());

        assert_eq!(
            entities,
            vec![json!({"test": "this is a test"}), json!([1, 2, 3])]
        );
    }

    #[test]
    fn test_fragmented_array() {
        let mut parser = JsonStreamParser::new();
        parser.stream("{\"cursor\": \"123\", \"check\": [1,2").unwrap();
        let mut entities = parser.stream(",3]}").unwrap();
        entities.extend(parser.flush().unwrap());

        assert_eq!(entities, vec![json!({"cursor": "123", "check": [1, 2, 3]})]);
    }

    #[test]
    fn test_fragmented_boolean() {
        let mut parser = JsonStreamParser::new();
        parser.stream("{\"cursor\": \"123\", \"starred\": fals").unwrap();
        let mut entities = parser.stream("e}").unwrap();
        entities.extend(parser.flush().unwrap());

        assert_eq!(
            entities,
            vec![json!({"cursor": "123", "starred": false})]
        );
    }

    #[test]
    fn test_fragmented_integer() {
        let mut parser = JsonStreamParser::new();
        parser.stream("{\"cursor\": \"123\", \"amount\": 123").unwrap();
        let mut entities = parser.stream("4}").unwrap();
        entities.extend(parser.flush().unwrap());

        assert_eq!(
            entities,
            vec![json!({"cursor": "123", "amount": 1234})]
        );
    }

    #[test]
    fn test_empty_stream() {
        let mut parser = JsonStreamParser::new();
        assert!(parser.stream("").unwrap().is_empty());
    }

    #[test]
    fn test_typed_deserialization() {
        let mut parser = JsonStreamParser::new();
        parser.stream("{\"cursor\": \"123\", \"sta").unwrap();
        parser.stream("rred\": false}").unwrap();
        let entities = parser.flush().unwrap();

        let bookmark: Bookmark = serde_json::from_value(entities[0].clone()).unwrap();
        assert_eq!(
            bookmark,
            Bookmark {
                cursor: "123".into(),
                starred: false
            }
        );
    }

    // --- Extraction triggers ---

    #[test]
    fn test_values_below_threshold_wait_for_flush() {
        let mut parser = JsonStreamParser::new();
        assert!(parser.stream("{\"ok\": true}").unwrap().is_empty());
        assert_eq!(parser.buffered(), "{\"ok\": true}");
        assert_eq!(parser.flush().unwrap(), vec![json!({"ok": true})]);
        assert!(parser.buffered().is_empty());
    }

    #[test]
    fn test_threshold_triggers_extraction() {
        let mut parser = JsonStreamParser::with_config(ParserConfig {
            buffer_size: 8,
            allowed_incomplete_attempts: 1,
        });
        let entities = parser.stream("{\"a\": 1}").unwrap();
        assert_eq!(entities, vec![json!({"a": 1})]);
    }

    // --- Ordering and exactly-once emission ---

    #[test]
    fn test_idempotent_reassembly_across_every_split() {
        let text = r#"{"seq": 1} [true, null] {"seq": 2} "tail""#;
        let expected = vec![
            json!({"seq": 1}),
            json!([true, null]),
            json!({"seq": 2}),
            json!("tail"),
        ];

        for split in 0..=text.len() {
            let mut parser = JsonStreamParser::new();
            let mut entities = parser.stream(&text[..split]).unwrap();
            entities.extend(parser.stream(&text[split..]).unwrap());
            entities.extend(parser.flush().unwrap());
            assert_eq!(entities, expected, "split at {split}");
        }
    }

    #[test]
    fn test_order_preserved_under_small_threshold() {
        let text = r#"{"seq": 1} {"seq": 2} {"seq": 3} {"seq": 4}"#;
        let expected: Vec<_> = (1..=4).map(|i| json!({"seq": i})).collect();

        // Threshold above the largest value, so every threshold-triggered
        // pass completes at least one value and the retry counter resets.
        for chunk_len in 1..=text.len() {
            let mut parser = JsonStreamParser::with_config(ParserConfig {
                buffer_size: 16,
                allowed_incomplete_attempts: 1,
            });
            let mut entities = Vec::new();
            let bytes = text.as_bytes();
            for chunk in bytes.chunks(chunk_len) {
                let chunk = std::str::from_utf8(chunk).unwrap();
                entities.extend(parser.stream(chunk).unwrap());
            }
            entities.extend(parser.flush().unwrap());
            assert_eq!(entities, expected, "chunk length {chunk_len}");
        }
    }

    // --- Callback dispatch ---

    #[test]
    fn test_callback_invoked_in_emission_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);

        let mut parser = JsonStreamParser::new();
        parser.set_callback(move |value| {
            sink.lock().unwrap().push(value.clone());
            Ok(())
        });

        parser.stream("{\"test\": \"this is a test\"} [1,2,3]").unwrap();
        let entities = parser.flush().unwrap();

        assert_eq!(entities.len(), 2);
        assert_eq!(*seen.lock().unwrap(), entities);
    }

    #[test]
    fn test_callback_failure_preserves_partial_results() {
        let mut parser = JsonStreamParser::new();
        parser.set_callback(|value| {
            if value.is_array() {
                Err("rejecting arrays".into())
            } else {
                Ok(())
            }
        });

        parser.stream("{\"test\": \"this is a test\"} [1,2,3]").unwrap();
        let err = parser.flush().unwrap_err();
        match err {
            StreamError::CallbackFailure { partial, .. } => {
                assert_eq!(partial, vec![json!({"test": "this is a test"})]);
            }
            other => panic!("expected CallbackFailure, got {other:?}"),
        }

        // The aborting entity was already consumed and is not replayed.
        assert!(parser.flush().unwrap().is_empty());
    }

    #[test]
    fn test_replacing_callback() {
        let first = Arc::new(Mutex::new(0u32));
        let second = Arc::new(Mutex::new(0u32));

        let mut parser = JsonStreamParser::new();
        let counter = Arc::clone(&first);
        parser.set_callback(move |_| {
            *counter.lock().unwrap() += 1;
            Ok(())
        });
        parser.stream("{\"a\": 1}").unwrap();
        parser.flush().unwrap();

        let counter = Arc::clone(&second);
        parser.set_callback(move |_| {
            *counter.lock().unwrap() += 1;
            Ok(())
        });
        parser.stream("{\"b\": 2}").unwrap();
        parser.flush().unwrap();

        assert_eq!(*first.lock().unwrap(), 1);
        assert_eq!(*second.lock().unwrap(), 1);
    }
}
