//! Tests for `CustomResourceEvent` and `RequestType`.

use super::event::field;
use super::{CustomResourceEvent, EventError, RequestType};
use crate::test_support::event_json;
use serde_json::json;

mod request_type {
    use super::*;

    #[test]
    fn parses_known_verbs() {
        assert_eq!(RequestType::from("Create"), RequestType::Create);
        assert_eq!(RequestType::from("Update"), RequestType::Update);
        assert_eq!(RequestType::from("Delete"), RequestType::Delete);
    }

    #[test]
    fn keeps_unknown_verbs_verbatim() {
        let verb = RequestType::from("DeleteFunction");

        assert_eq!(verb, RequestType::Other("DeleteFunction".to_string()));
        assert_eq!(verb.to_string(), "DeleteFunction");
    }

    #[test]
    fn verbs_are_case_sensitive() {
        assert_eq!(
            RequestType::from("create"),
            RequestType::Other("create".to_string())
        );
    }

    #[test]
    fn only_create_and_update_fail_on_notification_error() {
        assert!(RequestType::Create.fails_on_notification_error());
        assert!(RequestType::Update.fails_on_notification_error());
        assert!(!RequestType::Delete.fails_on_notification_error());
        assert!(!RequestType::from("DeleteFunction").fails_on_notification_error());
    }

    #[test]
    fn delete_function_is_matched_by_prefix() {
        assert!(RequestType::from("DeleteFunction").is_delete_function());
        assert!(RequestType::from("DeleteFunctionResources").is_delete_function());
        assert!(!RequestType::Delete.is_delete_function());
        assert!(!RequestType::from("Rollback").is_delete_function());
    }
}

mod from_value {
    use super::*;

    #[test]
    fn extracts_header_fields() {
        let event =
            CustomResourceEvent::from_value(event_json("Create", "https://x/hook")).unwrap();

        assert_eq!(*event.request_type(), RequestType::Create);
        assert_eq!(event.request_id(), "req-1");
        assert_eq!(event.logical_resource_id(), "PhoneHome");
        assert!(event.stack_id().starts_with("arn:aws:cloudformation"));
        assert_eq!(event.physical_resource_id(), None);
        assert_eq!(
            event.response_url().host_str(),
            Some("cloudformation-custom-resource-response.s3.amazonaws.com")
        );
    }

    #[test]
    fn keeps_every_raw_field() {
        let raw = event_json("Update", "https://x/hook");
        let event = CustomResourceEvent::from_value(raw.clone()).unwrap();

        assert_eq!(event.fields(), raw.as_object().unwrap());
    }

    #[test]
    fn reads_physical_resource_id_when_present() {
        let mut raw = event_json("Update", "https://x/hook");
        raw[field::PHYSICAL_RESOURCE_ID] = json!("phys-1");

        let event = CustomResourceEvent::from_value(raw).unwrap();

        assert_eq!(event.physical_resource_id(), Some("phys-1"));
    }

    #[test]
    fn rejects_non_object() {
        let result = CustomResourceEvent::from_value(json!(["Create"]));

        assert!(matches!(result, Err(EventError::NotAnObject)));
    }

    #[test]
    fn rejects_missing_request_type() {
        let mut raw = event_json("Create", "https://x/hook");
        raw.as_object_mut().unwrap().remove(field::REQUEST_TYPE);

        let result = CustomResourceEvent::from_value(raw);

        assert!(matches!(
            result,
            Err(EventError::MissingField(field::REQUEST_TYPE))
        ));
    }

    #[test]
    fn rejects_non_string_request_type() {
        let mut raw = event_json("Create", "https://x/hook");
        raw[field::REQUEST_TYPE] = json!(1);

        let result = CustomResourceEvent::from_value(raw);

        assert!(matches!(
            result,
            Err(EventError::NotAString(field::REQUEST_TYPE))
        ));
    }

    #[test]
    fn rejects_invalid_response_url() {
        let mut raw = event_json("Create", "https://x/hook");
        raw[field::RESPONSE_URL] = json!("not a url");

        let result = CustomResourceEvent::from_value(raw);

        assert!(matches!(
            result,
            Err(EventError::InvalidResponseUrl { .. })
        ));
    }

    #[test]
    fn missing_optional_ids_default_to_empty() {
        let event = CustomResourceEvent::from_value(json!({
            "RequestType": "Delete",
            "ResponseURL": "https://example.com/response",
        }))
        .unwrap();

        assert_eq!(event.stack_id(), "");
        assert_eq!(event.request_id(), "");
        assert_eq!(event.logical_resource_id(), "");
    }
}
