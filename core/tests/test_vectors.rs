//! Verify `build_request` against JSON test vectors stored in `test-vectors/`.
//!
//! Each case gives a path and caller options and describes the request the
//! transport must receive. Bodies are compared as parsed JSON, the rest as
//! literal strings since the query string must be reproducible byte for byte.

use serde_json::Value;
use shell_core::{ApiClient, ApiError, ClientConfig, HttpMethod, HttpRequest, HttpResponse, RequestOptions, Transport};

/// Never used for sending; these tests only build requests.
struct NoTransport;

impl Transport for NoTransport {
    async fn send(&self, _request: HttpRequest) -> Result<HttpResponse, ApiError> {
        Err(ApiError::Transport("not connected".to_string()))
    }
}

fn parse_method(value: &Value) -> HttpMethod {
    serde_json::from_value(value.clone()).unwrap()
}

fn pairs(value: &Value) -> Vec<(String, String)> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|pair| {
            let arr = pair.as_array().unwrap();
            (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
        })
        .collect()
}

fn options_from(case: &Value) -> RequestOptions {
    let mut options = RequestOptions::new();
    if let Some(method) = case.get("method") {
        options = options.method(parse_method(method));
    }
    if let Some(params) = case.get("params") {
        for (key, value) in pairs(params) {
            options = options.param(key, value);
        }
    }
    if let Some(headers) = case.get("headers") {
        for (name, value) in pairs(headers) {
            options = options.header(name, value);
        }
    }
    if let Some(body) = case.get("body") {
        options = options.body(body.clone());
    }
    options
}

#[test]
fn request_test_vectors() {
    let raw = include_str!("../../test-vectors/requests.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();
    let prefix = vectors["prefix"].as_str().unwrap();

    let client = ApiClient::new(ClientConfig::default().with_api_prefix(prefix), NoTransport);
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let expected = &case["expected_request"];

        let req = client
            .build_request(case["path"].as_str().unwrap(), options_from(&case["options"]))
            .unwrap();

        assert_eq!(req.method, parse_method(&expected["method"]), "{name}: method");
        assert_eq!(req.url, format!("{prefix}{}", expected["path"].as_str().unwrap()), "{name}: url");
        assert_eq!(req.headers, pairs(&expected["headers"]), "{name}: headers");

        match &expected["body"] {
            Value::Null => assert!(req.body.is_none(), "{name}: body should be None"),
            body => {
                let sent: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
                assert_eq!(&sent, body, "{name}: body");
            }
        }
    }
}
