//! Envelope contract tests for `get`, `get_conf` and `post`.

mod common;

use baselib_request::{Client, Envelope, Error, RequestConfig, TransportError, TransportErrorKind};
use serde::Deserialize;
use serde_json::{Value, json};

use common::{MockClient, Reply, respond_json, respond_raw};

const URL: &str = "http://localhost:8080/api/user";

fn client(reply: Reply) -> Client<MockClient> {
    Client::new(MockClient::new().reply(URL, reply))
}

#[derive(Debug, PartialEq, Deserialize)]
struct User {
    id: u32,
    name: String,
}

#[tokio::test]
async fn get_returns_envelope_data() {
    let client = client(respond_json(
        200,
        json!({"retcode": 0, "retmsg": "ok", "data": {"id": 1, "name": "li"}}),
    ));

    let user: User = client.get(URL, &RequestConfig::default()).await.unwrap();
    assert_eq!(user, User { id: 1, name: "li".into() });

    let requests = client.transport().requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method.as_str(), "GET");
    assert!(requests[0].body.is_none());
}

#[tokio::test]
async fn post_returns_envelope_data() {
    let body = serde_json::to_value(Envelope::ok(json!([1, 2, 3]))).unwrap();
    let client = client(respond_json(200, body));

    let data: Vec<u8> = client
        .post(URL, &json!({"page": 1}), &RequestConfig::default())
        .await
        .unwrap();
    assert_eq!(data, vec![1, 2, 3]);
}

#[tokio::test]
async fn post_sends_json_body_and_content_type() {
    let client = client(respond_json(200, json!({"retcode": 0, "data": null})));

    let _: Value = client
        .post(URL, &json!({"q": "rust"}), &RequestConfig::default().header("X-Trace", "abc"))
        .await
        .unwrap();

    let request = &client.transport().requests()[0];
    assert_eq!(request.method.as_str(), "POST");
    assert_eq!(request.header("content-type"), Some("application/json"));
    assert_eq!(request.header("x-trace"), Some("abc"));
    let sent: Value = serde_json::from_slice(request.body.as_ref().unwrap()).unwrap();
    assert_eq!(sent, json!({"q": "rust"}));
}

#[tokio::test]
async fn caller_may_override_content_type() {
    let client = client(respond_json(200, json!({"retcode": 0, "data": 1})));

    let _: u8 = client
        .post(
            URL,
            &json!({}),
            &RequestConfig::default().header("content-type", "application/json; charset=utf-8"),
        )
        .await
        .unwrap();

    let request = &client.transport().requests()[0];
    let content_types: Vec<_> = request
        .headers
        .iter()
        .filter(|(k, _)| k.eq_ignore_ascii_case("content-type"))
        .collect();
    assert_eq!(content_types.len(), 1);
    assert_eq!(
        request.header("Content-Type"),
        Some("application/json; charset=utf-8")
    );
}

#[tokio::test]
async fn client_defaults_sit_under_call_config() {
    let transport =
        MockClient::new().reply(URL, respond_json(200, json!({"retcode": 0, "data": 0})));
    let client = Client::new(transport).with_defaults(
        RequestConfig::default()
            .header("X-App", "web")
            .header("Accept-Language", "zh-CN"),
    );

    let _: u8 = client
        .get(URL, &RequestConfig::default().header("x-app", "cli"))
        .await
        .unwrap();

    let request = &client.transport().requests()[0];
    assert_eq!(request.header("X-App"), Some("cli"));
    assert_eq!(request.header("Accept-Language"), Some("zh-CN"));
}

#[tokio::test]
async fn non_success_status_ignores_body() {
    for status in [301, 404, 500, 503] {
        let client = client(respond_json(status, json!({"retcode": 0, "data": "fine"})));
        let err = client
            .get::<Value>(URL, &RequestConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::HttpStatus { code } if code == status));
        assert_eq!(err.retmsg(), format!("{status}错误"));
    }
}

#[tokio::test]
async fn nonzero_retcode_uses_default_message() {
    let client = client(respond_json(200, json!({"retcode": 1001, "data": {"field": "name"}})));

    let err = client
        .get::<Value>(URL, &RequestConfig::default())
        .await
        .unwrap_err();
    assert_eq!(err.retmsg(), "未知错误[1001]");
    assert_eq!(err.retcode(), Some(1001));
    assert_eq!(err.data(), Some(&json!({"field": "name"})));
}

#[tokio::test]
async fn nonzero_retcode_keeps_server_message() {
    let client = client(respond_json(200, json!({"retcode": 403, "retmsg": "no permission"})));

    let err = client
        .post::<Value, _>(URL, &json!({}), &RequestConfig::default())
        .await
        .unwrap_err();
    assert_eq!(err.retmsg(), "no permission");
    assert_eq!(err.to_value().retcode, Some(403));
}

#[tokio::test]
async fn get_conf_returns_body_verbatim() {
    let client = client(respond_json(200, json!({"foo": "bar"})));

    let conf: Value = client.get_conf(URL, &RequestConfig::default()).await.unwrap();
    assert_eq!(conf, json!({"foo": "bar"}));
}

#[tokio::test]
async fn get_conf_ignores_failing_retcode() {
    let client = client(respond_json(200, json!({"retcode": 7, "retmsg": "nope"})));

    let conf: Value = client.get_conf(URL, &RequestConfig::default()).await.unwrap();
    assert_eq!(conf["retcode"], 7);
}

#[tokio::test]
async fn get_conf_still_checks_status() {
    let client = client(respond_json(502, json!({"foo": "bar"})));

    let err = client
        .get_conf::<Value>(URL, &RequestConfig::default())
        .await
        .unwrap_err();
    assert_eq!(err.retmsg(), "502错误");
}

#[tokio::test]
async fn invalid_json_is_a_decode_error() {
    let client = client(respond_raw(200, "<html>oops</html>"));

    let err = client
        .get::<Value>(URL, &RequestConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Decode { .. }));
    assert!(err.retcode().is_none());
}

#[tokio::test]
async fn payload_of_wrong_shape_is_a_decode_error() {
    let client = client(respond_json(200, json!({"retcode": 0, "data": {"id": "one"}})));

    let err = client
        .get::<User>(URL, &RequestConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Decode { .. }));
}

#[tokio::test]
async fn unreachable_server_is_reported() {
    let client = Client::new(MockClient::new());

    let err = client
        .get::<Value>(URL, &RequestConfig::default())
        .await
        .unwrap_err();
    assert_eq!(
        err.retmsg(),
        "network connection failed (server not running or URL incorrect)"
    );
    assert!(!err.is_aborted());
}

#[tokio::test]
async fn transport_failures_go_through_reason_resolver() {
    let cases = [
        (TransportErrorKind::Dns, "Failed to resolve host", "DNS resolution failed"),
        (
            TransportErrorKind::Network,
            "connection reset",
            "network error: connection reset",
        ),
        (TransportErrorKind::Other, "HTTP error 418", "HTTP error 418"),
        (TransportErrorKind::Other, "tls handshake", "unknown error: tls handshake"),
    ];

    for (kind, message, expected) in cases {
        let client = client(Reply::Fail(TransportError::new(kind, message)));
        let err = client
            .post::<Value, _>(URL, &json!({}), &RequestConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Transport { kind: k, .. } if k == kind));
        assert_eq!(err.retmsg(), expected);
    }
}

#[tokio::test]
async fn body_read_failure_reports_the_raw_message() {
    let (reply, tx) = common::channel(200);
    tx.send(Ok(bytes::Bytes::from_static(b"{\"retcode\":"))).unwrap();
    tx.send(Err(TransportError::new(TransportErrorKind::Network, "body closed early")))
        .unwrap();
    drop(tx);
    let client = client(reply);

    let err = client
        .get::<Value>(URL, &RequestConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Decode { .. }));
    assert_eq!(err.retmsg(), "body closed early");
    assert!(err.retcode().is_none());
}

#[tokio::test]
async fn params_that_fail_to_serialize_are_an_encode_error() {
    use std::collections::HashMap;

    // JSON object keys must be strings
    let mut params = HashMap::new();
    params.insert(vec![1u8], "value");

    let client = client(respond_json(200, json!({"retcode": 0})));
    let err = client
        .post::<Value, _>(URL, &params, &RequestConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Encode { .. }));
    assert!(client.transport().requests().is_empty());
}
