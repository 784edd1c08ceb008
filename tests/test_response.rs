use courier::http::response::{Response, ResponseBuilder, StatusCode};
use courier::http::writer::{ResponseWriter, serialize_response};

#[test]
fn test_status_code_as_u16() {
    assert_eq!(StatusCode::Ok.as_u16(), 200);
    assert_eq!(StatusCode::Created.as_u16(), 201);
    assert_eq!(StatusCode::NotFound.as_u16(), 404);
    assert_eq!(StatusCode::InternalServerError.as_u16(), 500);
    assert_eq!(StatusCode::NotImplemented.as_u16(), 501);
}

#[test]
fn test_status_code_reason_phrase() {
    assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    assert_eq!(StatusCode::Created.reason_phrase(), "Created");
    assert_eq!(StatusCode::NotFound.reason_phrase(), "Not Found");
    assert_eq!(
        StatusCode::InternalServerError.reason_phrase(),
        "Internal Server Error"
    );
    assert_eq!(StatusCode::NotImplemented.reason_phrase(), "Not Implemented");
}

#[test]
fn test_response_helpers_have_empty_bodies() {
    for (response, status) in [
        (Response::created(), StatusCode::Created),
        (Response::not_found(), StatusCode::NotFound),
        (Response::internal_error(), StatusCode::InternalServerError),
        (Response::not_implemented(), StatusCode::NotImplemented),
    ] {
        assert_eq!(response.status, status);
        assert!(response.body.is_empty());
    }
}

#[test]
fn test_serialize_status_line_headers_and_body() {
    let response = Response::text(b"abc".to_vec());

    let wire = serialize_response(&response);

    assert_eq!(
        wire,
        b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 3\r\n\r\nabc".to_vec()
    );
}

#[test]
fn test_serialize_empty_body_still_frames() {
    let wire = serialize_response(&Response::not_found());

    assert_eq!(
        wire,
        b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\n\r\n".to_vec()
    );
}

#[test]
fn test_serialize_overrides_stale_content_length() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("Content-Length", "999")
        .header("X-After", "1")
        .body(b"test".to_vec())
        .build();

    let wire = String::from_utf8(serialize_response(&response)).unwrap();

    assert_eq!(
        wire,
        "HTTP/1.1 200 OK\r\nContent-Length: 4\r\nX-After: 1\r\n\r\ntest"
    );
}

#[test]
fn test_serialize_skips_empty_header_values() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("Connection", "")
        .header("Content-Encoding", "")
        .build();

    let wire = String::from_utf8(serialize_response(&response)).unwrap();

    assert!(!wire.contains("Connection"));
    assert!(!wire.contains("Content-Encoding"));
}

#[test]
fn test_serialize_preserves_insertion_order() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("B-Second", "2")
        .header("A-First", "1")
        .header("b-second", "3")
        .build();

    let wire = String::from_utf8(serialize_response(&response)).unwrap();

    assert!(wire.starts_with("HTTP/1.1 200 OK\r\nb-second: 3\r\nA-First: 1\r\n"));
}

#[tokio::test]
async fn test_response_writer_writes_everything() {
    let response = Response::text(b"hello".to_vec());
    let mut writer = ResponseWriter::new(&response);
    let expected = serialize_response(&response);

    let mut sink: Vec<u8> = Vec::new();
    writer.write_to_stream(&mut sink).await.unwrap();

    assert_eq!(sink, expected);
}
