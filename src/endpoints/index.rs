use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::{Body, Response};

const INDEX_HTML: &str = include_str!("../../static/index.html");

pub fn index() -> Response<Body> {
    let mut response = Response::new(Body::from(INDEX_HTML));
    response.headers_mut().insert(
        CONTENT_TYPE,
        HeaderValue::from_static("text/html; charset=utf-8"),
    );
    response
}
