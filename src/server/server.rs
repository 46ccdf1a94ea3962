use bytes::Bytes;
use chrono::NaiveDateTime;
use http_body_util::Full;
use hyper::{body::Incoming, service::Service, Method, Request, Response, StatusCode, Uri};
use log::{debug, error};
use serde::Serialize;
use url_escape::decode;

use std::{collections::HashMap, future::Future, pin::Pin, sync::Arc};

use crate::{store::store::ScheduleStore, timing::open_now::open_restaurants, DATETIME_FORMAT};

use super::myresponse::{ErrorResponse, MyResponse};

/// The Server
///
/// Handles the one API endpoint. The lookup itself is done by
/// `open_restaurants` against the shared store.
///
/// It implements hyper's `Service` so each accepted connection gets its own
/// clone. Clones share the store through an `Arc`.
#[derive(Clone)]
pub struct Server {
    store: Arc<dyn ScheduleStore>,
}

impl Server {
    pub fn setup(store: Arc<dyn ScheduleStore>) -> Self {
        Self { store }
    }

    /// Parses the query parameters and returns a `hashmap` of key pair values.
    /// Pairs without a `=` carry no value and are skipped.
    ///
    /// `+` is read as a space, as browsers send it in form-encoded queries.
    fn parse_params(text: &str) -> HashMap<String, String> {
        let mut map: HashMap<String, String> = HashMap::new();
        for pair in text.split('&') {
            if let Some((key, value)) = pair.split_once('=') {
                map.insert(key.to_string(), decode(&value.replace('+', " ")).to_string());
            }
        }
        map
    }

    /// The /open-restaurants/ API endpoint.
    ///
    /// Takes `datetime_param` (or `datetime`) as `YYYY-MM-DD HH:MM:SS`. A
    /// missing or malformed timestamp is rejected with a 422 before any lookup.
    fn open_now(&self, uri: &Uri) -> Result<Response<Full<Bytes>>, hyper::Error> {
        let Some(params) = uri.query() else {
            return Self::unprocessable("datetime_param not provided.");
        };

        let map = Self::parse_params(params);
        let Some(datetime) = map.get("datetime_param").or_else(|| map.get("datetime")) else {
            return Self::unprocessable("datetime_param not provided.");
        };

        let at = match NaiveDateTime::parse_from_str(datetime, DATETIME_FORMAT) {
            Ok(at) => at,
            Err(_) => return Self::unprocessable("Malformed Datetime. Expected YYYY-MM-DD HH:MM:SS"),
        };

        match open_restaurants(self.store.as_ref(), at) {
            Ok(names) => Self::ok_data(MyResponse::new(names)),
            Err(err) => {
                error!("Lookup for {} failed: {}", at, err);
                Self::server_error(&err.to_string())
            }
        }
    }

    fn route(&self, method: &Method, uri: &Uri) -> Result<Response<Full<Bytes>>, hyper::Error> {
        debug!("{} {}", method, uri);
        match method {
            &Method::GET => match uri.path() {
                "/open-restaurants" | "/open-restaurants/" => self.open_now(uri),
                _ => Self::not_found(),
            },
            _ => Self::not_found(),
        }
    }

    /// Return a 200 OK response with the data provided.
    fn ok_data<T: Serialize>(body: T) -> Result<Response<Full<Bytes>>, hyper::Error> {
        Ok(Self::json(StatusCode::OK, &body))
    }

    /// Return a 500 Internal Server Error response with the message provided.
    fn server_error(message: &str) -> Result<Response<Full<Bytes>>, hyper::Error> {
        Ok(Self::json(
            StatusCode::INTERNAL_SERVER_ERROR,
            &ErrorResponse::new(message),
        ))
    }

    /// Return a 422 Unprocessable Entity response for a bad query.
    fn unprocessable(message: &str) -> Result<Response<Full<Bytes>>, hyper::Error> {
        Ok(Self::json(
            StatusCode::UNPROCESSABLE_ENTITY,
            &ErrorResponse::new(message),
        ))
    }

    /// Return an empty 404 Not Found response.
    fn not_found() -> Result<Response<Full<Bytes>>, hyper::Error> {
        let mut res = Response::new(Full::new(Bytes::new()));
        *res.status_mut() = StatusCode::NOT_FOUND;
        Ok(res)
    }

    fn json<T: Serialize>(status: StatusCode, body: &T) -> Response<Full<Bytes>> {
        let (status, data) = match serde_json::to_vec(body) {
            Ok(data) => (status, data),
            Err(err) => {
                error!("Could not serialize response: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, Vec::new())
            }
        };
        let mut res = Response::new(Full::new(Bytes::from(data)));
        *res.status_mut() = status;
        res.headers_mut().insert(
            hyper::header::CONTENT_TYPE,
            hyper::header::HeaderValue::from_static("application/json"),
        );
        res
    }
}

impl Service<Request<Incoming>> for Server {
    type Response = Response<Full<Bytes>>;
    type Error = hyper::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn call(&self, req: Request<Incoming>) -> Self::Future {
        let res = self.route(req.method(), req.uri());
        Box::pin(async { res })
    }
}

#[cfg(test)]
mod tests {
    use http_body_util::BodyExt;

    use super::*;
    use crate::{parser::hours::HoursParser, store::memory::MemoryStore};

    fn server() -> Server {
        let parser = HoursParser::new();
        let store = MemoryStore::new();
        store
            .bulk_load(vec![
                (
                    "A".to_string(),
                    parser.parse("Mon-Fri 11 AM-10 PM").unwrap(),
                ),
                (
                    "B".to_string(),
                    parser.parse("Sun-Sat 12 AM-11:59 PM").unwrap(),
                ),
            ])
            .unwrap();
        Server::setup(Arc::new(store))
    }

    async fn get(server: &Server, uri: &str) -> (StatusCode, String) {
        let uri: Uri = uri.parse().unwrap();
        let response = server.route(&Method::GET, &uri).unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_open_restaurants() {
        let server = server();
        let (status, body) = get(
            &server,
            "/open-restaurants/?datetime_param=2024-01-08%2012:00:00",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"open_restaurants":["A","B"]}"#);
    }

    #[tokio::test]
    async fn test_plus_and_alias() {
        let server = server();
        let (status, body) = get(&server, "/open-restaurants?datetime=2024-01-07+23:00:00").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"open_restaurants":["B"]}"#);
    }

    #[tokio::test]
    async fn test_valueless_params_are_ignored() {
        let server = server();
        let (status, body) = get(
            &server,
            "/open-restaurants/?flag&datetime_param=2024-01-08+12:00:00",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"open_restaurants":["A","B"]}"#);

        let (status, _) = get(&server, "/open-restaurants/?flag").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_invalid_datetime() {
        let server = server();
        let (status, body) = get(
            &server,
            "/open-restaurants/?datetime_param=invalid_datetime",
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body.contains("Malformed Datetime"));

        let (status, _) = get(&server, "/open-restaurants/").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (status, _) = get(&server, "/open-restaurants/?other=1").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let server = server();
        let (status, body) = get(&server, "/api/day").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.is_empty());

        let uri: Uri = "/open-restaurants/".parse().unwrap();
        let response = server.route(&Method::POST, &uri).unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
