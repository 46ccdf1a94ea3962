use serde::Serialize;

/// Body of a successful `/open-restaurants/` response.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct MyResponse {
    open_restaurants: Vec<String>,
}

impl MyResponse {
    pub fn new(open_restaurants: Vec<String>) -> Self {
        Self { open_restaurants }
    }
}

/// Body of every error response.
#[derive(Serialize)]
pub struct ErrorResponse<'a> {
    error: &'a str,
}

impl<'a> ErrorResponse<'a> {
    pub fn new(error: &'a str) -> Self {
        Self { error }
    }
}
