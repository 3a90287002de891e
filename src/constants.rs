pub const API_NAME: &str = "[cake-store]";

pub const REQUEST_ID_HEADER: &str = "x-request-id";
