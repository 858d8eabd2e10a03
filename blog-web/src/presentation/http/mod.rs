pub(crate) mod app_error;
pub(crate) mod cookies;
pub(crate) mod handlers;
pub(crate) mod middleware;
pub(crate) mod routes;
