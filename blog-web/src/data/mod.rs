pub(crate) mod post_repository;
pub(crate) mod repositories;
pub(crate) mod session_repository;
pub(crate) mod user_repository;
