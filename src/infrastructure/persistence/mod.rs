mod mock_session_repository;
mod pg_pool;
mod pg_session_repository;

pub use mock_session_repository::MockSessionRepository;
pub use pg_pool::{create_pool, run_migrations};
pub use pg_session_repository::PgSessionRepository;
