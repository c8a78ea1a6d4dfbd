pub mod admin_auth;
pub mod metrics;
pub mod request_id;
