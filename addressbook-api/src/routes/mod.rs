/// API route handlers
///
/// - `health`: Health check endpoint
/// - `addresses`: Address CRUD endpoints

pub mod addresses;
pub mod health;
