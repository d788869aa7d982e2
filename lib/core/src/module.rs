use axum::Router;

/// A service module that contributes HTTP routes.
///
/// Each domain module implements this trait to register its API endpoints.
/// The binary entry point collects all modules and nests their routes under
/// the API prefix.
pub trait Module: Send + Sync {
    /// Module name, used for logging.
    fn name(&self) -> &str;

    /// Return the module's routes, to be nested under the API prefix.
    fn routes(&self) -> Router;
}
