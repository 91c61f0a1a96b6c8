//! Controllers hold the endpoint logic, generic over the application state so
//! tests can run them against mocks without an HTTP server.
pub mod onboarding;
