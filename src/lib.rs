// Module layout (Clean Architecture style)
// - bootstrap: configuration and the shared application context
// - infrastructure: postgres sessions, password hashing, JWT
// - presentation: HTTP handlers, routing and the per-request session scope
// - application: ports and use cases
// - domain: core models

pub mod application;
pub mod bootstrap;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
