// Library surface for headless/integration tests and reuse.
// The binary only adds CLI parsing and the event loop on top.
pub mod app;
pub mod clock;
pub mod config;
pub mod error;
pub mod logging;
pub mod runtime;
pub mod session;
pub mod terminal;
pub mod text_input;
pub mod ui;
