//! Bot module - routing and gateway runtime.

pub mod dispatcher;
mod runtime;

pub use dispatcher::Router;
pub use runtime::run;
