pub mod config;
pub mod ctx;
pub mod emit;
pub mod ops;

use ctx::LogCtx;

// Factory helpers: one typed logging context per CLI op
pub fn init() -> LogCtx<ops::init::Init> { LogCtx { json: config::logs_are_json(), _marker: std::marker::PhantomData } }
pub fn product() -> LogCtx<ops::product::Product> { LogCtx { json: config::logs_are_json(), _marker: std::marker::PhantomData } }
pub fn check() -> LogCtx<ops::check::Check> { LogCtx { json: config::logs_are_json(), _marker: std::marker::PhantomData } }
pub fn lookup() -> LogCtx<ops::lookup::Lookup> { LogCtx { json: config::logs_are_json(), _marker: std::marker::PhantomData } }
