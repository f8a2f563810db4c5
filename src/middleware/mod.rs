pub mod globals;
pub mod session;
pub mod timing;

pub use globals::GlobalsMiddleware;
pub use session::SessionMiddleware;
pub use timing::TimingMiddleware;
