pub mod answerer;
pub mod dispatcher;
pub mod math;
pub mod metrics;
pub mod providers;

pub use answerer::OneWordAnswerer;
pub use dispatcher::Dispatcher;
