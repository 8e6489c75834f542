pub mod consume;
pub mod decode;
pub mod dispatch;

pub use consume::Consumer;
pub use decode::decode;
pub use dispatch::Dispatcher;
