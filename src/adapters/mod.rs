// Adapters layer: concrete validators and the transport the service listens on.

pub mod mock;
pub mod usps;
pub mod zmq;

pub use mock::MockValidator;
pub use usps::UspsValidator;
pub use zmq::ZmqReplyChannel;
