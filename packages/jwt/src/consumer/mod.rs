//! Turning a received JWT into validated claims

mod builder;
mod context;
mod jwt_consumer;

pub use builder::JwtConsumerBuilder;
pub use context::JwtContext;
pub use jwt_consumer::JwtConsumer;
