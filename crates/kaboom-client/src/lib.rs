pub mod config;
pub mod dispatch;
pub mod runtime;

pub use config::{ClientConfig, ConfigError};
pub use dispatch::{ActionDispatcher, ChannelDispatcher, DispatchError};
pub use runtime::{
    spawn_autopilot, AutopilotConfig, AutopilotHandle, AutopilotMsg, AutopilotUnavailable,
    PolicyReadout, TimerReadout,
};
