//! Configuration loading

mod settings;

pub use settings::{
    GatewaySettings, PairingSettings, Settings, ENV_API_KEY, ENV_GATEWAY_URL,
};
