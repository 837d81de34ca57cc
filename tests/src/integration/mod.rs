//! Cross-crate integration flows.

pub mod http_gateways;
pub mod mail_flows;
