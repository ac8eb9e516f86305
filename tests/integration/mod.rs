//! Integration tests for the scicopilot session controller

mod config_loading;
mod session_flows;
mod test_utils;
