//! Device location
//!
//! Supplies the "here" position that hosts feed into the location path of
//! the search source.

pub mod ip_location;

pub use ip_location::{DeviceLocation, IpLocator};

/// Get the IP location service
pub fn get_ip_locator() -> IpLocator {
    IpLocator::new()
}
