pub mod geoip;
pub mod nws;
