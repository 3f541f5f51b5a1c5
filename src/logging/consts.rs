use std::net::{IpAddr, Ipv4Addr};

pub const DEFAULT_LOG_DIRECTIVES: &str = "warn,sanlin_map_server=info";
pub const DEFAULT_CLIENT_IP: IpAddr = IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1));
