mod client;
mod parser;
mod servers;

pub use client::WhoisClient;
pub use parser::{DateField, WhoisRecord};
pub use servers::{get_tld, get_whois_server};
