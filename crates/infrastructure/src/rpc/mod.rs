pub mod frame;
pub mod handler;
pub mod server;
pub mod wire;

pub use handler::DnsPacketHandler;
pub use server::serve;
