//! Minimal SNTP client (RFC 4330)
//!
//! Sends one client-mode request and reads the server's transmit timestamp.
//! Only whole seconds are used; the clock slide has one-second resolution.

use super::FeedError;
use tokio::net::UdpSocket;

/// Seconds between the NTP epoch (1900) and the Unix epoch (1970).
const NTP_UNIX_OFFSET: i64 = 2_208_988_800;
const PACKET_LEN: usize = 48;
/// LI = 0, VN = 3, Mode = 3 (client)
const CLIENT_HEADER: u8 = 0x1B;

/// A client request packet.
pub fn request_packet() -> [u8; PACKET_LEN] {
    let mut packet = [0u8; PACKET_LEN];
    packet[0] = CLIENT_HEADER;
    packet
}

/// Unix seconds from a server reply.
pub fn parse_reply(reply: &[u8]) -> Result<i64, FeedError> {
    if reply.len() < PACKET_LEN {
        return Err(FeedError::Ntp("short reply"));
    }
    if reply[0] >> 6 == 3 {
        return Err(FeedError::Ntp("server clock unsynchronized"));
    }
    if reply[1] == 0 {
        return Err(FeedError::Ntp("kiss-of-death reply"));
    }
    let seconds: [u8; 4] = reply[40..44]
        .try_into()
        .map_err(|_| FeedError::Ntp("short reply"))?;
    let seconds = u32::from_be_bytes(seconds);
    if seconds == 0 {
        return Err(FeedError::Ntp("empty transmit timestamp"));
    }
    Ok(i64::from(seconds) - NTP_UNIX_OFFSET)
}

/// Ask `server` (host:port) for the current time.
pub async fn query(server: &str) -> Result<i64, FeedError> {
    log::debug!("NTP sync via {}", server);
    let socket = UdpSocket::bind("0.0.0.0:0").await?;
    socket.connect(server).await?;
    socket.send(&request_packet()).await?;

    let mut reply = [0u8; PACKET_LEN];
    let n = socket.recv(&mut reply).await?;
    let unix = parse_reply(&reply[..n])?;
    log::info!("ntp unixtime: {}", unix);
    Ok(unix)
}
