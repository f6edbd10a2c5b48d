//! Minecraft auth gateway.
//!
//! A minimal Minecraft-protocol listener players join to receive a one-time
//! auth code for linking their account on the portal. It speaks just enough
//! of the protocol to answer a server-list ping and to read a login attempt,
//! registers a generated code with the portal's integration API, then
//! disconnects the player with the code in the kick message. No player ever
//! actually joins.

use rand::Rng;
use serde_json::json;
use std::io;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

const STATUS_MOTD: &str = "Hearthgate Auth Server";

/// Handshake `next_state` for a server-list ping.
const NEXT_STATE_STATUS: i32 = 1;
/// Handshake `next_state` for a login attempt.
const NEXT_STATE_LOGIN: i32 = 2;

/// Upper bound on a single packet; anything larger is not a handshake or
/// login start from a real client.
const MAX_PACKET_LEN: i32 = 4096;

#[tokio::main]
async fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    dotenvy::dotenv().ok();
    let portal = PortalClient::from_env().unwrap_or_else(|msg| {
        eprintln!("{}", msg);
        std::process::exit(1);
    });

    let bind_addr =
        std::env::var("GATEWAY_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:25565".to_string());
    let listener = TcpListener::bind(&bind_addr).await?;
    tracing::info!("Auth gateway listening on {}", bind_addr);

    loop {
        let (stream, peer) = listener.accept().await?;
        let portal = portal.clone();

        tokio::spawn(async move {
            if let Err(e) = handle_connection(stream, peer.ip().to_string(), portal).await {
                tracing::debug!("Connection from {} ended with error: {}", peer, e);
            }
        });
    }
}

async fn handle_connection(
    mut stream: TcpStream,
    ip_address: String,
    portal: PortalClient,
) -> io::Result<()> {
    let (_, handshake_payload) = read_packet(&mut stream).await?;
    let handshake = Handshake::parse(&handshake_payload)?;

    match handshake.next_state {
        NEXT_STATE_STATUS => handle_status(&mut stream).await,
        NEXT_STATE_LOGIN => handle_login(&mut stream, ip_address, portal).await,
        other => Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("unexpected next_state {}", other),
        )),
    }
}

/// Answers the server-list ping so the gateway shows up with a friendly
/// MOTD in the multiplayer menu.
async fn handle_status(stream: &mut TcpStream) -> io::Result<()> {
    // Status request (empty payload).
    let _ = read_packet(stream).await?;

    let status = json!({
        "version": { "name": "any", "protocol": 0 },
        "players": { "max": 1, "online": 0 },
        "description": { "text": STATUS_MOTD }
    });
    let mut payload = Vec::new();
    write_string(&mut payload, &status.to_string());
    write_packet(stream, 0x00, &payload).await?;

    // Ping: echo the client's payload back as the pong.
    if let Ok((0x01, ping_payload)) = read_packet(stream).await {
        write_packet(stream, 0x01, &ping_payload).await?;
    }

    Ok(())
}

/// Reads the login start, fetches a code from the portal, and kicks the
/// player with it.
async fn handle_login(
    stream: &mut TcpStream,
    ip_address: String,
    portal: PortalClient,
) -> io::Result<()> {
    let (_, login_payload) = read_packet(stream).await?;
    let login = LoginStart::parse(&login_payload)?;

    tracing::info!(
        "{} ({}) ({}) has joined the auth server",
        login.username,
        login.uuid,
        ip_address
    );

    let reason = match portal.obtain_auth_code(&login).await {
        Ok(code) => {
            tracing::info!("Issued auth code {} to {}", code, login.username);
            format!(
                "\u{a7}bSuccessfully Authenticated!\nPlease enter the auth code: \u{a7}a\u{a7}l{} \u{a7}r\u{a7}bon the website.",
                code
            )
        }
        Err(e) => {
            tracing::warn!("Failed to obtain auth code for {}: {}", login.username, e);
            "\u{a7}bFailed to Authenticate!\nPlease try again later.".to_string()
        }
    };

    let mut payload = Vec::new();
    write_string(&mut payload, &json!({ "text": reason }).to_string());
    // Login disconnect.
    write_packet(stream, 0x00, &payload).await
}

/// Client for the portal's auth-code intake endpoint.
#[derive(Clone)]
struct PortalClient {
    client: reqwest::Client,
    intake_url: String,
    auth_key: String,
}

impl PortalClient {
    fn from_env() -> Result<Self, String> {
        let base_url =
            std::env::var("WEB_SERVER_URL").unwrap_or_else(|_| "http://localhost:8080".to_string());
        let auth_key = std::env::var("AUTH_KEY")
            .map_err(|_| "AUTH_KEY environment variable not set".to_string())?;

        Ok(Self {
            client: reqwest::Client::new(),
            intake_url: format!("{}/api/integration/minecraft/auth", base_url),
            auth_key,
        })
    }

    /// Registers a generated code with the portal and returns the code to
    /// show the player.
    ///
    /// Two portal responses re-route the flow: "UUID already exists" means
    /// the player already has an unspent code, which the portal hands back
    /// for re-display; "Auth code already used" means our random code
    /// collided, so generate another and retry.
    async fn obtain_auth_code(&self, login: &LoginStart) -> Result<String, String> {
        for _ in 0..3 {
            let code = generate_auth_code();
            let response = self
                .client
                .post(&self.intake_url)
                .header("Authorization", &self.auth_key)
                .json(&json!({
                    "uuid": login.uuid.to_string(),
                    "display_name": login.username,
                    "auth_code": code,
                }))
                .send()
                .await
                .map_err(|e| e.to_string())?;

            let status = response.status();
            let body: serde_json::Value = response.json().await.map_err(|e| e.to_string())?;

            if status.is_success() {
                return Ok(code);
            }
            if status == reqwest::StatusCode::UNAUTHORIZED {
                return Err("invalid AUTH_KEY".to_string());
            }

            match body["msg"].as_str() {
                Some("UUID already exists") => {
                    if let Some(existing) = body["auth_code"].as_str() {
                        return Ok(existing.to_string());
                    }
                    return Err("portal reported an existing code but sent none".to_string());
                }
                Some("Auth code already used") => continue,
                other => return Err(format!("portal refused code: {:?}", other)),
            }
        }

        Err("could not find a free auth code".to_string())
    }
}

/// Random zero-padded six digit code.
fn generate_auth_code() -> String {
    let mut rng = rand::rng();
    format!("{:06}", rng.random_range(0..1_000_000))
}

/// Parsed handshake packet.
#[derive(Debug, PartialEq)]
struct Handshake {
    protocol_version: i32,
    next_state: i32,
}

impl Handshake {
    fn parse(payload: &[u8]) -> io::Result<Self> {
        let mut reader = PacketReader::new(payload);
        let protocol_version = reader.read_varint()?;
        let _server_address = reader.read_string()?;
        let _server_port = reader.read_u16()?;
        let next_state = reader.read_varint()?;

        Ok(Self {
            protocol_version,
            next_state,
        })
    }
}

/// Parsed login start packet: username plus the claimed player UUID.
///
/// Modern clients append the UUID after the name; for older ones the
/// offline-mode UUID is derived from the name the way vanilla does it.
#[derive(Debug, PartialEq)]
struct LoginStart {
    username: String,
    uuid: uuid::Uuid,
}

impl LoginStart {
    fn parse(payload: &[u8]) -> io::Result<Self> {
        let mut reader = PacketReader::new(payload);
        let username = reader.read_string()?;

        let uuid = match reader.read_uuid() {
            Ok(uuid) => uuid,
            Err(_) => offline_uuid(&username),
        };

        Ok(Self { username, uuid })
    }
}

/// Vanilla offline-mode UUID: md5-flavored v3 over `OfflinePlayer:<name>`.
///
/// Uses the UUID crate's name-based construction over the raw bytes.
fn offline_uuid(username: &str) -> uuid::Uuid {
    let seed = format!("OfflinePlayer:{}", username);
    uuid::Uuid::new_v3(&uuid::Uuid::NAMESPACE_OID, seed.as_bytes())
}

/// Sequential reader over a packet payload.
struct PacketReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> PacketReader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn read_byte(&mut self) -> io::Result<u8> {
        let byte = *self
            .buf
            .get(self.pos)
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "packet truncated"))?;
        self.pos += 1;
        Ok(byte)
    }

    /// Reads a protocol VarInt (LEB128, at most 5 bytes).
    fn read_varint(&mut self) -> io::Result<i32> {
        let mut value: u32 = 0;
        for shift in 0..5 {
            let byte = self.read_byte()?;
            value |= ((byte & 0x7f) as u32) << (shift * 7);
            if byte & 0x80 == 0 {
                return Ok(value as i32);
            }
        }

        Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "VarInt too long",
        ))
    }

    fn read_string(&mut self) -> io::Result<String> {
        let len = self.read_varint()?;
        if len < 0 || len > MAX_PACKET_LEN {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "string length out of range",
            ));
        }

        let len = len as usize;
        let end = self.pos + len;
        let bytes = self
            .buf
            .get(self.pos..end)
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "packet truncated"))?;
        self.pos = end;

        String::from_utf8(bytes.to_vec())
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "string not UTF-8"))
    }

    fn read_u16(&mut self) -> io::Result<u16> {
        let high = self.read_byte()?;
        let low = self.read_byte()?;
        Ok(u16::from_be_bytes([high, low]))
    }

    fn read_uuid(&mut self) -> io::Result<uuid::Uuid> {
        let end = self.pos + 16;
        let bytes = self
            .buf
            .get(self.pos..end)
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "packet truncated"))?;
        self.pos = end;

        let mut raw = [0u8; 16];
        raw.copy_from_slice(bytes);
        Ok(uuid::Uuid::from_bytes(raw))
    }
}

/// Appends a protocol VarInt.
fn write_varint(buf: &mut Vec<u8>, value: i32) {
    let mut raw = value as u32;
    loop {
        let mut byte = (raw & 0x7f) as u8;
        raw >>= 7;
        if raw != 0 {
            byte |= 0x80;
        }
        buf.push(byte);
        if raw == 0 {
            break;
        }
    }
}

/// Appends a length-prefixed string.
fn write_string(buf: &mut Vec<u8>, value: &str) {
    write_varint(buf, value.len() as i32);
    buf.extend_from_slice(value.as_bytes());
}

/// Reads one framed packet: `(packet_id, payload)`.
async fn read_packet(stream: &mut TcpStream) -> io::Result<(i32, Vec<u8>)> {
    let length = read_varint_async(stream).await?;
    if length <= 0 || length > MAX_PACKET_LEN {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "packet length out of range",
        ));
    }

    let mut frame = vec![0u8; length as usize];
    stream.read_exact(&mut frame).await?;

    let mut reader = PacketReader::new(&frame);
    let packet_id = reader.read_varint()?;
    let payload = frame[reader.pos..].to_vec();

    Ok((packet_id, payload))
}

/// Writes one framed packet.
async fn write_packet(stream: &mut TcpStream, packet_id: i32, payload: &[u8]) -> io::Result<()> {
    let mut body = Vec::with_capacity(payload.len() + 1);
    write_varint(&mut body, packet_id);
    body.extend_from_slice(payload);

    let mut frame = Vec::with_capacity(body.len() + 5);
    write_varint(&mut frame, body.len() as i32);
    frame.extend_from_slice(&body);

    stream.write_all(&frame).await?;
    stream.flush().await
}

async fn read_varint_async(stream: &mut TcpStream) -> io::Result<i32> {
    let mut value: u32 = 0;
    for shift in 0..5 {
        let byte = stream.read_u8().await?;
        value |= ((byte & 0x7f) as u32) << (shift * 7);
        if byte & 0x80 == 0 {
            return Ok(value as i32);
        }
    }

    Err(io::Error::new(
        io::ErrorKind::InvalidData,
        "VarInt too long",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip_varint(value: i32) -> i32 {
        let mut buf = Vec::new();
        write_varint(&mut buf, value);
        PacketReader::new(&buf).read_varint().unwrap()
    }

    #[test]
    fn varint_roundtrips() {
        for value in [0, 1, 127, 128, 255, 300, 25565, 2097151, i32::MAX, -1] {
            assert_eq!(roundtrip_varint(value), value);
        }
    }

    #[test]
    fn varint_known_encodings() {
        let mut buf = Vec::new();
        write_varint(&mut buf, 300);
        assert_eq!(buf, vec![0xac, 0x02]);

        let mut buf = Vec::new();
        write_varint(&mut buf, 127);
        assert_eq!(buf, vec![0x7f]);
    }

    #[test]
    fn varint_rejects_overlong_encoding() {
        let buf = [0x80, 0x80, 0x80, 0x80, 0x80, 0x01];
        assert!(PacketReader::new(&buf).read_varint().is_err());
    }

    #[test]
    fn string_roundtrips() {
        let mut buf = Vec::new();
        write_string(&mut buf, "Steve");
        assert_eq!(PacketReader::new(&buf).read_string().unwrap(), "Steve");
    }

    #[test]
    fn parses_handshake() {
        let mut payload = Vec::new();
        write_varint(&mut payload, 767); // protocol version
        write_string(&mut payload, "auth.hearthgate.net");
        payload.extend_from_slice(&25565u16.to_be_bytes());
        write_varint(&mut payload, NEXT_STATE_LOGIN);

        let handshake = Handshake::parse(&payload).unwrap();

        assert_eq!(handshake.protocol_version, 767);
        assert_eq!(handshake.next_state, NEXT_STATE_LOGIN);
    }

    #[test]
    fn parses_login_start_with_uuid() {
        let player_uuid = uuid::Uuid::new_v4();
        let mut payload = Vec::new();
        write_string(&mut payload, "Steve");
        payload.extend_from_slice(player_uuid.as_bytes());

        let login = LoginStart::parse(&payload).unwrap();

        assert_eq!(login.username, "Steve");
        assert_eq!(login.uuid, player_uuid);
    }

    #[test]
    fn login_start_without_uuid_falls_back_to_offline_uuid() {
        let mut payload = Vec::new();
        write_string(&mut payload, "Steve");

        let login = LoginStart::parse(&payload).unwrap();

        assert_eq!(login.username, "Steve");
        assert_eq!(login.uuid, offline_uuid("Steve"));
    }

    #[test]
    fn truncated_login_start_fails() {
        let mut payload = Vec::new();
        write_string(&mut payload, "Steve");
        // Claim a longer string than the buffer holds.
        payload[0] = 60;

        assert!(LoginStart::parse(&payload).is_err());
    }

    #[test]
    fn auth_codes_are_six_digits() {
        for _ in 0..100 {
            let code = generate_auth_code();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }
}
