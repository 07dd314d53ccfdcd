//! Console event listener
//!
//! Builds a client, feeds it a couple of synthetic batches through the
//! dispatch pump, and prints what comes out. Run with:
//!
//! ```sh
//! RUST_LOG=debug cargo run --example console_listener
//! ```

use bytes::Bytes;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use webcast_rs::client::LiveClientBuilder;
use webcast_rs::protocol::frame::{Batch, Frame};

/// WebcastChatMessage payload: user { nickname: "ann" }, comment "hello room"
const CHAT_PAYLOAD: &[u8] = &[
    0x0A, 0x05, // field 1 (user), 5 bytes
    0x12, 0x03, b'a', b'n', b'n', // user field 2 (nickname)
    0x12, 0x0A, // field 2 (comment), 10 bytes
    b'h', b'e', b'l', b'l', b'o', b' ', b'r', b'o', b'o', b'm',
];

/// WebcastGiftMessage payload: gift_id 5655, repeat_count 2
const GIFT_PAYLOAD: &[u8] = &[
    0x10, 0x97, 0x2C, // field 2 (gift_id), varint 5655
    0x18, 0x02, // field 3 (repeat_count)
];

#[tokio::main]
async fn main() -> webcast_rs::error::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let client = LiveClientBuilder::new("demo_streamer")
        .on_chat(|msg| {
            println!("[chat] {}: {}", msg.user.nickname, msg.comment);
            Ok(())
        })
        .on_gift(|msg| {
            println!("[gift] id {} x{}", msg.gift_id, msg.repeat_count);
            Ok(())
        })
        .on_unhandled(|frame| {
            println!("[unhandled] {}", frame);
            Ok(())
        })
        .on_error(|failure| {
            println!("[error] {}: {}", failure.frame.tag, failure.cause);
            Ok(())
        })
        .build()?;

    let (tx, rx) = mpsc::channel(8);
    tokio::spawn(async move {
        let first = Batch::new(
            vec![
                Frame::new("ChatMessage", Bytes::from_static(CHAT_PAYLOAD)),
                Frame::new("WebcastGiftMessage", Bytes::from_static(GIFT_PAYLOAD)),
            ],
            Bytes::new(),
        );
        let second = Batch::new(
            vec![Frame::new("SomethingNew", Bytes::from_static(b"\x01\x02"))],
            Bytes::new(),
        );

        let _ = tx.send(first).await;
        let _ = tx.send(second).await;
    });

    client.run(rx).await;
    Ok(())
}
