//! End-to-end dispatch behavior through the public API

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use bytes::{BufMut, Bytes, BytesMut};
use webcast_rs::client::{LiveClient, LiveClientBuilder};
use webcast_rs::error::Error;
use webcast_rs::event::{Event, EventKind, Selector};
use webcast_rs::protocol::frame::{Batch, Frame};
use webcast_rs::protocol::messages::ChatMessage;

/// Recorded kinds of every event published, in order
type Record = Arc<Mutex<Vec<EventKind>>>;

fn recording_builder(record: &Record) -> LiveClientBuilder {
    let record = Arc::clone(record);
    LiveClientBuilder::new("some_streamer")
        .configure(|s| s.default_mappings = false)
        .on_event(move |event| {
            record.lock().unwrap().push(event.kind());
            Ok(())
        })
}

fn chat_event(comment: &str) -> Event {
    Event::Chat(ChatMessage {
        comment: comment.into(),
        ..Default::default()
    })
}

fn batch_of(tags: &[&str]) -> Batch {
    Batch::new(
        tags.iter().map(|t| Frame::new(*t, Bytes::new())).collect(),
        Bytes::from_static(b"raw-batch"),
    )
}

#[test]
fn registered_tag_publishes_exactly_the_decoded_event() {
    let events = Arc::new(Mutex::new(Vec::new()));
    let events_clone = Arc::clone(&events);
    let client = LiveClientBuilder::new("some_streamer")
        .configure(|s| s.default_mappings = false)
        .register_mapping("WebcastChatMessage", |payload| {
            let comment = String::from_utf8_lossy(payload).into_owned();
            Ok(Event::Chat(ChatMessage {
                comment,
                ..Default::default()
            }))
        })
        .on_event(move |event| {
            events_clone.lock().unwrap().push(event.clone());
            Ok(())
        })
        .build()
        .unwrap();

    let batch = Batch::new(
        vec![Frame::new("WebcastChatMessage", Bytes::from_static(b"hi"))],
        Bytes::new(),
    );
    client.dispatch(&batch);

    let events = events.lock().unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].kind(), EventKind::BatchObserved);
    assert_eq!(events[1], chat_event("hi"));
}

#[test]
fn bare_tag_resolves_namespaced_handler() {
    let record = Arc::new(Mutex::new(Vec::new()));
    let client = recording_builder(&record)
        .register_mapping("WebcastFoo", |_payload| Ok(chat_event("foo")))
        .build()
        .unwrap();

    client.dispatch(&batch_of(&["Foo"]));

    assert_eq!(
        *record.lock().unwrap(),
        vec![EventKind::BatchObserved, EventKind::Chat]
    );
}

#[test]
fn namespaced_tag_is_not_double_prefixed() {
    let record = Arc::new(Mutex::new(Vec::new()));
    let client = recording_builder(&record)
        .register_mapping("WebcastFoo", |_payload| Ok(chat_event("foo")))
        .build()
        .unwrap();

    client.dispatch(&batch_of(&["WebcastFoo"]));

    assert_eq!(
        *record.lock().unwrap(),
        vec![EventKind::BatchObserved, EventKind::Chat]
    );
}

#[test]
fn unknown_tag_publishes_unhandled_without_decoding() {
    let record = Arc::new(Mutex::new(Vec::new()));
    let decode_attempts = Arc::new(AtomicUsize::new(0));
    let attempts_clone = Arc::clone(&decode_attempts);
    let client = recording_builder(&record)
        .register_mapping("WebcastFoo", move |_payload| {
            attempts_clone.fetch_add(1, Ordering::SeqCst);
            Ok(chat_event("foo"))
        })
        .build()
        .unwrap();

    client.dispatch(&batch_of(&["Mystery"]));

    assert_eq!(
        *record.lock().unwrap(),
        vec![EventKind::BatchObserved, EventKind::UnhandledFrame]
    );
    assert_eq!(decode_attempts.load(Ordering::SeqCst), 0);
}

#[test]
fn failing_frame_does_not_abort_the_batch() {
    let record = Arc::new(Mutex::new(Vec::new()));
    let client = recording_builder(&record)
        .register_mapping("WebcastA", |_payload| Ok(chat_event("a")))
        .register_mapping("WebcastB", |_payload| {
            Err(Error::Mapping {
                tag: "WebcastB".into(),
                reason: "bad payload".into(),
            })
        })
        .register_mapping("WebcastC", |_payload| Ok(chat_event("c")))
        .build()
        .unwrap();

    client.dispatch(&batch_of(&["A", "B", "C"]));

    assert_eq!(
        *record.lock().unwrap(),
        vec![
            EventKind::BatchObserved,
            EventKind::Chat,
            EventKind::DecodeFailure,
            EventKind::Chat,
        ]
    );
}

#[test]
fn failing_subscriber_isolates_like_failing_decoder() {
    // B decodes fine but its subscriber fails; A and C still dispatch and
    // B surfaces as a DecodeFailure.
    let record = Arc::new(Mutex::new(Vec::new()));
    let record_clone = Arc::clone(&record);
    let client = LiveClientBuilder::new("some_streamer")
        .configure(|s| s.default_mappings = false)
        .register_mapping("WebcastA", |_payload| Ok(chat_event("a")))
        .register_mapping("WebcastB", |_payload| {
            Ok(Event::Gift(Default::default()))
        })
        .register_mapping("WebcastC", |_payload| Ok(chat_event("c")))
        .on_gift(|_msg| Err(Error::Subscriber("gift handler down".into())))
        .on_event(move |event| {
            record_clone.lock().unwrap().push(event.kind());
            Ok(())
        })
        .build()
        .unwrap();

    client.dispatch(&batch_of(&["A", "B", "C"]));

    assert_eq!(
        *record.lock().unwrap(),
        vec![
            EventKind::BatchObserved,
            EventKind::Chat,
            EventKind::DecodeFailure,
            EventKind::Chat,
        ]
    );
}

#[test]
fn decode_failure_carries_frame_batch_and_cause() {
    let captured = Arc::new(Mutex::new(None));
    let captured_clone = Arc::clone(&captured);
    let client = LiveClientBuilder::new("some_streamer")
        .configure(|s| s.default_mappings = false)
        .register_mapping("WebcastB", |_payload| {
            Err(Error::Mapping {
                tag: "WebcastB".into(),
                reason: "bad payload".into(),
            })
        })
        .on_error(move |failure| {
            *captured_clone.lock().unwrap() = Some(failure.clone());
            Ok(())
        })
        .build()
        .unwrap();

    client.dispatch(&batch_of(&["B"]));

    let failure = captured.lock().unwrap().clone().unwrap();
    assert_eq!(failure.frame.tag, "B");
    assert_eq!(
        failure.batch.unwrap().raw,
        Bytes::from_static(b"raw-batch")
    );
    assert!(matches!(failure.cause, Error::Mapping { .. }));
}

#[test]
fn events_follow_batch_order() {
    let comments = Arc::new(Mutex::new(Vec::new()));
    let comments_clone = Arc::clone(&comments);
    let client = LiveClientBuilder::new("some_streamer")
        .configure(|s| s.default_mappings = false)
        .register_mapping("WebcastEcho", |payload| {
            Ok(Event::Chat(ChatMessage {
                comment: String::from_utf8_lossy(payload).into_owned(),
                ..Default::default()
            }))
        })
        .on_chat(move |msg| {
            comments_clone.lock().unwrap().push(msg.comment.clone());
            Ok(())
        })
        .build()
        .unwrap();

    let batch = Batch::new(
        vec![
            Frame::new("Echo", Bytes::from_static(b"first")),
            Frame::new("Echo", Bytes::from_static(b"second")),
            Frame::new("Echo", Bytes::from_static(b"third")),
        ],
        Bytes::new(),
    );
    client.dispatch(&batch);

    assert_eq!(*comments.lock().unwrap(), vec!["first", "second", "third"]);
}

#[test]
fn universal_subscriber_sees_everything_in_publish_order() {
    let log = Arc::new(Mutex::new(Vec::new()));

    let l = Arc::clone(&log);
    let builder = LiveClientBuilder::new("some_streamer")
        .configure(|s| s.default_mappings = false)
        .register_mapping("WebcastA", |_payload| Ok(chat_event("a")))
        .register_mapping("WebcastB", |_payload| {
            Err(Error::Mapping {
                tag: "WebcastB".into(),
                reason: "nope".into(),
            })
        })
        .on_chat(move |_msg| {
            l.lock().unwrap().push("chat-specific");
            Ok(())
        });

    let l = Arc::clone(&log);
    let client = builder
        .on_event(move |event| {
            l.lock().unwrap().push(match event.kind() {
                EventKind::BatchObserved => "any-batch",
                EventKind::Chat => "any-chat",
                EventKind::UnhandledFrame => "any-unhandled",
                EventKind::DecodeFailure => "any-failure",
                _ => "any-other",
            });
            Ok(())
        })
        .build()
        .unwrap();

    client.dispatch(&batch_of(&["A", "Mystery", "B"]));

    // Per event: concrete subscribers first, then universal; events in
    // batch order behind the batch announcement.
    assert_eq!(
        *log.lock().unwrap(),
        vec![
            "any-batch",
            "chat-specific",
            "any-chat",
            "any-unhandled",
            "any-failure",
        ]
    );
}

#[test]
fn stock_mappings_decode_real_payloads() {
    // WebcastChatMessage: user { id: 7, nickname: "ann" }, comment "hello"
    let mut user = BytesMut::new();
    user.put_slice(&[0x08, 0x07]); // field 1 varint 7
    user.put_slice(&[0x12, 0x03]); // field 2, len 3
    user.put_slice(b"ann");

    let mut chat = BytesMut::new();
    chat.put_u8(0x0A); // field 1, len-delimited
    chat.put_u8(user.len() as u8);
    chat.put_slice(&user);
    chat.put_slice(&[0x12, 0x05]); // field 2, len 5
    chat.put_slice(b"hello");

    let captured = Arc::new(Mutex::new(None));
    let captured_clone = Arc::clone(&captured);
    let client = LiveClientBuilder::new("some_streamer")
        .on_chat(move |msg| {
            *captured_clone.lock().unwrap() = Some(msg.clone());
            Ok(())
        })
        .build()
        .unwrap();

    let batch = Batch::new(
        vec![Frame::new("ChatMessage", chat.freeze())],
        Bytes::new(),
    );
    client.dispatch(&batch);

    let msg = captured.lock().unwrap().clone().unwrap();
    assert_eq!(msg.user.id, 7);
    assert_eq!(msg.user.nickname, "ann");
    assert_eq!(msg.comment, "hello");
}

#[test]
fn raw_selector_subscription() {
    let count = Arc::new(AtomicUsize::new(0));
    let count_clone = Arc::clone(&count);
    let client = LiveClientBuilder::new("some_streamer")
        .configure(|s| s.default_mappings = false)
        .subscribe(Selector::Kind(EventKind::UnhandledFrame), move |_event| {
            count_clone.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
        .build()
        .unwrap();

    client.dispatch(&batch_of(&["Nope", "AlsoNope"]));
    assert_eq!(count.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn pump_processes_batches_in_queue_order() {
    use tokio::sync::mpsc;

    let comments = Arc::new(Mutex::new(Vec::new()));
    let comments_clone = Arc::clone(&comments);
    let client: LiveClient = LiveClientBuilder::new("some_streamer")
        .configure(|s| s.default_mappings = false)
        .register_mapping("WebcastEcho", |payload| {
            Ok(Event::Chat(ChatMessage {
                comment: String::from_utf8_lossy(payload).into_owned(),
                ..Default::default()
            }))
        })
        .on_chat(move |msg| {
            comments_clone.lock().unwrap().push(msg.comment.clone());
            Ok(())
        })
        .build()
        .unwrap();

    let (tx, rx) = mpsc::channel(4);
    for label in ["one", "two", "three"] {
        tx.send(Batch::new(
            vec![Frame::new("Echo", Bytes::copy_from_slice(label.as_bytes()))],
            Bytes::new(),
        ))
        .await
        .unwrap();
    }
    drop(tx);

    client.run(rx).await;
    assert_eq!(*comments.lock().unwrap(), vec!["one", "two", "three"]);
}

#[test]
fn dispatch_single_emits_frame_observed_instead_of_batch() {
    let record = Arc::new(Mutex::new(Vec::new()));
    let client = recording_builder(&record)
        .register_mapping("WebcastFoo", |_payload| Ok(chat_event("foo")))
        .build()
        .unwrap();

    client.dispatch_single("Foo", Bytes::new());

    assert_eq!(
        *record.lock().unwrap(),
        vec![EventKind::FrameObserved, EventKind::Chat]
    );
}

#[test]
fn empty_batch_only_announces_itself() {
    let record = Arc::new(Mutex::new(Vec::new()));
    let client = recording_builder(&record).build().unwrap();

    client.dispatch(&Batch::default());

    assert_eq!(*record.lock().unwrap(), vec![EventKind::BatchObserved]);
}
