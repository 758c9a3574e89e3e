use address_validator::core::ReplyChannel;
use address_validator::{Dispatcher, Listener, Result, ServiceConfig, ServiceError};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Event {
    Received,
    Replied(String),
}

/// Feeds a fixed list of messages, then signals that it has run dry.
struct ScriptedChannel {
    incoming: VecDeque<std::result::Result<Vec<u8>, ()>>,
    events: Arc<Mutex<Vec<Event>>>,
    drained: Option<oneshot::Sender<()>>,
}

impl ScriptedChannel {
    fn new(
        messages: Vec<std::result::Result<Vec<u8>, ()>>,
    ) -> (Self, Arc<Mutex<Vec<Event>>>, oneshot::Receiver<()>) {
        let events = Arc::new(Mutex::new(Vec::new()));
        let (tx, rx) = oneshot::channel();
        let channel = Self {
            incoming: messages.into(),
            events: events.clone(),
            drained: Some(tx),
        };
        (channel, events, rx)
    }
}

#[async_trait::async_trait]
impl ReplyChannel for ScriptedChannel {
    async fn receive(&mut self) -> Result<Vec<u8>> {
        match self.incoming.pop_front() {
            Some(Ok(message)) => {
                self.events.lock().unwrap().push(Event::Received);
                Ok(message)
            }
            Some(Err(())) => Err(ServiceError::TransportError(zeromq::ZmqError::Network(
                std::io::Error::new(std::io::ErrorKind::ConnectionReset, "peer went away"),
            ))),
            None => {
                if let Some(tx) = self.drained.take() {
                    let _ = tx.send(());
                }
                std::future::pending().await
            }
        }
    }

    async fn reply(&mut self, payload: String) -> Result<()> {
        self.events.lock().unwrap().push(Event::Replied(payload));
        Ok(())
    }
}

fn message(body: &str) -> std::result::Result<Vec<u8>, ()> {
    Ok(body.as_bytes().to_vec())
}

async fn serve(
    config: ServiceConfig,
    messages: Vec<std::result::Result<Vec<u8>, ()>>,
) -> (u64, Vec<Event>) {
    let (channel, events, drained) = ScriptedChannel::new(messages);
    let listener = Listener::new(channel, Dispatcher::from_config(config).unwrap());
    let replies = listener
        .run_until(async {
            let _ = drained.await;
        })
        .await
        .unwrap();
    let events = events.lock().unwrap().clone();
    (replies, events)
}

fn replies_only(events: &[Event]) -> Vec<String> {
    events
        .iter()
        .filter_map(|event| match event {
            Event::Replied(payload) => Some(payload.clone()),
            Event::Received => None,
        })
        .collect()
}

#[tokio::test]
async fn test_mock_mode_sequence() {
    let (replies, events) = serve(
        ServiceConfig::mock(),
        vec![
            message(r#"{"address": "123 SE Main St, Corvallis, OR 97333"}"#),
            message(r#"{"address": "999 Fake Street, Sunderland, OR 97330"}"#),
            message(r#"{"address": "   "}"#),
            message("{\"address\": "),
            message(r#"{"address": "450 SW 3rd St, Corvallis, OR 97333"}"#),
        ],
    )
    .await;

    assert_eq!(replies, 5);
    assert_eq!(
        replies_only(&events),
        vec![
            r#"{"status":"valid","corrected_address":"123 Se Main St, Corvallis, Or 97333"}"#,
            r#"{"status":"invalid","corrected_address":""}"#,
            r#"{"error":"Missing 'address' field"}"#,
            r#"{"error":"Invalid JSON"}"#,
            r#"{"status":"valid","corrected_address":"450 Sw 3rd St, Corvallis, Or 97333"}"#,
        ]
    );
}

#[tokio::test]
async fn test_strict_alternation() {
    let messages: Vec<_> = (0..10)
        .map(|i| {
            if i % 3 == 0 {
                message("garbage")
            } else {
                message(&format!(r#"{{"address": "{} Main St, Corvallis"}}"#, i))
            }
        })
        .collect();

    let (replies, events) = serve(ServiceConfig::mock(), messages).await;

    assert_eq!(replies, 10);
    assert_eq!(events.len(), 20);
    for pair in events.chunks(2) {
        assert_eq!(pair[0], Event::Received);
        assert!(matches!(pair[1], Event::Replied(_)));
    }
}

#[tokio::test]
async fn test_missing_field_variants() {
    let (_, events) = serve(
        ServiceConfig::mock(),
        vec![
            message("{}"),
            message(r#"{"address": null}"#),
            message(r#"{"address": ["1 Main St"]}"#),
            message(r#""1 Main St, Corvallis""#),
        ],
    )
    .await;

    assert_eq!(
        replies_only(&events),
        vec![
            r#"{"error":"Missing 'address' field"}"#,
            r#"{"error":"Missing 'address' field"}"#,
            r#"{"error":"Missing 'address' field"}"#,
            r#"{"error":"Invalid JSON"}"#,
        ]
    );
}

#[tokio::test]
async fn test_external_mode_without_key_answers_invalid() {
    let (replies, events) = serve(
        ServiceConfig::external(None),
        vec![
            message(r#"{"address": "123 SE Main St, Corvallis, OR 97333"}"#),
            message(r#"{"address": "999 Fake Street, Sunderland, OR 97330"}"#),
        ],
    )
    .await;

    assert_eq!(replies, 2);
    for reply in replies_only(&events) {
        assert_eq!(reply, r#"{"status":"invalid","corrected_address":""}"#);
    }
}

#[tokio::test]
async fn test_transport_fault_does_not_stop_loop() {
    let (replies, events) = serve(
        ServiceConfig::mock(),
        vec![
            Err(()),
            message(r#"{"address": "1 Main St, Corvallis"}"#),
        ],
    )
    .await;

    assert_eq!(replies, 1);
    assert_eq!(
        replies_only(&events),
        vec![r#"{"status":"valid","corrected_address":"1 Main St, Corvallis"}"#]
    );
}

#[tokio::test]
async fn test_dead_channel_stops_loop() {
    let (channel, _events, _drained) = ScriptedChannel::new((0..20).map(|_| Err(())).collect());
    let listener = Listener::new(
        channel,
        Dispatcher::from_config(ServiceConfig::mock()).unwrap(),
    );

    let result = listener.run().await;
    assert!(matches!(
        result,
        Err(ServiceError::ChannelExhausted { failures: 8 })
    ));
}
