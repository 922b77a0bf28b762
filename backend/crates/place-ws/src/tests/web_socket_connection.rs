use crate::{SlotTable, WsError, create_connection_span};
use crate::message_codec::PROBE_REPLY;
use crate::web_socket_connection::queue_control_reply;

use axum::extract::ws::Message;
use tokio::sync::mpsc;

fn reply() -> Message {
    Message::Text(PROBE_REPLY.into())
}

#[test]
fn given_room_in_queue_when_queueing_reply_then_queued() {
    let (tx, mut rx) = mpsc::channel(1);

    queue_control_reply(&tx, reply()).expect("reply should be queued");

    assert_eq!(rx.try_recv().ok(), Some(reply()));
}

#[test]
fn given_full_queue_when_queueing_reply_then_connection_closed_without_waiting() {
    let (tx, _rx) = mpsc::channel(1);
    queue_control_reply(&tx, reply()).expect("first reply fits");

    let result = queue_control_reply(&tx, reply());

    assert!(matches!(
        result,
        Err(WsError::ConnectionClosed { ref reason, .. }) if reason == "reply queue full"
    ));
}

#[test]
fn given_egress_gone_when_queueing_reply_then_connection_closed() {
    let (tx, rx) = mpsc::channel(1);
    drop(rx);

    let result = queue_control_reply(&tx, reply());

    assert!(matches!(
        result,
        Err(WsError::ConnectionClosed { ref reason, .. }) if reason == "outbound side closed"
    ));
}

#[test]
fn given_ticket_when_creating_connection_span_then_span_names_slot_and_connection() {
    let table = SlotTable::new(1);
    let (tx, _rx) = mpsc::channel(1);
    let ticket = table.admit(tx).expect("admit should succeed");

    let span = create_connection_span(ticket);

    assert_eq!(span.metadata().map(|meta| meta.name()), Some("ws_connection"));
    assert!(span.field("slot").is_some());
    assert!(span.field("connection_id").is_some());
}
