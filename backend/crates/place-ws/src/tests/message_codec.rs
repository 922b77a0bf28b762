use crate::WsError;
use crate::message_codec::{decode_placement, encode_placement};

use place_core::{Color, PixelColor};

use axum::extract::ws::Message;

#[test]
fn given_upper_case_channels_when_decoding_then_placement_parsed() {
    let payload = br#"{"x":1,"y":2,"color":{"R":0,"G":0,"B":0,"A":255}}"#;

    let pixel = decode_placement(payload).expect("valid placement should decode");

    assert_eq!(pixel, PixelColor::new(1, 2, Color::BLACK));
}

#[test]
fn given_lower_case_channels_when_decoding_then_placement_parsed() {
    let payload = br#"{"x":3,"y":4,"color":{"r":10,"g":20,"b":30,"a":40}}"#;

    let pixel = decode_placement(payload).expect("valid placement should decode");

    assert_eq!(pixel, PixelColor::new(3, 4, Color::new(10, 20, 30, 40)));
}

#[test]
fn given_garbage_when_decoding_then_invalid_message() {
    let result = decode_placement(b"not json");

    assert!(matches!(result, Err(WsError::InvalidMessage { .. })));
}

#[test]
fn given_missing_color_when_decoding_then_invalid_message() {
    let result = decode_placement(br#"{"x":1,"y":2}"#);

    assert!(matches!(result, Err(WsError::InvalidMessage { .. })));
}

#[test]
fn given_channel_out_of_range_when_decoding_then_invalid_message() {
    let result = decode_placement(br#"{"x":1,"y":2,"color":{"R":256,"G":0,"B":0,"A":0}}"#);

    assert!(matches!(result, Err(WsError::InvalidMessage { .. })));
}

#[test]
fn given_accepted_pixel_when_encoding_then_text_frame_matches_wire_shape() {
    let pixel = PixelColor::new(1, 2, Color::BLACK);

    let message = encode_placement(&pixel).expect("encoding should succeed");

    let Message::Text(text) = message else {
        panic!("expected a text frame");
    };
    let value: serde_json::Value = serde_json::from_str(text.as_str()).expect("valid JSON");
    assert_eq!(
        value,
        serde_json::json!({"x": 1, "y": 2, "color": {"R": 0, "G": 0, "B": 0, "A": 255}})
    );
}
