use libmqtt::network::application::mqtt::{
    Client, ConnectReturnCode, ConnectionParameters, Context,
};
use libmqtt::network::error::Error;
use rand::Rng;

use crate::network::mock::MockConnection;

const ACCEPTED: [u8; 4] = [0x20, 0x02, 0x00, 0x00];

fn parameters(buffer: &mut [u8]) -> ConnectionParameters<'_> {
    ConnectionParameters {
        client_identifier: "ID du client",
        user_name: Some("nom d'utilisateur"),
        password: Some("super mot de passe de ouf"),
        clean_session: true,
        keep_alive: 60,
        buffer,
    }
}

#[test]
fn connect_publish_disconnect_writes_built_packets() {
    let connection = MockConnection::with_read_data(&ACCEPTED);
    let written = connection.written.clone();
    let closed = connection.closed.clone();
    let mut buffer = [0u8; 512];

    let mut client = Client::connect(connection, parameters(&mut buffer), true).unwrap();
    client.publish("test1", b"charge utile courte").unwrap();
    client.disconnect().unwrap();

    let mut expected_buffer = [0u8; 512];
    let mut expected = std::vec::Vec::new();
    let mut context = Context::connect(parameters(&mut expected_buffer));
    expected.extend_from_slice(context.message());
    context.publish("test1", b"charge utile courte");
    expected.extend_from_slice(context.message());
    context.disconnect();
    expected.extend_from_slice(context.message());

    assert_eq!(written.borrow().as_slice(), expected.as_slice());
    assert!(closed.get());
}

#[test]
fn failed_close_is_told_apart_from_failed_write() {
    let mut connection = MockConnection::with_read_data(&ACCEPTED);
    connection.fail_close = true;
    let written = connection.written.clone();
    let mut buffer = [0u8; 256];

    let client = Client::connect(connection, parameters(&mut buffer), true).unwrap();
    written.borrow_mut().clear();

    assert_eq!(client.disconnect(), Err(Error::NotOpen));
    assert_eq!(written.borrow().as_slice(), &[0xE0, 0x00]);
}

#[test]
fn connect_without_waiting_reads_nothing() {
    let connection = MockConnection::new();
    let written = connection.written.clone();
    let mut buffer = [0u8; 256];

    let client = Client::connect(connection, parameters(&mut buffer), false);

    assert!(client.is_ok());
    assert_eq!(written.borrow()[0], 0x10);
}

#[test]
fn rejected_connack_is_reported() {
    let connection = MockConnection::with_read_data(&[0x20, 0x02, 0x00, 0x04]);
    let mut buffer = [0u8; 256];

    let result = Client::connect(connection, parameters(&mut buffer), true);

    assert_eq!(
        result.err(),
        Some(Error::ConnectionRefused(ConnectReturnCode::BadUserNameOrPassword))
    );
}

#[test]
fn unexpected_answer_is_a_protocol_error() {
    let connection = MockConnection::with_read_data(&[0x90, 0x03, 0x00, 0x01, 0x00]);
    let mut buffer = [0u8; 256];

    let result = Client::connect(connection, parameters(&mut buffer), true);

    assert_eq!(result.err(), Some(Error::ProtocolError));
}

#[test]
fn short_connack_means_closed_connection() {
    let connection = MockConnection::with_read_data(&[0x20, 0x02]);
    let mut buffer = [0u8; 256];

    let result = Client::connect(connection, parameters(&mut buffer), true);

    assert_eq!(result.err(), Some(Error::ConnectionClosed));
}

#[test]
fn failed_write_is_reported() {
    let mut connection = MockConnection::with_read_data(&ACCEPTED);
    connection.fail_writes = true;
    let mut buffer = [0u8; 256];

    let result = Client::connect(connection, parameters(&mut buffer), true);

    assert_eq!(result.err(), Some(Error::WriteError));
}

#[test]
fn short_writes_are_continued() {
    let mut connection = MockConnection::with_read_data(&ACCEPTED);
    connection.max_write = 3;
    let written = connection.written.clone();
    let mut buffer = [0u8; 256];

    let mut client = Client::connect(connection, parameters(&mut buffer), true).unwrap();
    written.borrow_mut().clear();
    client.publish("topic", "données".as_bytes()).unwrap();

    let sent = written.borrow();
    assert_eq!(sent.len(), 2 + 2 + 5 + "données".len());
    assert_eq!(&sent[..4], &[0x30, 15, 0x00, 5]);
}

#[test]
fn subscribe_returns_packet_identifiers() {
    let connection = MockConnection::with_read_data(&ACCEPTED);
    let written = connection.written.clone();
    let mut buffer = [0u8; 256];

    let mut client = Client::connect(connection, parameters(&mut buffer), true).unwrap();
    written.borrow_mut().clear();

    assert_eq!(client.subscribe("sensors/+").unwrap(), 1);
    assert_eq!(client.subscribe("commands/#").unwrap(), 2);

    let sent = written.borrow();
    assert_eq!(&sent[..4], &[0x82, 14, 0x00, 0x01]);
    assert_eq!(&sent[16..20], &[0x82, 15, 0x00, 0x02]);
}

#[test]
fn retained_publish_and_parts() {
    let connection = MockConnection::with_read_data(&ACCEPTED);
    let written = connection.written.clone();
    let mut buffer = [0u8; 256];

    let mut client = Client::connect(connection, parameters(&mut buffer), true).unwrap();
    written.borrow_mut().clear();
    client.publish_retained("status", b"online").unwrap();
    assert_eq!(written.borrow()[0], 0x31);

    let (connection, buffer) = client.into_parts();
    assert!(!connection.closed.get());
    assert_eq!(buffer.len(), 256);
}

#[test]
fn random_payload_sizes_round_trip_through_client() {
    let mut rng = rand::thread_rng();

    for _ in 0..32 {
        let size = rng.gen_range(0..900);
        let payload: std::vec::Vec<u8> = (0..size).map(|_| rng.r#gen()).collect();

        let connection = MockConnection::with_read_data(&ACCEPTED);
        let written = connection.written.clone();
        let mut buffer = [0u8; 1024];

        let mut client = Client::connect(connection, parameters(&mut buffer), true).unwrap();
        written.borrow_mut().clear();
        client.publish("r", &payload).unwrap();

        let sent = written.borrow();
        let body_size = 2 + 1 + size;
        let header_size = if body_size < 128 { 2 } else { 3 };
        assert_eq!(sent.len(), header_size + body_size);
        assert_eq!(&sent[header_size + 3..], payload.as_slice());
    }
}
