//! Framed TCP lookup tests
//!
//! Exercise the wire path a front-end uses: length-delimited frames, the
//! scope-prefixed request envelope, raw DNS reply bytes.

use authdns_application::{QueryResolver, RecordCache};
use authdns_domain::{qtype, CacheKey, RecordRow, ResourceRecord};
use authdns_infrastructure::rpc::{frame, serve, DnsPacketHandler};
use bytes::Bytes;
use futures::{SinkExt, StreamExt};
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{DNSClass, Name, RData, RecordType};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};
use tokio_util::codec::{Framed, LengthDelimitedCodec};

fn record(id: i64, scope: &str, name: &str, qtype_code: u16, rdata: &str) -> (CacheKey, ResourceRecord) {
    let row = RecordRow::from_change(id, scope.into(), name.into(), rdata.into(), qtype_code, 60);
    (
        CacheKey::new(scope, name),
        ResourceRecord::from_row(&row).unwrap(),
    )
}

async fn start_server() -> SocketAddr {
    let cache = Arc::new(RecordCache::new());
    cache.rebuild(vec![
        record(1, "edge", "www.example.com", qtype::A, "10.0.0.1"),
        record(2, "core", "www.example.com", qtype::A, "10.1.0.1"),
        record(3, "edge", "www.example.com", qtype::TXT, "v=spf1 -all"),
    ]);
    let handler = Arc::new(DnsPacketHandler::new(QueryResolver::new(cache)));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = serve(listener, handler).await;
    });
    addr
}

fn query_bytes(id: u16, name: &str, record_type: RecordType) -> Vec<u8> {
    let mut query = Query::new();
    query.set_name(Name::from_str(name).unwrap());
    query.set_query_type(record_type);
    query.set_query_class(DNSClass::IN);

    let mut message = Message::new(id, MessageType::Query, OpCode::Query);
    message.add_query(query);

    let mut buf = Vec::with_capacity(512);
    let mut encoder = BinEncoder::new(&mut buf);
    message.emit(&mut encoder).unwrap();
    buf
}

async fn connect(addr: SocketAddr) -> Framed<TcpStream, LengthDelimitedCodec> {
    let stream = TcpStream::connect(addr).await.unwrap();
    Framed::new(stream, LengthDelimitedCodec::new())
}

#[tokio::test]
async fn scoped_lookup_returns_the_scopes_records() {
    let addr = start_server().await;
    let mut framed = connect(addr).await;

    framed
        .send(frame::encode_request(
            "edge",
            &query_bytes(41, "www.example.com.", RecordType::A),
        ))
        .await
        .unwrap();
    let reply = Message::from_vec(&framed.next().await.unwrap().unwrap()).unwrap();
    assert_eq!(reply.id(), 41);
    assert!(reply.authoritative());
    match reply.answers()[0].data() {
        RData::A(a) => assert_eq!(a.0, "10.0.0.1".parse::<std::net::Ipv4Addr>().unwrap()),
        other => panic!("expected an A answer, got {other:?}"),
    }

    framed
        .send(frame::encode_request(
            "core",
            &query_bytes(42, "www.example.com.", RecordType::A),
        ))
        .await
        .unwrap();
    let reply = Message::from_vec(&framed.next().await.unwrap().unwrap()).unwrap();
    match reply.answers()[0].data() {
        RData::A(a) => assert_eq!(a.0, "10.1.0.1".parse::<std::net::Ipv4Addr>().unwrap()),
        other => panic!("expected an A answer, got {other:?}"),
    }
}

#[tokio::test]
async fn unknown_name_is_a_well_formed_empty_answer() {
    let addr = start_server().await;
    let mut framed = connect(addr).await;

    framed
        .send(frame::encode_request(
            "edge",
            &query_bytes(7, "absent.example.com.", RecordType::A),
        ))
        .await
        .unwrap();
    let reply = Message::from_vec(&framed.next().await.unwrap().unwrap()).unwrap();
    assert_eq!(reply.id(), 7);
    assert!(reply.answers().is_empty());
}

#[tokio::test]
async fn missing_scope_collapses_to_an_empty_payload() {
    let addr = start_server().await;
    let mut framed = connect(addr).await;

    framed
        .send(frame::encode_request(
            "",
            &query_bytes(9, "www.example.com.", RecordType::A),
        ))
        .await
        .unwrap();
    let reply = framed.next().await.unwrap().unwrap();
    assert!(reply.is_empty());
}

#[tokio::test]
async fn consecutive_requests_share_one_connection() {
    let addr = start_server().await;
    let mut framed = connect(addr).await;

    // Garbage envelope first; the connection must keep answering after it.
    framed.send(Bytes::from_static(b"\x00")).await.unwrap();
    assert!(framed.next().await.unwrap().unwrap().is_empty());

    for id in [1u16, 2, 3] {
        framed
            .send(frame::encode_request(
                "edge",
                &query_bytes(id, "www.example.com.", RecordType::TXT),
            ))
            .await
            .unwrap();
        let reply = Message::from_vec(&framed.next().await.unwrap().unwrap()).unwrap();
        assert_eq!(reply.id(), id);
        assert_eq!(reply.answers().len(), 1);
    }
}
