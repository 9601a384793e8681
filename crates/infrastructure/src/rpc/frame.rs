use authdns_domain::DomainError;
use bytes::{Buf, BufMut, Bytes, BytesMut};

/// Request envelope carried inside each length-delimited frame:
/// a big-endian u16 scope length, the scope bytes, then the DNS query
/// in wire format. The reply frame is raw DNS wire bytes with no prefix.
pub fn decode_request(mut payload: Bytes) -> Result<(String, Bytes), DomainError> {
    if payload.remaining() < 2 {
        return Err(DomainError::CodecError(
            "request frame shorter than the scope prefix".into(),
        ));
    }
    let scope_len = payload.get_u16() as usize;
    if payload.remaining() < scope_len {
        return Err(DomainError::CodecError(format!(
            "scope prefix claims {scope_len} bytes, frame has {}",
            payload.remaining()
        )));
    }
    let scope_bytes = payload.split_to(scope_len);
    let scope = std::str::from_utf8(&scope_bytes)
        .map_err(|e| DomainError::CodecError(format!("scope is not UTF-8: {e}")))?
        .to_string();
    Ok((scope, payload))
}

pub fn encode_request(scope: &str, message: &[u8]) -> Bytes {
    let mut buf = BytesMut::with_capacity(2 + scope.len() + message.len());
    buf.put_u16(scope.len() as u16);
    buf.put_slice(scope.as_bytes());
    buf.put_slice(message);
    buf.freeze()
}
