use crate::rpc::wire;
use authdns_application::QueryResolver;
use authdns_domain::DomainError;
use hickory_proto::op::{Message, MessageType, OpCode};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use tracing::{debug, warn};

/// Answers one DNS query against the cache.
///
/// Failures never fail the transport: a missing scope, an undecodable
/// query or a serialization error all collapse to an empty reply payload.
pub struct DnsPacketHandler {
    resolver: QueryResolver,
}

impl DnsPacketHandler {
    pub fn new(resolver: QueryResolver) -> Self {
        Self { resolver }
    }

    pub fn handle(&self, scope: &str, query_bytes: &[u8]) -> Vec<u8> {
        if scope.is_empty() {
            warn!("Request without a routing scope");
            return Vec::new();
        }

        let request = match Message::from_vec(query_bytes) {
            Ok(message) => message,
            Err(e) => {
                warn!(%scope, error = %e, "Undecodable DNS query");
                return Vec::new();
            }
        };

        let questions: Vec<(String, u16)> = request
            .queries()
            .iter()
            .map(|q| (q.name().to_string(), u16::from(q.query_type())))
            .collect();

        let answers = self.resolver.resolve(scope, &questions);

        let mut reply = Message::new(request.id(), MessageType::Response, OpCode::Query);
        reply.set_authoritative(true);
        reply.set_recursion_desired(request.recursion_desired());
        reply.add_queries(request.queries().iter().cloned());
        for record in &answers {
            if let Some(rr) = wire::to_wire(record) {
                reply.add_answer(rr);
            }
        }

        debug!(
            %scope,
            id = request.id(),
            questions = questions.len(),
            answers = reply.answers().len(),
            "Query answered"
        );

        match Self::serialize(&reply) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(%scope, error = %e, "Reply serialization failed");
                Vec::new()
            }
        }
    }

    fn serialize(message: &Message) -> Result<Vec<u8>, DomainError> {
        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);
        message
            .emit(&mut encoder)
            .map_err(|e| DomainError::CodecError(e.to_string()))?;
        Ok(buf)
    }
}
