use authdns_domain::{RecordData, ResourceRecord};
use hickory_proto::rr::rdata::{A, AAAA, CNAME, MX, NS, NULL, PTR, SOA, SRV, TXT};
use hickory_proto::rr::{Name, RData, Record};
use std::str::FromStr;
use tracing::warn;

/// Convert a cached record into a wire-format answer.
///
/// A, AAAA, CNAME, NS, PTR, TXT, MX, SRV and SOA get typed rdata. The
/// remaining kinds are emitted as opaque rdata under their own type code
/// (RFC 3597 style), carrying the stored payload bytes verbatim. A record
/// whose name cannot be parsed is dropped from the answer with a warning.
pub fn to_wire(record: &ResourceRecord) -> Option<Record> {
    let name = parse_name(&record.name, record)?;
    let rdata = match &record.data {
        RecordData::A { address } => RData::A(A(*address)),
        RecordData::Aaaa { address } => RData::AAAA(AAAA(*address)),
        RecordData::Cname { target } => RData::CNAME(CNAME(parse_name(target, record)?)),
        RecordData::Ns { nsdname } => RData::NS(NS(parse_name(nsdname, record)?)),
        RecordData::Ptr { ptrdname } => RData::PTR(PTR(parse_name(ptrdname, record)?)),
        RecordData::Txt { text } => RData::TXT(TXT::new(vec![text.clone()])),
        // The row stores only the exchange host; preference is not modeled.
        RecordData::Mx { exchange } => RData::MX(MX::new(0, parse_name(exchange, record)?)),
        RecordData::Srv { target } => RData::SRV(SRV::new(0, 0, 0, parse_name(target, record)?)),
        RecordData::Soa { mname } => RData::SOA(SOA::new(
            parse_name(mname, record)?,
            Name::root(),
            0,
            0,
            0,
            0,
            0,
        )),
        RecordData::Caa { value } => opaque(record, value),
        RecordData::Naptr { flags } => opaque(record, flags),
        RecordData::Tlsa { certificate } => opaque(record, certificate),
        RecordData::Ds { digest } => opaque(record, digest),
        RecordData::Sshfp { fingerprint } => opaque(record, fingerprint),
        RecordData::Rrsig { signature } => opaque(record, signature),
        RecordData::Nsec { next_domain } => opaque(record, next_domain),
        RecordData::Nsec3 { next_domain } => opaque(record, next_domain),
        RecordData::Nsec3Param { salt } => opaque(record, salt),
    };
    Some(Record::from_rdata(name, record.ttl, rdata))
}

fn opaque(record: &ResourceRecord, payload: &str) -> RData {
    RData::Unknown {
        code: record.qtype().into(),
        rdata: NULL::with(payload.as_bytes().to_vec()),
    }
}

fn parse_name(text: &str, record: &ResourceRecord) -> Option<Name> {
    match Name::from_str(text) {
        Ok(name) => Some(name),
        Err(e) => {
            warn!(
                record_id = record.id,
                name = text,
                error = %e,
                "Unrepresentable domain name, dropping record from answer"
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use authdns_domain::{qtype, RecordRow};

    fn record(qtype_code: u16, rdata: &str) -> ResourceRecord {
        let row = RecordRow::from_change(
            1,
            "edge".into(),
            "www.example.com".into(),
            rdata.into(),
            qtype_code,
            300,
        );
        ResourceRecord::from_row(&row).unwrap()
    }

    #[test]
    fn a_record_carries_the_parsed_address() {
        let rr = to_wire(&record(qtype::A, "10.0.0.1")).unwrap();
        assert_eq!(rr.name().to_string(), "www.example.com.");
        assert_eq!(rr.ttl(), 300);
        match rr.data() {
            RData::A(a) => assert_eq!(a.0, "10.0.0.1".parse::<std::net::Ipv4Addr>().unwrap()),
            other => panic!("expected A rdata, got {other:?}"),
        }
    }

    #[test]
    fn cname_target_becomes_a_name() {
        let rr = to_wire(&record(qtype::CNAME, "origin.example.net.")).unwrap();
        match rr.data() {
            RData::CNAME(c) => assert_eq!(c.0.to_string(), "origin.example.net."),
            other => panic!("expected CNAME rdata, got {other:?}"),
        }
    }

    #[test]
    fn txt_payload_is_a_single_character_string() {
        let rr = to_wire(&record(qtype::TXT, "v=spf1 -all")).unwrap();
        match rr.data() {
            RData::TXT(t) => assert_eq!(t.txt_data()[0].as_ref(), b"v=spf1 -all"),
            other => panic!("expected TXT rdata, got {other:?}"),
        }
    }

    #[test]
    fn caa_is_emitted_under_its_own_type_code() {
        let rr = to_wire(&record(qtype::CAA, "0 issue \"ca.example.org\"")).unwrap();
        assert_eq!(u16::from(rr.record_type()), qtype::CAA);
        match rr.data() {
            RData::Unknown { rdata, .. } => {
                assert_eq!(rdata.anything(), b"0 issue \"ca.example.org\"");
            }
            other => panic!("expected opaque rdata, got {other:?}"),
        }
    }

    #[test]
    fn unparsable_target_drops_the_record() {
        assert!(to_wire(&record(qtype::CNAME, "bad..name..")).is_none());
    }
}
