use crate::record_row::RecordRow;
use std::net::{Ipv4Addr, Ipv6Addr};
use thiserror::Error;

/// Wire type codes for the record kinds this backend serves (RFC 1035 and
/// friends). DNSKEY is listed because it must be recognized to be rejected.
pub mod qtype {
    pub const A: u16 = 1;
    pub const NS: u16 = 2;
    pub const CNAME: u16 = 5;
    pub const SOA: u16 = 6;
    pub const PTR: u16 = 12;
    pub const MX: u16 = 15;
    pub const TXT: u16 = 16;
    pub const AAAA: u16 = 28;
    pub const SRV: u16 = 33;
    pub const NAPTR: u16 = 35;
    pub const DS: u16 = 43;
    pub const SSHFP: u16 = 44;
    pub const RRSIG: u16 = 46;
    pub const NSEC: u16 = 47;
    pub const DNSKEY: u16 = 48;
    pub const NSEC3: u16 = 50;
    pub const NSEC3PARAM: u16 = 51;
    pub const TLSA: u16 = 52;
    pub const CAA: u16 = 257;
}

/// Typed payload of a materialized record.
///
/// Address kinds hold parsed addresses; every other kind carries the row's
/// `rdata` verbatim in its authoritative field. The variant is the record's
/// single source of type identity — there is no separate type tag to drift
/// out of sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordData {
    A { address: Ipv4Addr },
    Aaaa { address: Ipv6Addr },
    Cname { target: String },
    Txt { text: String },
    Mx { exchange: String },
    Ns { nsdname: String },
    Srv { target: String },
    Soa { mname: String },
    Ptr { ptrdname: String },
    Caa { value: String },
    Naptr { flags: String },
    Tlsa { certificate: String },
    Ds { digest: String },
    Sshfp { fingerprint: String },
    Rrsig { signature: String },
    Nsec { next_domain: String },
    Nsec3 { next_domain: String },
    Nsec3Param { salt: String },
}

impl RecordData {
    /// Wire type code of this payload.
    pub fn qtype(&self) -> u16 {
        match self {
            RecordData::A { .. } => qtype::A,
            RecordData::Aaaa { .. } => qtype::AAAA,
            RecordData::Cname { .. } => qtype::CNAME,
            RecordData::Txt { .. } => qtype::TXT,
            RecordData::Mx { .. } => qtype::MX,
            RecordData::Ns { .. } => qtype::NS,
            RecordData::Srv { .. } => qtype::SRV,
            RecordData::Soa { .. } => qtype::SOA,
            RecordData::Ptr { .. } => qtype::PTR,
            RecordData::Caa { .. } => qtype::CAA,
            RecordData::Naptr { .. } => qtype::NAPTR,
            RecordData::Tlsa { .. } => qtype::TLSA,
            RecordData::Ds { .. } => qtype::DS,
            RecordData::Sshfp { .. } => qtype::SSHFP,
            RecordData::Rrsig { .. } => qtype::RRSIG,
            RecordData::Nsec { .. } => qtype::NSEC,
            RecordData::Nsec3 { .. } => qtype::NSEC3,
            RecordData::Nsec3Param { .. } => qtype::NSEC3PARAM,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            RecordData::A { .. } => "A",
            RecordData::Aaaa { .. } => "AAAA",
            RecordData::Cname { .. } => "CNAME",
            RecordData::Txt { .. } => "TXT",
            RecordData::Mx { .. } => "MX",
            RecordData::Ns { .. } => "NS",
            RecordData::Srv { .. } => "SRV",
            RecordData::Soa { .. } => "SOA",
            RecordData::Ptr { .. } => "PTR",
            RecordData::Caa { .. } => "CAA",
            RecordData::Naptr { .. } => "NAPTR",
            RecordData::Tlsa { .. } => "TLSA",
            RecordData::Ds { .. } => "DS",
            RecordData::Sshfp { .. } => "SSHFP",
            RecordData::Rrsig { .. } => "RRSIG",
            RecordData::Nsec { .. } => "NSEC",
            RecordData::Nsec3 { .. } => "NSEC3",
            RecordData::Nsec3Param { .. } => "NSEC3PARAM",
        }
    }
}

/// Why a row could not be materialized. These are per-record warnings, not
/// batch failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MaterializeError {
    #[error("DNSKEY records are not supported")]
    UnsupportedDnskey,

    #[error("unsupported record type {0}")]
    UnsupportedType(u16),

    #[error("invalid {kind} address literal '{literal}'")]
    InvalidAddress { kind: &'static str, literal: String },
}

/// Fully-typed DNS resource record derived from a [`RecordRow`].
///
/// Keeps the originating row id so later invalidation messages can correlate
/// updates and deletes with the cached entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    pub id: i64,
    /// Owner name, normalized to a lowercase FQDN with trailing dot.
    pub name: String,
    pub class: u16,
    pub ttl: u32,
    pub data: RecordData,
}

impl ResourceRecord {
    /// Materialize one row into a typed record.
    ///
    /// A and AAAA rows must carry a parsable address literal; a malformed
    /// literal rejects the row rather than caching a record that cannot be
    /// answered correctly.
    pub fn from_row(row: &RecordRow) -> Result<Self, MaterializeError> {
        let data = match row.qtype {
            qtype::A => RecordData::A {
                address: row.rdata.trim().parse().map_err(|_| {
                    MaterializeError::InvalidAddress {
                        kind: "A",
                        literal: row.rdata.clone(),
                    }
                })?,
            },
            qtype::AAAA => RecordData::Aaaa {
                address: row.rdata.trim().parse().map_err(|_| {
                    MaterializeError::InvalidAddress {
                        kind: "AAAA",
                        literal: row.rdata.clone(),
                    }
                })?,
            },
            qtype::CNAME => RecordData::Cname {
                target: row.rdata.clone(),
            },
            qtype::TXT => RecordData::Txt {
                text: row.rdata.clone(),
            },
            qtype::MX => RecordData::Mx {
                exchange: row.rdata.clone(),
            },
            qtype::NS => RecordData::Ns {
                nsdname: row.rdata.clone(),
            },
            qtype::SRV => RecordData::Srv {
                target: row.rdata.clone(),
            },
            qtype::SOA => RecordData::Soa {
                mname: row.rdata.clone(),
            },
            qtype::PTR => RecordData::Ptr {
                ptrdname: row.rdata.clone(),
            },
            qtype::CAA => RecordData::Caa {
                value: row.rdata.clone(),
            },
            qtype::NAPTR => RecordData::Naptr {
                flags: row.rdata.clone(),
            },
            qtype::TLSA => RecordData::Tlsa {
                certificate: row.rdata.clone(),
            },
            qtype::DS => RecordData::Ds {
                digest: row.rdata.clone(),
            },
            qtype::SSHFP => RecordData::Sshfp {
                fingerprint: row.rdata.clone(),
            },
            qtype::RRSIG => RecordData::Rrsig {
                signature: row.rdata.clone(),
            },
            qtype::NSEC => RecordData::Nsec {
                next_domain: row.rdata.clone(),
            },
            qtype::NSEC3 => RecordData::Nsec3 {
                next_domain: row.rdata.clone(),
            },
            qtype::NSEC3PARAM => RecordData::Nsec3Param {
                salt: row.rdata.clone(),
            },
            qtype::DNSKEY => return Err(MaterializeError::UnsupportedDnskey),
            other => return Err(MaterializeError::UnsupportedType(other)),
        };

        Ok(Self {
            id: row.id,
            name: crate::cache_key::normalize_name(&row.name),
            class: row.qclass,
            ttl: row.ttl,
            data,
        })
    }

    pub fn qtype(&self) -> u16 {
        self.data.qtype()
    }
}
