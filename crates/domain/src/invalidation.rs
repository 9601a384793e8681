use crate::record_row::RecordRow;
use thiserror::Error;

/// One unit of the invalidation feed, parsed from its colon-delimited text
/// form. The trailing field names the operation:
///
/// ```text
/// scope:recordId:delete
/// scope:name:qtype:reload
/// scope:name:rdata:qtype:ttl:recordId:add
/// scope:name:rdata:qtype:ttl:recordId:update
/// ```
///
/// The colon must not appear inside any field value; that is a constraint on
/// feed publishers, not something this parser can repair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidationOp {
    Delete { scope: String, record_id: i64 },
    Reload { scope: String, name: String, qtype: u16 },
    Add(RecordRow),
    Update(RecordRow),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidationParseError {
    #[error("unknown operation tag '{0}'")]
    UnknownOp(String),

    #[error("{op} message has {got} fields, expected {want}")]
    FieldCount { op: &'static str, want: usize, got: usize },

    #[error("{op} message field '{field}' is not numeric: '{value}'")]
    BadNumber { op: &'static str, field: &'static str, value: String },
}

impl InvalidationOp {
    pub fn parse(payload: &str) -> Result<Self, InvalidationParseError> {
        let fields: Vec<&str> = payload.split(':').collect();
        let tag = *fields.last().unwrap_or(&"");

        match tag {
            "delete" => {
                expect_fields("delete", &fields, 3)?;
                Ok(InvalidationOp::Delete {
                    scope: fields[0].to_string(),
                    record_id: parse_num("delete", "recordId", fields[1])?,
                })
            }
            "reload" => {
                expect_fields("reload", &fields, 4)?;
                Ok(InvalidationOp::Reload {
                    scope: fields[0].to_string(),
                    name: fields[1].to_string(),
                    qtype: parse_num("reload", "qtype", fields[2])?,
                })
            }
            "add" => Ok(InvalidationOp::Add(parse_change("add", &fields)?)),
            "update" => Ok(InvalidationOp::Update(parse_change("update", &fields)?)),
            other => Err(InvalidationParseError::UnknownOp(other.to_string())),
        }
    }

    pub fn op_name(&self) -> &'static str {
        match self {
            InvalidationOp::Delete { .. } => "delete",
            InvalidationOp::Reload { .. } => "reload",
            InvalidationOp::Add(_) => "add",
            InvalidationOp::Update(_) => "update",
        }
    }
}

fn expect_fields(
    op: &'static str,
    fields: &[&str],
    want: usize,
) -> Result<(), InvalidationParseError> {
    if fields.len() != want {
        return Err(InvalidationParseError::FieldCount {
            op,
            want,
            got: fields.len(),
        });
    }
    Ok(())
}

fn parse_num<T: std::str::FromStr>(
    op: &'static str,
    field: &'static str,
    value: &str,
) -> Result<T, InvalidationParseError> {
    value.parse().map_err(|_| InvalidationParseError::BadNumber {
        op,
        field,
        value: value.to_string(),
    })
}

fn parse_change(op: &'static str, fields: &[&str]) -> Result<RecordRow, InvalidationParseError> {
    expect_fields(op, fields, 7)?;
    Ok(RecordRow::from_change(
        parse_num(op, "recordId", fields[5])?,
        fields[0].to_string(),
        fields[1].to_string(),
        fields[2].to_string(),
        parse_num(op, "qtype", fields[3])?,
        parse_num(op, "ttl", fields[4])?,
    ))
}
