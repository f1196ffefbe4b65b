use num_derive::FromPrimitive;

/// Column nullability as reported by SQLDescribeCol and SQLDescribeParam.
/// Every column this driver describes is either known nullable or known
/// non-nullable, so the unknown value has no declaration.
#[allow(non_camel_case_types)]
#[derive(Debug, PartialEq, Eq, Clone, Copy, FromPrimitive)]
#[repr(i16)]
pub enum Nullability {
    SQL_NO_NULLS = 0,
    SQL_NULLABLE = 1,
}
