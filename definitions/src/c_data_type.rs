use num_derive::FromPrimitive;

#[allow(non_camel_case_types)]
#[repr(i16)]
#[derive(Debug, PartialEq, Eq, Clone, Copy, FromPrimitive)]
pub enum CDataType {
    SQL_C_UTINYINT = -28,
    SQL_C_UBIGINT = -27,
    SQL_C_STINYINT = -26,
    SQL_C_SBIGINT = -25,
    SQL_C_ULONG = -18,
    SQL_C_USHORT = -17,
    SQL_C_SLONG = -16,
    SQL_C_SSHORT = -15,
    SQL_C_GUID = -11,
    SQL_C_WCHAR = -8,
    SQL_C_BIT = -7,
    SQL_C_BINARY = -2,
    SQL_C_CHAR = 1,
    SQL_C_NUMERIC = 2,
    SQL_C_FLOAT = 7,
    SQL_C_DOUBLE = 8,
    SQL_C_TYPE_DATE = 91,
    SQL_C_TYPE_TIME = 92,
    SQL_C_TYPE_TIMESTAMP = 93,
    SQL_C_DEFAULT = 99,
}
