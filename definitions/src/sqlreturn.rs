/// Indicates the overall success or failure of an ODBC function call,
/// represented in C headers as SQLRETURN.
#[repr(transparent)]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct SqlReturn(pub i16);

impl SqlReturn {
    pub const INVALID_HANDLE: SqlReturn = SqlReturn(-2);
    pub const ERROR: SqlReturn = SqlReturn(-1);
    pub const SUCCESS: SqlReturn = SqlReturn(0);
    pub const SUCCESS_WITH_INFO: SqlReturn = SqlReturn(1);
    pub const STILL_EXECUTING: SqlReturn = SqlReturn(2);
    pub const NEED_DATA: SqlReturn = SqlReturn(99);
    pub const NO_DATA: SqlReturn = SqlReturn(100);
}
