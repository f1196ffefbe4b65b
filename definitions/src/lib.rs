//! Hand-maintained declarations for the slice of the ODBC 3.x C API this
//! driver exports: integer and pointer aliases sized to the platform
//! headers, plus the constants the entry points dispatch on, grouped into
//! enums so raw attribute and type integers can be matched instead of
//! compared against bare numbers.
//!
//! Coverage is deliberately narrow. Only the ANSI (narrow-char) surface is
//! declared, and an enum lists just the values some entry point or test in
//! this workspace distinguishes; any other raw value fails its
//! `FromPrimitive` conversion and is handled as unknown at the call site.
//! The enums make dispatch readable but do not make the FFI boundary safe:
//! everything here is exactly as trusting as the C headers it mirrors.

pub use self::{
    attributes::*, c_data_type::*, diag_type::*, nullability::*, param_type::*, sql_data_type::*,
    sqlreturn::*,
};
use num_derive::FromPrimitive;
use std::os::raw::c_void;

mod attributes;
mod c_data_type;
mod diag_type;
mod nullability;
mod param_type;
mod sql_data_type;
mod sqlreturn;

// These types can never be instantiated in Rust code.
pub enum Obj {}

pub enum Env {}

pub enum Dbc {}

pub enum Stmt {}

pub enum Description {}

pub type Handle = *mut Obj;
pub type HEnv = *mut Env;
pub type HDesc = *mut Description;

/// The connection handle references storage of all information about the
/// connection to the data source, including status, transaction state, and
/// error information.
pub type HDbc = *mut Dbc;
pub type HStmt = *mut Stmt;

pub type SmallInt = i16;
pub type USmallInt = u16;
pub type Integer = i32;
pub type UInteger = u32;
pub type Pointer = *mut c_void;
pub type Char = u8;

pub type Len = isize;
pub type ULen = usize;

pub type HWnd = Pointer;

pub type RetCode = i16;

// flag for null-terminated input strings
pub const SQL_NTS: Integer = -3;

/// Indicator value for SQL NULL cells
pub const SQL_NULL_DATA: Len = -1;
/// Indicator value when the remaining data length is unknown
pub const SQL_NO_TOTAL: Len = -4;

pub const SQLSTATE_SIZE: usize = 5;

/// Maximum diagnostic message length
pub const MAX_MESSAGE_LENGTH: SmallInt = 512;

/// Represented in C headers as SQLSMALLINT
#[allow(non_camel_case_types)]
#[repr(i16)]
#[derive(Debug, PartialEq, Eq, Clone, Copy, FromPrimitive)]
pub enum HandleType {
    SQL_HANDLE_ENV = 1,
    SQL_HANDLE_DBC = 2,
    SQL_HANDLE_STMT = 3,
    SQL_HANDLE_DESC = 4,
}

/// Options for `SQLDriverConnect`
#[allow(non_camel_case_types)]
#[repr(u16)]
#[derive(Debug, PartialEq, Eq, Clone, Copy, FromPrimitive)]
pub enum DriverConnectOption {
    SQL_DRIVER_NOPROMPT = 0,
    SQL_DRIVER_COMPLETE = 1,
    SQL_DRIVER_PROMPT = 2,
    SQL_DRIVER_COMPLETE_REQUIRED = 3,
}

/// Completion options for `SQLEndTran`
#[allow(non_camel_case_types)]
#[repr(i16)]
#[derive(Debug, PartialEq, Eq, Clone, Copy, FromPrimitive)]
pub enum CompletionType {
    SQL_COMMIT = 0,
    SQL_ROLLBACK = 1,
}

/// Options for `SQLFreeStmt`
#[allow(non_camel_case_types)]
#[repr(u16)]
#[derive(Debug, PartialEq, Eq, Clone, Copy, FromPrimitive)]
pub enum FreeStmtOption {
    /// Closes the cursor associated with the statement (if one was defined)
    /// and discards all pending results.
    SQL_CLOSE = 0,
    // SQL_DROP = 1, is deprecated in favour of SQLFreeHandle
    /// Releases all column buffers bound by `SQLBindCol` for the statement.
    SQL_UNBIND = 2,
    /// Releases all parameter buffers set by `SQLBindParameter` for the
    /// statement.
    SQL_RESET_PARAMS = 3,
}

// Attribute lengths for `SQLGetDiagField` and the attribute setters.

/// SQL_IS_POINTER
pub const IS_POINTER: i16 = -4;
/// SQL_IS_UINTEGER
pub const IS_UINTEGER: i16 = -5;
/// SQL_IS_INTEGER
pub const IS_INTEGER: i16 = -6;
/// SQL_IS_USMALLINT
pub const IS_USMALLINT: i16 = -7;
/// SQL_IS_SMALLINT
pub const IS_SMALLINT: i16 = -8;
