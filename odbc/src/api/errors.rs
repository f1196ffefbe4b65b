use constants::{GENERAL_ERROR, INVALID_DESCRIPTOR_INDEX, NOT_IMPLEMENTED};
use definitions::{SmallInt, USmallInt};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ODBCError>;

/// Diagnostic records as stored on a handle. The Display impl is the message
/// text handed back through SQLGetDiagRec, so the wording here is part of
/// the driver's observable contract.
#[derive(Error, Debug)]
pub enum ODBCError {
    #[error("Unsupported attribute")]
    UnsupportedAttribute,
    #[error("The feature {0} is not implemented")]
    Unimplemented(&'static str),
    #[error("Invalid descriptor index {0}")]
    InvalidDescriptorIndex(USmallInt),
    #[error("{0}")]
    InvalidHandleType(&'static str),
    #[error("Unsupported parameter direction {0}")]
    UnsupportedParamDirection(SmallInt),
    #[error("Unsupported parameter value type {0}")]
    UnsupportedParamValueType(SmallInt),
    #[error("Unsupported target type {0}")]
    UnsupportedTargetType(SmallInt),
    #[error("Invalid SQLFreeStmt option {0}")]
    InvalidFreeStmtOption(SmallInt),
    #[error("no prepared statement to execute")]
    NoPreparedStatement,
    #[error("no open result set")]
    NoResultSet,
    #[error("connection is not open")]
    ConnectionNotOpen,
    #[error(transparent)]
    Core(#[from] kom2_core::Error),
}

impl ODBCError {
    pub fn get_sql_state(&self) -> &'static str {
        match self {
            ODBCError::UnsupportedAttribute | ODBCError::Unimplemented(_) => NOT_IMPLEMENTED,
            ODBCError::InvalidDescriptorIndex(_) => INVALID_DESCRIPTOR_INDEX,
            ODBCError::InvalidHandleType(_)
            | ODBCError::UnsupportedParamDirection(_)
            | ODBCError::UnsupportedParamValueType(_)
            | ODBCError::UnsupportedTargetType(_)
            | ODBCError::InvalidFreeStmtOption(_)
            | ODBCError::NoPreparedStatement
            | ODBCError::NoResultSet
            | ODBCError::ConnectionNotOpen => GENERAL_ERROR,
            ODBCError::Core(e) => e.get_sql_state(),
        }
    }

    pub fn get_native_err_code(&self) -> i32 {
        match self {
            ODBCError::Core(e) => e.code(),
            _ => 0,
        }
    }
}
