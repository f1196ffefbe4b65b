use crate::api::{
    data::{i16_len, ptr_safe_write},
    errors::ODBCError,
};
use constants::{DBMS_NAME, DIAG_CLASS_ORIGIN, DIAG_SUBCLASS_ORIGIN, DRIVER_NAME};
use definitions::{Char, DiagType, Integer, Pointer, SmallInt, SqlReturn};
use std::ptr::copy_nonoverlapping;

///
/// set_sql_state writes the given sql state to the [`output_ptr`].
///
/// # Safety
/// This writes to a raw C-pointer
///
pub unsafe fn set_sql_state(sql_state: &str, output_ptr: *mut Char) {
    if output_ptr.is_null() {
        return;
    }
    let sql_state = format!("{sql_state}\0");
    copy_nonoverlapping(sql_state.as_ptr(), output_ptr, 6);
}

///
/// get_diag_rec copies the given diagnostic record into the provided
/// pointers. The reported text length is always the full message length,
/// whether or not the message was truncated into the buffer.
///
/// # Safety
/// This writes to multiple raw C-pointers
///
pub unsafe fn get_diag_rec(
    error: &ODBCError,
    state: *mut Char,
    message_text: *mut Char,
    buffer_length: SmallInt,
    text_length_ptr: *mut SmallInt,
    native_error_ptr: *mut Integer,
) -> SqlReturn {
    ptr_safe_write(native_error_ptr, error.get_native_err_code());
    set_sql_state(error.get_sql_state(), state);
    let message = format!("{error}");
    if message_text.is_null() {
        // the caller only wants the length
        ptr_safe_write(text_length_ptr, message.len() as SmallInt);
        return SqlReturn::SUCCESS;
    }
    i16_len::set_output_string_total(
        &message,
        message_text,
        buffer_length as usize,
        text_length_ptr,
    )
}

///
/// zero_diag_outputs clears every output of SQLGetDiagRec for the
/// SQL_NO_DATA answer.
///
/// # Safety
/// This writes to multiple raw C-pointers
///
pub unsafe fn zero_diag_outputs(
    state: *mut Char,
    message_text: *mut Char,
    buffer_length: SmallInt,
    text_length_ptr: *mut SmallInt,
    native_error_ptr: *mut Integer,
) {
    if !state.is_null() {
        *state = 0;
    }
    if !message_text.is_null() && buffer_length > 0 {
        *message_text = 0;
    }
    ptr_safe_write(text_length_ptr, 0);
    ptr_safe_write(native_error_ptr, 0);
}

///
/// get_diag_field copies one field of the given diagnostic record into
/// [`diag_info_ptr`]. String fields follow the shared truncation protocol
/// and report the number of bytes written.
///
/// # Safety
/// This writes to multiple raw C-pointers
///
pub unsafe fn get_diag_field(
    error: &ODBCError,
    diag_identifier: DiagType,
    diag_info_ptr: Pointer,
    buffer_length: SmallInt,
    string_length_ptr: *mut SmallInt,
) -> SqlReturn {
    let string_field = |message: &str| {
        if buffer_length < 0 {
            return SqlReturn::ERROR;
        }
        unsafe {
            i16_len::set_output_string(
                message,
                diag_info_ptr as *mut Char,
                buffer_length as usize,
                string_length_ptr,
            )
        }
    };
    match diag_identifier {
        // the return code of the original call is tracked by the driver
        // manager, not by us
        DiagType::SQL_DIAG_RETURNCODE => SqlReturn::SUCCESS,
        DiagType::SQL_DIAG_SQLSTATE => string_field(error.get_sql_state()),
        DiagType::SQL_DIAG_MESSAGE_TEXT => string_field(&format!("{error}")),
        DiagType::SQL_DIAG_CLASS_ORIGIN => string_field(DIAG_CLASS_ORIGIN),
        DiagType::SQL_DIAG_SUBCLASS_ORIGIN => string_field(DIAG_SUBCLASS_ORIGIN),
        DiagType::SQL_DIAG_CONNECTION_NAME => string_field(DRIVER_NAME),
        DiagType::SQL_DIAG_SERVER_NAME => string_field(DBMS_NAME),
        DiagType::SQL_DIAG_NATIVE => i16_len::set_output_fixed_data(
            &error.get_native_err_code(),
            diag_info_ptr,
            std::ptr::null_mut::<SmallInt>(),
        ),
        _ => SqlReturn::ERROR,
    }
}
