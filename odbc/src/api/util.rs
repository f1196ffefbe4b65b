use crate::{
    api::errors::ODBCError,
    handles::definitions::{lookup, HandleId, Kom2Handle},
};
use definitions::{Char, Integer, SqlReturn};
use std::sync::Arc;

/// Shared answer for entry points this driver does not implement: an
/// `Unimplemented` diagnostic on the handle and SQL_ERROR, or
/// SQL_INVALID_HANDLE when there is no handle to attach the record to.
pub(crate) fn unsupported_function(handle: Option<Arc<Kom2Handle>>, name: &'static str) -> SqlReturn {
    match handle {
        Some(handle) => {
            handle.add_diag_info(ODBCError::Unimplemented(name));
            SqlReturn::ERROR
        }
        None => SqlReturn::INVALID_HANDLE,
    }
}

pub(crate) fn any_handle(id: HandleId) -> Option<Arc<Kom2Handle>> {
    lookup(id)
}

///
/// input_text_to_string converts a narrow input string to an owned String.
/// A negative length means the input is null-terminated (SQL_NTS).
///
/// # Safety
/// This reads from a raw C-pointer
///
pub(crate) unsafe fn input_text_to_string(text: *const Char, length: Integer) -> String {
    if text.is_null() {
        return String::new();
    }
    let len = if length < 0 {
        let mut len = 0usize;
        while *text.add(len) != 0 {
            len += 1;
        }
        len
    } else {
        length as usize
    };
    String::from_utf8_lossy(std::slice::from_raw_parts(text, len)).to_string()
}
