use definitions::{Char, SqlReturn};
use serde_json::Value;
use std::{cmp::min, ptr::copy_nonoverlapping};

///
/// ptr_safe_write writes the given data to [`ptr`] when it is not null.
///
/// # Safety
/// This writes to a raw C-pointer
///
pub(crate) unsafe fn ptr_safe_write<T>(ptr: *mut T, data: T) {
    if !ptr.is_null() {
        *ptr = data;
    }
}

///
/// write_string_to_buffer copies [`message`] into the *Char [`output_ptr`]
/// of [`buffer_len`] bytes, truncating to `buffer_len - 1` bytes plus a NUL
/// terminator. Returns the number of bytes written (excluding the NUL) and
/// whether truncation happened.
///
/// # Safety
/// This writes to a raw C-pointer
///
unsafe fn write_string_to_buffer(
    message: &[u8],
    output_ptr: *mut Char,
    buffer_len: usize,
) -> (usize, SqlReturn) {
    // with no buffer there is nothing to write, but the caller still learns
    // the required length through the length pointer
    if output_ptr.is_null() || buffer_len == 0 {
        return (0, SqlReturn::SUCCESS_WITH_INFO);
    }
    let written = min(message.len(), buffer_len - 1);
    copy_nonoverlapping(message.as_ptr(), output_ptr, written);
    *output_ptr.add(written) = 0;
    if written < message.len() {
        (written, SqlReturn::SUCCESS_WITH_INFO)
    } else {
        (written, SqlReturn::SUCCESS)
    }
}

///
/// write_fixed_data writes [`data`], which must be a fixed sized type, to
/// [`output_ptr`]. ODBC drivers assume the output buffer is large enough for
/// fixed types.
///
/// # Safety
/// This writes to a raw C-pointer
///
unsafe fn write_fixed_data<T: Copy>(data: &T, output_ptr: definitions::Pointer) {
    copy_nonoverlapping(data as *const T, output_ptr as *mut T, 1);
}

/// Renders a result cell as text for SQL_C_CHAR targets. Strings are copied
/// verbatim; everything else uses its JSON rendering.
pub(crate) fn cell_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Coerces a result cell for integer targets.
pub(crate) fn cell_to_i64(value: &Value) -> i64 {
    value
        .as_i64()
        .or_else(|| value.as_str().and_then(|s| s.parse().ok()))
        .unwrap_or_default()
}

/// Copy-out helpers for outputs whose length parameter is an i16
/// (diagnostics and column descriptions).
pub(crate) mod i16_len {
    use super::*;
    use definitions::SmallInt;

    ///
    /// set_output_string writes [`message`] to [`output_ptr`], reporting the
    /// number of bytes actually written (excluding the terminator) through
    /// [`text_length_ptr`].
    ///
    /// # Safety
    /// This writes to multiple raw C-pointers
    ///
    pub unsafe fn set_output_string(
        message: &str,
        output_ptr: *mut Char,
        buffer_len: usize,
        text_length_ptr: *mut SmallInt,
    ) -> SqlReturn {
        let (written, ret) = write_string_to_buffer(message.as_bytes(), output_ptr, buffer_len);
        ptr_safe_write(text_length_ptr, written as SmallInt);
        ret
    }

    ///
    /// set_output_string_total writes [`message`] to [`output_ptr`],
    /// reporting the full message length (excluding the terminator) through
    /// [`text_length_ptr`] whether or not the copy was truncated.
    ///
    /// # Safety
    /// This writes to multiple raw C-pointers
    ///
    pub unsafe fn set_output_string_total(
        message: &str,
        output_ptr: *mut Char,
        buffer_len: usize,
        text_length_ptr: *mut SmallInt,
    ) -> SqlReturn {
        let (_, ret) = write_string_to_buffer(message.as_bytes(), output_ptr, buffer_len);
        ptr_safe_write(text_length_ptr, message.len() as SmallInt);
        ret
    }

    ///
    /// set_output_fixed_data writes [`data`], which must be a fixed sized
    /// type, to [`output_ptr`].
    ///
    /// # Safety
    /// This writes to multiple raw C-pointers
    ///
    pub unsafe fn set_output_fixed_data<T: Copy>(
        data: &T,
        output_ptr: definitions::Pointer,
        data_len_ptr: *mut SmallInt,
    ) -> SqlReturn {
        ptr_safe_write(data_len_ptr, std::mem::size_of::<T>() as SmallInt);
        if output_ptr.is_null() {
            return SqlReturn::SUCCESS_WITH_INFO;
        }
        write_fixed_data(data, output_ptr);
        SqlReturn::SUCCESS
    }
}

/// Copy-out helpers for outputs whose length parameter is an i32 (attribute
/// getters).
pub(crate) mod i32_len {
    use super::*;
    use definitions::Integer;

    ///
    /// set_output_fixed_data writes [`data`], which must be a fixed sized
    /// type, to [`output_ptr`].
    ///
    /// # Safety
    /// This writes to multiple raw C-pointers
    ///
    pub unsafe fn set_output_fixed_data<T: Copy>(
        data: &T,
        output_ptr: definitions::Pointer,
        data_len_ptr: *mut Integer,
    ) -> SqlReturn {
        ptr_safe_write(data_len_ptr, std::mem::size_of::<T>() as Integer);
        if output_ptr.is_null() {
            return SqlReturn::SUCCESS_WITH_INFO;
        }
        write_fixed_data(data, output_ptr);
        SqlReturn::SUCCESS
    }
}

/// Copy-out helpers for outputs whose length parameter is an isize (cell
/// data through SQLGetData and bound columns).
pub(crate) mod isize_len {
    use super::*;
    use definitions::Len;

    ///
    /// set_output_string writes [`message`] to [`output_ptr`], reporting the
    /// total data length (excluding the terminator) through
    /// [`text_length_ptr`] so callers can detect truncation.
    ///
    /// # Safety
    /// This writes to multiple raw C-pointers
    ///
    pub unsafe fn set_output_string(
        message: &str,
        output_ptr: *mut Char,
        buffer_len: usize,
        text_length_ptr: *mut Len,
    ) -> SqlReturn {
        let (_, ret) = write_string_to_buffer(message.as_bytes(), output_ptr, buffer_len);
        ptr_safe_write(text_length_ptr, message.len() as Len);
        ret
    }

    ///
    /// set_output_fixed_data writes [`data`], which must be a fixed sized
    /// type, to [`output_ptr`].
    ///
    /// # Safety
    /// This writes to multiple raw C-pointers
    ///
    pub unsafe fn set_output_fixed_data<T: Copy>(
        data: &T,
        output_ptr: definitions::Pointer,
        data_len_ptr: *mut Len,
    ) -> SqlReturn {
        ptr_safe_write(data_len_ptr, std::mem::size_of::<T>() as Len);
        if output_ptr.is_null() {
            return SqlReturn::SUCCESS_WITH_INFO;
        }
        write_fixed_data(data, output_ptr);
        SqlReturn::SUCCESS
    }
}
