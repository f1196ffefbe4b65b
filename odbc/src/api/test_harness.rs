use crate::{SQLAllocHandle, SQLFreeHandle, SQLGetDiagRec};
use definitions::{Handle, HandleType, Integer, SmallInt, SqlReturn};
use std::ptr::null_mut;

pub(crate) fn alloc_env() -> Handle {
    let mut handle: Handle = null_mut();
    assert_eq!(
        SqlReturn::SUCCESS,
        SQLAllocHandle(
            HandleType::SQL_HANDLE_ENV as SmallInt,
            null_mut(),
            &mut handle
        )
    );
    assert!(!handle.is_null());
    handle
}

pub(crate) fn alloc_dbc(env: Handle) -> Handle {
    let mut handle: Handle = null_mut();
    assert_eq!(
        SqlReturn::SUCCESS,
        SQLAllocHandle(HandleType::SQL_HANDLE_DBC as SmallInt, env, &mut handle)
    );
    assert!(!handle.is_null());
    handle
}

pub(crate) fn alloc_stmt(dbc: Handle) -> Handle {
    let mut handle: Handle = null_mut();
    assert_eq!(
        SqlReturn::SUCCESS,
        SQLAllocHandle(HandleType::SQL_HANDLE_STMT as SmallInt, dbc, &mut handle)
    );
    assert!(!handle.is_null());
    handle
}

/// env, dbc and stmt handles for one test; freeing the env tears everything
/// down.
pub(crate) fn env_dbc_stmt() -> (Handle, Handle, Handle) {
    let env = alloc_env();
    let dbc = alloc_dbc(env);
    let stmt = alloc_stmt(dbc);
    (env, dbc, stmt)
}

pub(crate) fn free_env(env: Handle) {
    assert_eq!(
        SqlReturn::SUCCESS,
        SQLFreeHandle(HandleType::SQL_HANDLE_ENV as SmallInt, env)
    );
}

pub(crate) fn c_string(bytes: &[u8]) -> String {
    let len = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..len]).to_string()
}

/// Reads one diagnostic record as (sqlstate, message).
pub(crate) fn get_diag(handle_type: HandleType, handle: Handle, rec_number: SmallInt) -> (String, String) {
    let mut state = [0u8; 6];
    let mut message = [0u8; 1024];
    let mut text_len: SmallInt = 0;
    let mut native: Integer = 0;
    let result = SQLGetDiagRec(
        handle_type as SmallInt,
        handle,
        rec_number,
        state.as_mut_ptr(),
        &mut native,
        message.as_mut_ptr(),
        message.len() as SmallInt,
        &mut text_len,
    );
    assert_eq!(SqlReturn::SUCCESS, result);
    (c_string(&state), c_string(&message))
}
