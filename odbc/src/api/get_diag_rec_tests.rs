use crate::{api::test_harness::*, SQLGetDiagRec, SQLSetEnvAttr};
use definitions::{
    EnvironmentAttribute, Handle, HandleType, Integer, SmallInt, SqlReturn,
};
use std::ptr::null_mut;

const UNSUPPORTED_ATTRIBUTE: &str = "Unsupported attribute";

fn force_env_error(env: Handle) {
    assert_eq!(
        SqlReturn::ERROR,
        SQLSetEnvAttr(
            env as definitions::HEnv,
            EnvironmentAttribute::SQL_ATTR_CONNECTION_POOLING as Integer,
            null_mut(),
            0
        )
    );
}

#[test]
fn invalid_handle() {
    assert_eq!(
        SqlReturn::INVALID_HANDLE,
        SQLGetDiagRec(
            HandleType::SQL_HANDLE_STMT as SmallInt,
            null_mut(),
            0,
            null_mut(),
            null_mut(),
            null_mut(),
            0,
            null_mut()
        )
    );
}

#[test]
fn invalid_handle_type() {
    let env = alloc_env();
    assert_eq!(
        SqlReturn::INVALID_HANDLE,
        SQLGetDiagRec(9999, env, 0, null_mut(), null_mut(), null_mut(), 0, null_mut())
    );
    free_env(env);
}

#[test]
fn mismatched_handle_type() {
    let env = alloc_env();
    assert_eq!(
        SqlReturn::INVALID_HANDLE,
        SQLGetDiagRec(
            HandleType::SQL_HANDLE_STMT as SmallInt,
            env,
            0,
            null_mut(),
            null_mut(),
            null_mut(),
            0,
            null_mut()
        )
    );
    free_env(env);
}

#[test]
fn no_error() {
    let env = alloc_env();
    assert_eq!(
        SqlReturn::NO_DATA,
        SQLGetDiagRec(
            HandleType::SQL_HANDLE_ENV as SmallInt,
            env,
            0,
            null_mut(),
            null_mut(),
            null_mut(),
            0,
            null_mut()
        )
    );
    free_env(env);
}

#[test]
fn no_error_zeroes_outputs() {
    let env = alloc_env();
    let mut state = [0u8; 6];
    let mut native: Integer = 1;
    let mut message = [0u8; 100];
    let mut text_len: SmallInt = 7;

    assert_eq!(
        SqlReturn::NO_DATA,
        SQLGetDiagRec(
            HandleType::SQL_HANDLE_ENV as SmallInt,
            env,
            0,
            state.as_mut_ptr(),
            &mut native,
            message.as_mut_ptr(),
            message.len() as SmallInt,
            &mut text_len
        )
    );
    assert_eq!("", c_string(&state));
    assert_eq!(0, native);
    assert_eq!("", c_string(&message));
    assert_eq!(0, text_len);
    free_env(env);
}

#[test]
fn env_error() {
    let env = alloc_env();
    force_env_error(env);

    let mut state = [0u8; 6];
    let mut message = [0u8; 100];
    let mut text_len: SmallInt = 0;
    assert_eq!(
        SqlReturn::SUCCESS,
        SQLGetDiagRec(
            HandleType::SQL_HANDLE_ENV as SmallInt,
            env,
            1,
            state.as_mut_ptr(),
            null_mut(),
            message.as_mut_ptr(),
            message.len() as SmallInt,
            &mut text_len
        )
    );
    assert_eq!("HYC00", c_string(&state));
    assert_eq!(*b"HYC00\0", state);
    assert_eq!(UNSUPPORTED_ATTRIBUTE, c_string(&message));
    assert_eq!(UNSUPPORTED_ATTRIBUTE.len() as SmallInt, text_len);
    free_env(env);
}

#[test]
fn record_is_stable_across_reads() {
    let env = alloc_env();
    force_env_error(env);
    for _ in 0..2 {
        let (state, message) = get_diag(HandleType::SQL_HANDLE_ENV, env, 1);
        assert_eq!("HYC00", state);
        assert_eq!(UNSUPPORTED_ATTRIBUTE, message);
    }
    free_env(env);
}

#[test]
fn record_number_grid() {
    let env = alloc_env();
    force_env_error(env);

    for (rec_number, expected) in [
        (-10, SqlReturn::ERROR),
        (-1, SqlReturn::ERROR),
        (0, SqlReturn::ERROR),
        (1, SqlReturn::SUCCESS),
        (2, SqlReturn::NO_DATA),
        (3, SqlReturn::NO_DATA),
        (10, SqlReturn::NO_DATA),
        (100, SqlReturn::NO_DATA),
    ] {
        let mut state = [0u8; 6];
        let mut message = [0u8; 100];
        let mut text_len: SmallInt = 0;
        assert_eq!(
            expected,
            SQLGetDiagRec(
                HandleType::SQL_HANDLE_ENV as SmallInt,
                env,
                rec_number,
                state.as_mut_ptr(),
                null_mut(),
                message.as_mut_ptr(),
                message.len() as SmallInt,
                &mut text_len
            ),
            "record {rec_number}"
        );
    }
    free_env(env);
}

#[test]
fn null_message_buffer_still_reports_length() {
    let env = alloc_env();
    force_env_error(env);

    let mut state = [0u8; 6];
    let mut text_len: SmallInt = 0;
    assert_eq!(
        SqlReturn::SUCCESS,
        SQLGetDiagRec(
            HandleType::SQL_HANDLE_ENV as SmallInt,
            env,
            1,
            state.as_mut_ptr(),
            null_mut(),
            null_mut(),
            0,
            &mut text_len
        )
    );
    assert_eq!("HYC00", c_string(&state));
    assert_eq!(UNSUPPORTED_ATTRIBUTE.len() as SmallInt, text_len);
    free_env(env);
}

#[test]
fn truncated_message() {
    let env = alloc_env();
    force_env_error(env);

    let mut state = [0u8; 6];
    let mut message = [0u8; 5];
    let mut text_len: SmallInt = 0;
    assert_eq!(
        SqlReturn::SUCCESS_WITH_INFO,
        SQLGetDiagRec(
            HandleType::SQL_HANDLE_ENV as SmallInt,
            env,
            1,
            state.as_mut_ptr(),
            null_mut(),
            message.as_mut_ptr(),
            message.len() as SmallInt,
            &mut text_len
        )
    );
    assert_eq!("HYC00", c_string(&state));
    assert_eq!("Unsu", c_string(&message));
    // the reported length is always the full message length
    assert_eq!(UNSUPPORTED_ATTRIBUTE.len() as SmallInt, text_len);
    free_env(env);
}

#[test]
fn negative_buffer_length() {
    let env = alloc_env();
    force_env_error(env);

    let mut state = [0u8; 6];
    let mut message = [0u8; 100];
    let mut text_len: SmallInt = 0;
    assert_eq!(
        SqlReturn::ERROR,
        SQLGetDiagRec(
            HandleType::SQL_HANDLE_ENV as SmallInt,
            env,
            1,
            state.as_mut_ptr(),
            null_mut(),
            message.as_mut_ptr(),
            -1,
            &mut text_len
        )
    );
    free_env(env);
}
