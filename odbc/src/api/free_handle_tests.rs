use crate::{api::test_harness::*, SQLFreeHandle};
use definitions::{HandleType, SmallInt, SqlReturn};
use std::ptr::null_mut;

#[test]
fn free_invalid_kind() {
    assert_eq!(SqlReturn::INVALID_HANDLE, SQLFreeHandle(9999, null_mut()));
}

#[test]
fn free_null_handle() {
    for kind in [
        HandleType::SQL_HANDLE_ENV,
        HandleType::SQL_HANDLE_DBC,
        HandleType::SQL_HANDLE_STMT,
        HandleType::SQL_HANDLE_DESC,
    ] {
        assert_eq!(
            SqlReturn::INVALID_HANDLE,
            SQLFreeHandle(kind as SmallInt, null_mut()),
            "{kind:?}"
        );
    }
}

#[test]
fn free_succeeds_exactly_once() {
    let env = alloc_env();
    assert_eq!(
        SqlReturn::SUCCESS,
        SQLFreeHandle(HandleType::SQL_HANDLE_ENV as SmallInt, env)
    );
    assert_eq!(
        SqlReturn::INVALID_HANDLE,
        SQLFreeHandle(HandleType::SQL_HANDLE_ENV as SmallInt, env)
    );
}

#[test]
fn free_kind_mismatch() {
    let env = alloc_env();
    assert_eq!(
        SqlReturn::INVALID_HANDLE,
        SQLFreeHandle(HandleType::SQL_HANDLE_DBC as SmallInt, env)
    );
    free_env(env);
}

#[test]
fn freeing_a_parent_frees_its_descendants() {
    let (env, dbc, stmt) = env_dbc_stmt();
    free_env(env);
    assert_eq!(
        SqlReturn::INVALID_HANDLE,
        SQLFreeHandle(HandleType::SQL_HANDLE_DBC as SmallInt, dbc)
    );
    assert_eq!(
        SqlReturn::INVALID_HANDLE,
        SQLFreeHandle(HandleType::SQL_HANDLE_STMT as SmallInt, stmt)
    );
}

#[test]
fn freeing_a_statement_detaches_it_from_the_connection() {
    let (env, dbc, stmt) = env_dbc_stmt();
    assert_eq!(
        SqlReturn::SUCCESS,
        SQLFreeHandle(HandleType::SQL_HANDLE_STMT as SmallInt, stmt)
    );
    // the connection is still usable afterwards
    let stmt2 = alloc_stmt(dbc);
    assert_eq!(
        SqlReturn::SUCCESS,
        SQLFreeHandle(HandleType::SQL_HANDLE_STMT as SmallInt, stmt2)
    );
    free_env(env);
}
