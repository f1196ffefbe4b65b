use crate::{api::test_harness::*, SQLConnect, SQLDriverConnect};
use definitions::{HDbc, Handle, HandleType, SmallInt, SqlReturn};
use std::ptr::null_mut;

fn driver_connect(dbc: Handle, connection_string: &str) -> SqlReturn {
    SQLDriverConnect(
        dbc as HDbc,
        null_mut(),
        connection_string.as_ptr(),
        connection_string.len() as SmallInt,
        null_mut(),
        0,
        null_mut(),
        0,
    )
}

#[test]
fn connect_invalid_handle() {
    assert_eq!(
        SqlReturn::INVALID_HANDLE,
        SQLConnect(null_mut(), null_mut(), 0, null_mut(), 0, null_mut(), 0)
    );
}

#[test]
fn driver_connect_invalid_handle() {
    assert_eq!(
        SqlReturn::INVALID_HANDLE,
        SQLDriverConnect(
            null_mut(),
            null_mut(),
            null_mut(),
            0,
            null_mut(),
            0,
            null_mut(),
            0
        )
    );
}

#[test]
fn connect_without_server() {
    let env = alloc_env();
    let dbc = alloc_dbc(env);
    assert_eq!(SqlReturn::ERROR, driver_connect(dbc, "Driver=kom2"));
    let (state, message) = get_diag(HandleType::SQL_HANDLE_DBC, dbc, 1);
    assert_eq!("08001", state);
    assert!(message.contains("No Server specified"), "{message}");
    free_env(env);
}

#[test]
fn connect_without_credentials() {
    let env = alloc_env();
    let dbc = alloc_dbc(env);
    assert_eq!(
        SqlReturn::ERROR,
        driver_connect(dbc, "Driver=kom2;server=asdf")
    );
    let (state, message) = get_diag(HandleType::SQL_HANDLE_DBC, dbc, 1);
    assert_eq!("08001", state);
    assert!(
        message.contains("No APIToken or Username+Password specified"),
        "{message}"
    );
    free_env(env);
}

#[test]
fn connect_invalid_server() {
    let env = alloc_env();
    let dbc = alloc_dbc(env);
    assert_eq!(
        SqlReturn::ERROR,
        driver_connect(dbc, "Driver=kom2;server=asdf://asdf;apitoken=asdf")
    );
    let (state, message) = get_diag(HandleType::SQL_HANDLE_DBC, dbc, 1);
    assert_eq!("08001", state);
    assert!(message.contains("Error updating category list"), "{message}");
    free_env(env);
}

#[test]
fn connect_invalid_http_timeout() {
    let env = alloc_env();
    let dbc = alloc_dbc(env);
    assert_eq!(
        SqlReturn::ERROR,
        driver_connect(dbc, "server=http://x;apitoken=t;httptimeout=soon")
    );
    let (state, _message) = get_diag(HandleType::SQL_HANDLE_DBC, dbc, 1);
    assert_eq!("08001", state);
    free_env(env);
}

#[test]
fn connect_failure_reaches_the_log_file() {
    let path = std::env::temp_dir().join(format!("kom2_connect_{}.log", std::process::id()));
    std::fs::remove_file(&path).unwrap_or_default();

    let env = alloc_env();
    let dbc = alloc_dbc(env);
    assert_eq!(
        SqlReturn::ERROR,
        driver_connect(dbc, &format!("Driver=kom2;logfile={}", path.display()))
    );
    let (state, message) = get_diag(HandleType::SQL_HANDLE_DBC, dbc, 1);
    assert_eq!("08001", state);
    assert!(message.contains("No Server specified"), "{message}");

    let content = std::fs::read_to_string(&path).unwrap();
    let logged = content.lines().any(|line| {
        let entry: serde_json::Value = serde_json::from_str(line).unwrap();
        entry["error"]
            .as_str()
            .is_some_and(|error| error.contains("No Server specified"))
    });
    assert!(logged, "{content}");

    std::fs::remove_file(&path).unwrap();
    free_env(env);
}

#[test]
fn unopenable_log_file_does_not_mask_the_diagnostic() {
    let env = alloc_env();
    let dbc = alloc_dbc(env);
    assert_eq!(
        SqlReturn::ERROR,
        driver_connect(dbc, "Driver=kom2;logfile=/does/not/exist/kom2.log")
    );
    let (state, message) = get_diag(HandleType::SQL_HANDLE_DBC, dbc, 1);
    assert_eq!("08001", state);
    assert!(message.contains("No Server specified"), "{message}");
    free_env(env);
}
