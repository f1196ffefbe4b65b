use crate::handles::definitions::*;
use definitions::HandleType;

#[test]
fn identifiers_are_never_reused() {
    let first = register(Kom2Handle::Env(Env::new()));
    free(HandleType::SQL_HANDLE_ENV, first).unwrap();
    let second = register(Kom2Handle::Env(Env::new()));
    assert_ne!(first, second);
    free(HandleType::SQL_HANDLE_ENV, second).unwrap();
}

#[test]
fn lookup_checks_the_kind() {
    let env = register(Kom2Handle::Env(Env::new()));
    assert!(lookup_as(HandleType::SQL_HANDLE_ENV, env).is_some());
    assert!(lookup_as(HandleType::SQL_HANDLE_DBC, env).is_none());
    free(HandleType::SQL_HANDLE_ENV, env).unwrap();
}

#[test]
fn null_id_never_resolves() {
    assert!(lookup(NULL_HANDLE_ID).is_none());
}

#[test]
fn free_is_recursive() {
    let env = register(Kom2Handle::Env(Env::new()));
    let dbc = register(Kom2Handle::Connection(Connection::new(env)));
    let stmt = register(Kom2Handle::Statement(Statement::new(dbc)));
    {
        let env_handle = lookup(env).unwrap();
        env_handle
            .as_env()
            .unwrap()
            .connections
            .write()
            .unwrap()
            .insert(dbc);
        let dbc_handle = lookup(dbc).unwrap();
        dbc_handle
            .as_connection()
            .unwrap()
            .statements
            .write()
            .unwrap()
            .insert(stmt);
    }

    free(HandleType::SQL_HANDLE_ENV, env).unwrap();
    assert!(lookup(env).is_none());
    assert!(lookup(dbc).is_none());
    assert!(lookup(stmt).is_none());
}

#[test]
fn double_free_fails() {
    let env = register(Kom2Handle::Env(Env::new()));
    free(HandleType::SQL_HANDLE_ENV, env).unwrap();
    assert!(free(HandleType::SQL_HANDLE_ENV, env).is_err());
}

#[test]
fn diagnostics_observe_push_order() {
    use crate::api::errors::ODBCError;
    let env = register(Kom2Handle::Env(Env::new()));
    let handle = lookup(env).unwrap();
    handle.add_diag_info(ODBCError::Unimplemented("SQLDrivers"));
    handle.add_diag_info(ODBCError::UnsupportedAttribute);
    {
        let errors = handle.errors().read().unwrap();
        assert_eq!(2, errors.len());
        assert_eq!(
            "The feature SQLDrivers is not implemented",
            format!("{}", errors[0])
        );
        assert_eq!("Unsupported attribute", format!("{}", errors[1]));
    }
    handle.clear_diagnostics();
    assert!(handle.errors().read().unwrap().is_empty());
    free(HandleType::SQL_HANDLE_ENV, env).unwrap();
}
