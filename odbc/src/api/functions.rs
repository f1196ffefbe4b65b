use crate::{
    api::{
        data::{cell_to_i64, cell_to_string, i16_len, i32_len, isize_len, ptr_safe_write},
        diag,
        errors::ODBCError,
        util::{any_handle, input_text_to_string, unsupported_function},
    },
    handles::definitions::{
        self as handles, BoundColInfo, BoundParamInfo, Connection, Descriptor, Env, HandleId,
        Kom2Handle, Statement, NULL_HANDLE_ID,
    },
};
use constants::DRIVER_VERSION;
use definitions::{
    AttrOdbcVersion, CDataType, Char, DiagType, EnvironmentAttribute, FreeStmtOption, HDbc, HEnv,
    HStmt, HWnd, Handle, HandleType, Integer, Len, Pointer, SmallInt, SqlReturn,
    StatementAttribute, ULen, USmallInt, SQL_NULL_DATA,
};
use kom2_core::{
    parse_select, CategoryIndex, CategoryTables, InventreeConnection, InventreeStatement, Kom2Uri,
    PartsQuery, TableColumns,
};
use num_traits::FromPrimitive;
use serde_json::Value;
use std::sync::Arc;

const NULL_HANDLE_ERROR: &str = "handle cannot be null";
const HANDLE_MUST_BE_ENV_ERROR: &str = "handle must be env";
const HANDLE_MUST_BE_CONN_ERROR: &str = "handle must be conn";
const UNKNOWN_HANDLE_KIND_ERROR: &str = "unknown handle kind";

/// Pseudo descriptor handle reported through SQLGetStmtAttr so client
/// libraries that hold on to implicit descriptors keep working without the
/// driver implementing real ones.
const IMPLICIT_DESC_SENTINEL: ULen = 0xDEADBEEF;

macro_rules! must_be_valid {
    ($maybe_handle:expr) => {{
        // force the expression
        let maybe_handle = $maybe_handle;
        match maybe_handle {
            Some(handle) => handle,
            None => return SqlReturn::INVALID_HANDLE,
        }
    }};
}

macro_rules! odbc_unwrap {
    ($value:expr, $handle:expr) => {{
        // force the expression
        let value = $value;
        match value {
            Ok(value) => value,
            Err(error) => {
                $handle.add_diag_info(error.into());
                return SqlReturn::ERROR;
            }
        }
    }};
}

fn env_from(handle: HEnv) -> Option<Arc<Kom2Handle>> {
    handles::lookup_as(HandleType::SQL_HANDLE_ENV, handle as HandleId)
}

fn conn_from(handle: HDbc) -> Option<Arc<Kom2Handle>> {
    handles::lookup_as(HandleType::SQL_HANDLE_DBC, handle as HandleId)
}

fn stmt_from(handle: HStmt) -> Option<Arc<Kom2Handle>> {
    handles::lookup_as(HandleType::SQL_HANDLE_STMT, handle as HandleId)
}

#[no_mangle]
pub extern "C" fn SQLAllocHandle(
    handle_type: SmallInt,
    input_handle: Handle,
    output_handle: *mut Handle,
) -> SqlReturn {
    match sql_alloc_handle(handle_type, input_handle as HandleId) {
        Ok(id) => {
            unsafe { ptr_safe_write(output_handle, id as Handle) };
            SqlReturn::SUCCESS
        }
        Err(_) => {
            // the kind-specific null constants all share the null id
            unsafe { ptr_safe_write(output_handle, NULL_HANDLE_ID as Handle) };
            SqlReturn::ERROR
        }
    }
}

fn sql_alloc_handle(handle_type: SmallInt, input_handle: HandleId) -> Result<HandleId, ODBCError> {
    match FromPrimitive::from_i16(handle_type) {
        Some(HandleType::SQL_HANDLE_ENV) => {
            // an environment has no parent
            if input_handle != NULL_HANDLE_ID {
                return Err(ODBCError::InvalidHandleType(HANDLE_MUST_BE_ENV_ERROR));
            }
            Ok(handles::register(Kom2Handle::Env(Env::new())))
        }
        Some(HandleType::SQL_HANDLE_DBC) => {
            if input_handle == NULL_HANDLE_ID {
                return Err(ODBCError::InvalidHandleType(NULL_HANDLE_ERROR));
            }
            let parent = handles::lookup_as(HandleType::SQL_HANDLE_ENV, input_handle)
                .ok_or(ODBCError::InvalidHandleType(HANDLE_MUST_BE_ENV_ERROR))?;
            let id = handles::register(Kom2Handle::Connection(Connection::new(input_handle)));
            if let Some(env) = parent.as_env() {
                env.connections.write().unwrap().insert(id);
            }
            Ok(id)
        }
        Some(HandleType::SQL_HANDLE_STMT) => {
            if input_handle == NULL_HANDLE_ID {
                return Err(ODBCError::InvalidHandleType(NULL_HANDLE_ERROR));
            }
            let parent = handles::lookup_as(HandleType::SQL_HANDLE_DBC, input_handle)
                .ok_or(ODBCError::InvalidHandleType(HANDLE_MUST_BE_CONN_ERROR))?;
            let id = handles::register(Kom2Handle::Statement(Statement::new(input_handle)));
            if let Some(conn) = parent.as_connection() {
                conn.statements.write().unwrap().insert(id);
            }
            Ok(id)
        }
        Some(HandleType::SQL_HANDLE_DESC) => {
            if input_handle == NULL_HANDLE_ID {
                return Err(ODBCError::InvalidHandleType(NULL_HANDLE_ERROR));
            }
            let parent = handles::lookup_as(HandleType::SQL_HANDLE_DBC, input_handle)
                .ok_or(ODBCError::InvalidHandleType(HANDLE_MUST_BE_CONN_ERROR))?;
            let id = handles::register(Kom2Handle::Descriptor(Descriptor::new(input_handle)));
            if let Some(conn) = parent.as_connection() {
                conn.descriptors.write().unwrap().insert(id);
            }
            Ok(id)
        }
        None => Err(ODBCError::InvalidHandleType(UNKNOWN_HANDLE_KIND_ERROR)),
    }
}

#[no_mangle]
pub extern "C" fn SQLFreeHandle(handle_type: SmallInt, handle: Handle) -> SqlReturn {
    let handle_type = match FromPrimitive::from_i16(handle_type) {
        Some(handle_type) => handle_type,
        None => return SqlReturn::INVALID_HANDLE,
    };
    match handles::free(handle_type, handle as HandleId) {
        Ok(()) => SqlReturn::SUCCESS,
        Err(()) => SqlReturn::INVALID_HANDLE,
    }
}

#[no_mangle]
pub extern "C" fn SQLGetDiagRec(
    handle_type: SmallInt,
    handle: Handle,
    rec_number: SmallInt,
    state: *mut Char,
    native_error_ptr: *mut Integer,
    message_text: *mut Char,
    buffer_length: SmallInt,
    text_length_ptr: *mut SmallInt,
) -> SqlReturn {
    let handle_type: HandleType = must_be_valid!(FromPrimitive::from_i16(handle_type));
    let handle = must_be_valid!(handles::lookup_as(handle_type, handle as HandleId));
    let errors = handle.errors().read().unwrap();
    if errors.is_empty() {
        unsafe {
            diag::zero_diag_outputs(
                state,
                message_text,
                buffer_length,
                text_length_ptr,
                native_error_ptr,
            )
        };
        return SqlReturn::NO_DATA;
    }
    if rec_number < 1 || buffer_length < 0 {
        return SqlReturn::ERROR;
    }
    let error = match errors.get(rec_number as usize - 1) {
        Some(error) => error,
        None => {
            unsafe {
                diag::zero_diag_outputs(
                    state,
                    message_text,
                    buffer_length,
                    text_length_ptr,
                    native_error_ptr,
                )
            };
            return SqlReturn::NO_DATA;
        }
    };
    unsafe {
        diag::get_diag_rec(
            error,
            state,
            message_text,
            buffer_length,
            text_length_ptr,
            native_error_ptr,
        )
    }
}

#[no_mangle]
pub extern "C" fn SQLGetDiagField(
    handle_type: SmallInt,
    handle: Handle,
    rec_number: SmallInt,
    diag_identifier: SmallInt,
    diag_info_ptr: Pointer,
    buffer_length: SmallInt,
    string_length_ptr: *mut SmallInt,
) -> SqlReturn {
    let handle_type: HandleType = must_be_valid!(FromPrimitive::from_i16(handle_type));
    let handle = must_be_valid!(handles::lookup_as(handle_type, handle as HandleId));
    let identifier: Option<DiagType> = FromPrimitive::from_i16(diag_identifier);
    let errors = handle.errors().read().unwrap();
    // SQL_DIAG_NUMBER is a header field, valid for any record number
    if identifier == Some(DiagType::SQL_DIAG_NUMBER) {
        unsafe { ptr_safe_write(diag_info_ptr as *mut Integer, errors.len() as Integer) };
        return SqlReturn::SUCCESS;
    }
    if errors.is_empty() || (rec_number >= 1 && rec_number as usize > errors.len()) {
        return SqlReturn::NO_DATA;
    }
    if rec_number < 1 {
        return SqlReturn::ERROR;
    }
    let identifier = match identifier {
        Some(identifier) => identifier,
        None => return SqlReturn::ERROR,
    };
    let error = &errors[rec_number as usize - 1];
    unsafe {
        diag::get_diag_field(
            error,
            identifier,
            diag_info_ptr,
            buffer_length,
            string_length_ptr,
        )
    }
}

#[no_mangle]
pub extern "C" fn SQLSetEnvAttr(
    environment_handle: HEnv,
    attribute: Integer,
    value: Pointer,
    _string_length: Integer,
) -> SqlReturn {
    let env_handle = must_be_valid!(env_from(environment_handle));
    let env = must_be_valid!(env_handle.as_env());
    env_handle.clear_diagnostics();
    match FromPrimitive::from_i32(attribute) {
        Some(EnvironmentAttribute::SQL_ATTR_ODBC_VERSION) => {
            if let Some(version) = AttrOdbcVersion::from_u32(value as u32) {
                env.attributes.write().unwrap().odbc_ver = version;
            }
            SqlReturn::SUCCESS
        }
        Some(EnvironmentAttribute::SQL_ATTR_OUTPUT_NTS) => SqlReturn::SUCCESS,
        _ => {
            env_handle.add_diag_info(ODBCError::UnsupportedAttribute);
            SqlReturn::ERROR
        }
    }
}

#[no_mangle]
pub extern "C" fn SQLGetEnvAttr(
    environment_handle: HEnv,
    attribute: Integer,
    value: Pointer,
    _buffer_length: Integer,
    string_length_ptr: *mut Integer,
) -> SqlReturn {
    let env_handle = must_be_valid!(env_from(environment_handle));
    let env = must_be_valid!(env_handle.as_env());
    env_handle.clear_diagnostics();
    match FromPrimitive::from_i32(attribute) {
        Some(EnvironmentAttribute::SQL_ATTR_ODBC_VERSION) => {
            let version = env.attributes.read().unwrap().odbc_ver;
            unsafe { i32_len::set_output_fixed_data(&(version as Integer), value, string_length_ptr) }
        }
        Some(EnvironmentAttribute::SQL_ATTR_OUTPUT_NTS) => unsafe {
            i32_len::set_output_fixed_data(&1i32, value, string_length_ptr)
        },
        _ => {
            env_handle.add_diag_info(ODBCError::UnsupportedAttribute);
            SqlReturn::ERROR
        }
    }
}

#[no_mangle]
pub extern "C" fn SQLDriverConnect(
    connection_handle: HDbc,
    _window_handle: HWnd,
    in_connection_string: *const Char,
    string_length_1: SmallInt,
    out_connection_string: *mut Char,
    buffer_length: SmallInt,
    string_length_2: *mut SmallInt,
    _driver_completion: USmallInt,
) -> SqlReturn {
    let conn_handle = must_be_valid!(conn_from(connection_handle));
    let conn = must_be_valid!(conn_handle.as_connection());
    conn_handle.clear_diagnostics();
    let uri_string =
        unsafe { input_text_to_string(in_connection_string, string_length_1 as Integer) };
    let uri = Kom2Uri::parse(&uri_string);
    // the log sink is attached before any validation so that even a
    // connection string with no server reaches the log
    if let Some(path) = uri.logfile() {
        *conn.logger.write().unwrap() = logger::FileLogger::open(path);
    }
    let connection = odbc_unwrap!(sql_driver_connect(uri), conn_handle);
    *conn.connection.write().unwrap() = Some(connection);
    unsafe {
        i16_len::set_output_string_total(
            &uri_string,
            out_connection_string,
            buffer_length.max(0) as usize,
            string_length_2,
        );
    }
    SqlReturn::SUCCESS
}

fn sql_driver_connect(uri: Kom2Uri) -> kom2_core::Result<InventreeConnection> {
    let options = uri.into_options()?;
    InventreeConnection::connect(&options)
}

#[no_mangle]
pub extern "C" fn SQLConnect(
    connection_handle: HDbc,
    _server_name: *const Char,
    _name_length_1: SmallInt,
    _user_name: *const Char,
    _name_length_2: SmallInt,
    _authentication: *const Char,
    _name_length_3: SmallInt,
) -> SqlReturn {
    // DSN-based connections go through the driver manager, which rewrites
    // them into SQLDriverConnect calls
    unsupported_function(conn_from(connection_handle), "SQLConnect")
}

#[no_mangle]
pub extern "C" fn SQLDisconnect(connection_handle: HDbc) -> SqlReturn {
    let conn_handle = must_be_valid!(conn_from(connection_handle));
    let conn = must_be_valid!(conn_handle.as_connection());
    // dropping the connection closes the HTTP client
    *conn.connection.write().unwrap() = None;
    SqlReturn::SUCCESS
}

#[no_mangle]
pub extern "C" fn SQLPrepare(
    statement_handle: HStmt,
    statement_text: *const Char,
    text_length: Integer,
) -> SqlReturn {
    let stmt_handle = must_be_valid!(stmt_from(statement_handle));
    let stmt = must_be_valid!(stmt_handle.as_statement());
    stmt_handle.clear_diagnostics();
    let sql = unsafe { input_text_to_string(statement_text, text_length) };
    let query = odbc_unwrap!(parse_select(&sql).map_err(ODBCError::Core), stmt_handle);
    *stmt.prepared.write().unwrap() = Some(query);
    SqlReturn::SUCCESS
}

#[no_mangle]
pub extern "C" fn SQLExecute(statement_handle: HStmt) -> SqlReturn {
    let stmt_handle = must_be_valid!(stmt_from(statement_handle));
    let stmt = must_be_valid!(stmt_handle.as_statement());
    stmt_handle.clear_diagnostics();
    let query = match stmt.prepared.read().unwrap().clone() {
        Some(query) => query,
        None => {
            stmt_handle.add_diag_info(ODBCError::NoPreparedStatement);
            return SqlReturn::ERROR;
        }
    };
    // a failed execute leaves no result set behind
    *stmt.statement.write().unwrap() = None;
    let conn_handle = must_be_valid!(handles::lookup_as(
        HandleType::SQL_HANDLE_DBC,
        stmt.connection
    ));
    let conn = must_be_valid!(conn_handle.as_connection());
    let connection = conn.connection.read().unwrap();
    let connection = match &*connection {
        Some(connection) => connection,
        None => {
            stmt_handle.add_diag_info(ODBCError::ConnectionNotOpen);
            return SqlReturn::ERROR;
        }
    };
    let result = odbc_unwrap!(PartsQuery::execute(connection, &query), stmt_handle);
    *stmt.statement.write().unwrap() = Some(Box::new(result));
    SqlReturn::SUCCESS
}

#[no_mangle]
pub extern "C" fn SQLExecDirect(
    statement_handle: HStmt,
    statement_text: *const Char,
    text_length: Integer,
) -> SqlReturn {
    let prepared = SQLPrepare(statement_handle, statement_text, text_length);
    if prepared != SqlReturn::SUCCESS {
        return prepared;
    }
    SQLExecute(statement_handle)
}

#[no_mangle]
pub extern "C" fn SQLNumResultCols(
    statement_handle: HStmt,
    column_count_ptr: *mut SmallInt,
) -> SqlReturn {
    let stmt_handle = must_be_valid!(stmt_from(statement_handle));
    let stmt = must_be_valid!(stmt_handle.as_statement());
    let statement = stmt.statement.read().unwrap();
    let count = statement
        .as_ref()
        .map(|s| s.get_resultset_metadata().len())
        .unwrap_or(0);
    unsafe { ptr_safe_write(column_count_ptr, count as SmallInt) };
    SqlReturn::SUCCESS
}

#[no_mangle]
pub extern "C" fn SQLDescribeCol(
    statement_handle: HStmt,
    column_number: USmallInt,
    col_name: *mut Char,
    buffer_length: SmallInt,
    name_length_ptr: *mut SmallInt,
    data_type_ptr: *mut SmallInt,
    column_size_ptr: *mut ULen,
    decimal_digits_ptr: *mut SmallInt,
    nullable_ptr: *mut SmallInt,
) -> SqlReturn {
    let stmt_handle = must_be_valid!(stmt_from(statement_handle));
    let stmt = must_be_valid!(stmt_handle.as_statement());
    let statement = stmt.statement.read().unwrap();
    let column = statement.as_ref().and_then(|s| {
        (column_number as usize)
            .checked_sub(1)
            .and_then(|i| s.get_resultset_metadata().get(i))
            .cloned()
    });
    let column = match column {
        Some(column) => column,
        None => {
            drop(statement);
            stmt_handle.add_diag_info(ODBCError::InvalidDescriptorIndex(column_number));
            return SqlReturn::ERROR;
        }
    };
    unsafe {
        let ret = i16_len::set_output_string_total(
            &column.col_name,
            col_name,
            buffer_length.max(0) as usize,
            name_length_ptr,
        );
        ptr_safe_write(data_type_ptr, column.sql_type as SmallInt);
        ptr_safe_write(column_size_ptr, column.display_size.unwrap_or(0) as ULen);
        ptr_safe_write(decimal_digits_ptr, column.scale.unwrap_or(0) as SmallInt);
        ptr_safe_write(nullable_ptr, column.nullability as SmallInt);
        ret
    }
}

#[no_mangle]
pub extern "C" fn SQLBindCol(
    statement_handle: HStmt,
    col_number: USmallInt,
    target_type: SmallInt,
    target_value: Pointer,
    buffer_length: Len,
    length_or_indicator: *mut Len,
) -> SqlReturn {
    let stmt_handle = must_be_valid!(stmt_from(statement_handle));
    let stmt = must_be_valid!(stmt_handle.as_statement());
    stmt_handle.clear_diagnostics();
    // a null target unbinds the column
    if target_value.is_null() {
        stmt.bound_cols.write().unwrap().remove(&col_number);
        return SqlReturn::SUCCESS;
    }
    match FromPrimitive::from_i16(target_type) {
        Some(CDataType::SQL_C_CHAR)
        | Some(CDataType::SQL_C_DEFAULT)
        | Some(CDataType::SQL_C_SLONG)
        | Some(CDataType::SQL_C_SBIGINT) => {}
        _ => {
            stmt_handle.add_diag_info(ODBCError::UnsupportedTargetType(target_type));
            return SqlReturn::ERROR;
        }
    }
    stmt.bound_cols.write().unwrap().insert(
        col_number,
        BoundColInfo {
            target_type,
            target_buffer: target_value,
            buffer_length,
            length_or_indicator,
        },
    );
    SqlReturn::SUCCESS
}

unsafe fn write_cell(value: Option<&Value>, binding: &BoundColInfo) -> SqlReturn {
    let value = match value {
        Some(value) => value,
        None => {
            ptr_safe_write(binding.length_or_indicator, SQL_NULL_DATA);
            return SqlReturn::SUCCESS;
        }
    };
    match FromPrimitive::from_i16(binding.target_type) {
        Some(CDataType::SQL_C_SLONG) => isize_len::set_output_fixed_data(
            &(cell_to_i64(value) as i32),
            binding.target_buffer,
            binding.length_or_indicator,
        ),
        Some(CDataType::SQL_C_SBIGINT) => isize_len::set_output_fixed_data(
            &cell_to_i64(value),
            binding.target_buffer,
            binding.length_or_indicator,
        ),
        // SQL_C_CHAR and SQL_C_DEFAULT fall back to text
        _ => isize_len::set_output_string(
            &cell_to_string(value),
            binding.target_buffer as *mut Char,
            binding.buffer_length.max(0) as usize,
            binding.length_or_indicator,
        ),
    }
}

#[no_mangle]
pub extern "C" fn SQLFetch(statement_handle: HStmt) -> SqlReturn {
    let stmt_handle = must_be_valid!(stmt_from(statement_handle));
    let stmt = must_be_valid!(stmt_handle.as_statement());
    stmt_handle.clear_diagnostics();
    let mut statement = stmt.statement.write().unwrap();
    let statement = match statement.as_mut() {
        Some(statement) => statement,
        None => {
            drop(statement);
            stmt_handle.add_diag_info(ODBCError::NoResultSet);
            return SqlReturn::ERROR;
        }
    };
    match statement.next() {
        Ok(true) => {}
        Ok(false) => return SqlReturn::NO_DATA,
        Err(error) => {
            stmt_handle.add_diag_info(ODBCError::Core(error));
            return SqlReturn::ERROR;
        }
    }
    let mut ret = SqlReturn::SUCCESS;
    for (col_number, binding) in stmt.bound_cols.read().unwrap().iter() {
        let value = match statement.get_value(*col_number) {
            Ok(value) => value,
            Err(error) => {
                stmt_handle.add_diag_info(ODBCError::Core(error));
                return SqlReturn::ERROR;
            }
        };
        if unsafe { write_cell(value.as_ref(), binding) } == SqlReturn::SUCCESS_WITH_INFO {
            ret = SqlReturn::SUCCESS_WITH_INFO;
        }
    }
    ret
}

#[no_mangle]
pub extern "C" fn SQLGetData(
    statement_handle: HStmt,
    col_or_param_num: USmallInt,
    target_type: SmallInt,
    target_value_ptr: Pointer,
    buffer_length: Len,
    str_len_or_ind_ptr: *mut Len,
) -> SqlReturn {
    let stmt_handle = must_be_valid!(stmt_from(statement_handle));
    let stmt = must_be_valid!(stmt_handle.as_statement());
    let statement = stmt.statement.read().unwrap();
    let value = match statement.as_ref() {
        Some(statement) => {
            let columns = statement.get_resultset_metadata().len();
            if col_or_param_num == 0 || col_or_param_num as usize > columns {
                stmt_handle.add_diag_info(ODBCError::InvalidDescriptorIndex(col_or_param_num));
                return SqlReturn::ERROR;
            }
            match statement.get_value(col_or_param_num) {
                Ok(value) => value,
                Err(error) => {
                    stmt_handle.add_diag_info(ODBCError::Core(error));
                    return SqlReturn::ERROR;
                }
            }
        }
        None => {
            stmt_handle.add_diag_info(ODBCError::NoResultSet);
            return SqlReturn::ERROR;
        }
    };
    let binding = BoundColInfo {
        target_type,
        target_buffer: target_value_ptr,
        buffer_length,
        length_or_indicator: str_len_or_ind_ptr,
    };
    match FromPrimitive::from_i16(target_type) {
        Some(CDataType::SQL_C_CHAR)
        | Some(CDataType::SQL_C_DEFAULT)
        | Some(CDataType::SQL_C_SLONG)
        | Some(CDataType::SQL_C_SBIGINT) => unsafe { write_cell(value.as_ref(), &binding) },
        _ => {
            stmt_handle.add_diag_info(ODBCError::UnsupportedTargetType(target_type));
            SqlReturn::ERROR
        }
    }
}

#[no_mangle]
pub extern "C" fn SQLRowCount(statement_handle: HStmt, row_count_ptr: *mut Len) -> SqlReturn {
    let stmt_handle = must_be_valid!(stmt_from(statement_handle));
    let stmt = must_be_valid!(stmt_handle.as_statement());
    let statement = stmt.statement.read().unwrap();
    let rows = statement.as_ref().map(|s| s.num_rows()).unwrap_or(0);
    unsafe { ptr_safe_write(row_count_ptr, rows as Len) };
    SqlReturn::SUCCESS
}

#[no_mangle]
pub extern "C" fn SQLTables(
    statement_handle: HStmt,
    _catalog_name: *const Char,
    _name_length_1: SmallInt,
    _schema_name: *const Char,
    _name_length_2: SmallInt,
    table_name: *const Char,
    name_length_3: SmallInt,
    _table_type: *const Char,
    _name_length_4: SmallInt,
) -> SqlReturn {
    let stmt_handle = must_be_valid!(stmt_from(statement_handle));
    let stmt = must_be_valid!(stmt_handle.as_statement());
    stmt_handle.clear_diagnostics();
    let table = unsafe { input_text_to_string(table_name, name_length_3 as Integer) };
    let filter = (!table.is_empty()).then_some(table.as_str());
    let conn_handle = must_be_valid!(handles::lookup_as(
        HandleType::SQL_HANDLE_DBC,
        stmt.connection
    ));
    let conn = must_be_valid!(conn_handle.as_connection());
    let connection = conn.connection.read().unwrap();
    let tables = match &*connection {
        Some(connection) => CategoryTables::list_tables(&connection.categories, filter),
        // without a connection there is no category forest to enumerate
        None => CategoryTables::list_tables(&CategoryIndex::default(), filter),
    };
    *stmt.statement.write().unwrap() = Some(Box::new(tables));
    SqlReturn::SUCCESS
}

#[no_mangle]
pub extern "C" fn SQLColumns(
    statement_handle: HStmt,
    _catalog_name: *const Char,
    _name_length_1: SmallInt,
    _schema_name: *const Char,
    _name_length_2: SmallInt,
    table_name: *const Char,
    name_length_3: SmallInt,
    _column_name: *const Char,
    _name_length_4: SmallInt,
) -> SqlReturn {
    let stmt_handle = must_be_valid!(stmt_from(statement_handle));
    let stmt = must_be_valid!(stmt_handle.as_statement());
    stmt_handle.clear_diagnostics();
    let table = unsafe { input_text_to_string(table_name, name_length_3 as Integer) };
    *stmt.statement.write().unwrap() = Some(Box::new(TableColumns::list_columns(&table)));
    SqlReturn::SUCCESS
}

#[no_mangle]
pub extern "C" fn SQLBindParameter(
    statement_handle: HStmt,
    parameter_number: USmallInt,
    input_output_type: SmallInt,
    value_type: SmallInt,
    _parameter_type: SmallInt,
    _column_size: ULen,
    _decimal_digits: SmallInt,
    parameter_value_ptr: Pointer,
    buffer_length: Len,
    _str_len_or_ind_ptr: *mut Len,
) -> SqlReturn {
    let stmt_handle = must_be_valid!(stmt_from(statement_handle));
    let stmt = must_be_valid!(stmt_handle.as_statement());
    stmt_handle.clear_diagnostics();
    if FromPrimitive::from_i16(input_output_type)
        != Some(definitions::ParamType::SQL_PARAM_INPUT)
    {
        stmt_handle.add_diag_info(ODBCError::UnsupportedParamDirection(input_output_type));
        return SqlReturn::ERROR;
    }
    if FromPrimitive::from_i16(value_type) != Some(CDataType::SQL_C_CHAR) {
        stmt_handle.add_diag_info(ODBCError::UnsupportedParamValueType(value_type));
        return SqlReturn::ERROR;
    }
    stmt.bound_params.write().unwrap().insert(
        parameter_number,
        BoundParamInfo {
            value_type,
            buffer: parameter_value_ptr,
            buffer_length,
        },
    );
    SqlReturn::SUCCESS
}

#[no_mangle]
pub extern "C" fn SQLDescribeParam(
    statement_handle: HStmt,
    parameter_number: USmallInt,
    data_type_ptr: *mut SmallInt,
    parameter_size_ptr: *mut ULen,
    decimal_digits_ptr: *mut SmallInt,
    nullable_ptr: *mut SmallInt,
) -> SqlReturn {
    let stmt_handle = must_be_valid!(stmt_from(statement_handle));
    stmt_handle.clear_diagnostics();
    // only a single textual parameter is ever reported
    if parameter_number != 1 {
        stmt_handle.add_diag_info(ODBCError::InvalidDescriptorIndex(parameter_number));
        return SqlReturn::ERROR;
    }
    unsafe {
        ptr_safe_write(
            data_type_ptr,
            definitions::SqlDataType::SQL_VARCHAR as SmallInt,
        );
        ptr_safe_write(parameter_size_ptr, 0);
        ptr_safe_write(decimal_digits_ptr, 0);
        ptr_safe_write(
            nullable_ptr,
            definitions::Nullability::SQL_NO_NULLS as SmallInt,
        );
    }
    SqlReturn::SUCCESS
}

#[no_mangle]
pub extern "C" fn SQLNumParams(
    statement_handle: HStmt,
    param_count_ptr: *mut SmallInt,
) -> SqlReturn {
    let _stmt_handle = must_be_valid!(stmt_from(statement_handle));
    // the dialect has no parameter markers
    unsafe { ptr_safe_write(param_count_ptr, 0) };
    SqlReturn::SUCCESS
}

#[no_mangle]
pub extern "C" fn SQLGetStmtAttr(
    statement_handle: HStmt,
    attribute: Integer,
    value_ptr: Pointer,
    _buffer_length: Integer,
    string_length_ptr: *mut Integer,
) -> SqlReturn {
    let stmt_handle = must_be_valid!(stmt_from(statement_handle));
    match FromPrimitive::from_i32(attribute) {
        Some(StatementAttribute::SQL_ATTR_APP_ROW_DESC)
        | Some(StatementAttribute::SQL_ATTR_APP_PARAM_DESC)
        | Some(StatementAttribute::SQL_ATTR_IMP_ROW_DESC)
        | Some(StatementAttribute::SQL_ATTR_IMP_PARAM_DESC) => {
            unsafe {
                ptr_safe_write(value_ptr as *mut ULen, IMPLICIT_DESC_SENTINEL);
                ptr_safe_write(string_length_ptr, 8);
            }
            SqlReturn::SUCCESS
        }
        _ => {
            stmt_handle.add_diag_info(ODBCError::UnsupportedAttribute);
            SqlReturn::ERROR
        }
    }
}

#[no_mangle]
pub extern "C" fn SQLSetStmtAttr(
    statement_handle: HStmt,
    attribute: Integer,
    _value: Pointer,
    _string_length: Integer,
) -> SqlReturn {
    let stmt_handle = must_be_valid!(stmt_from(statement_handle));
    let attribute: Option<StatementAttribute> = FromPrimitive::from_i32(attribute);
    match attribute {
        // cursor shape attributes are accepted as set; the cursor is always
        // forward-only over a materialized result set
        Some(_) => SqlReturn::SUCCESS,
        None => {
            stmt_handle.add_diag_info(ODBCError::UnsupportedAttribute);
            SqlReturn::ERROR
        }
    }
}

#[no_mangle]
pub extern "C" fn SQLSetConnectAttr(
    connection_handle: HDbc,
    attribute: Integer,
    _value: Pointer,
    _string_length: Integer,
) -> SqlReturn {
    let conn_handle = must_be_valid!(conn_from(connection_handle));
    let attribute: Option<definitions::ConnectionAttribute> = FromPrimitive::from_i32(attribute);
    match attribute {
        Some(_) => SqlReturn::SUCCESS,
        None => {
            conn_handle.add_diag_info(ODBCError::UnsupportedAttribute);
            SqlReturn::ERROR
        }
    }
}

#[no_mangle]
pub extern "C" fn SQLFreeStmt(statement_handle: HStmt, option: SmallInt) -> SqlReturn {
    let stmt_handle = must_be_valid!(stmt_from(statement_handle));
    let stmt = must_be_valid!(stmt_handle.as_statement());
    match FromPrimitive::from_i16(option) {
        Some(FreeStmtOption::SQL_CLOSE) => {
            *stmt.statement.write().unwrap() = None;
            SqlReturn::SUCCESS
        }
        Some(FreeStmtOption::SQL_UNBIND) => {
            stmt.bound_cols.write().unwrap().clear();
            SqlReturn::SUCCESS
        }
        Some(FreeStmtOption::SQL_RESET_PARAMS) => {
            stmt.bound_params.write().unwrap().clear();
            SqlReturn::SUCCESS
        }
        None => {
            stmt_handle.add_diag_info(ODBCError::InvalidFreeStmtOption(option));
            SqlReturn::ERROR
        }
    }
}

#[no_mangle]
pub extern "C" fn SQLCloseCursor(statement_handle: HStmt) -> SqlReturn {
    let stmt_handle = must_be_valid!(stmt_from(statement_handle));
    let stmt = must_be_valid!(stmt_handle.as_statement());
    *stmt.statement.write().unwrap() = None;
    SqlReturn::SUCCESS
}

#[no_mangle]
pub extern "C" fn SQLMoreResults(statement_handle: HStmt) -> SqlReturn {
    let _stmt_handle = must_be_valid!(stmt_from(statement_handle));
    // every execution produces exactly one result set
    SqlReturn::NO_DATA
}

#[no_mangle]
pub extern "C" fn SQLEndTran(
    _handle_type: SmallInt,
    _handle: Handle,
    _completion_type: SmallInt,
) -> SqlReturn {
    // there are no transactions; commit and rollback trivially succeed
    SqlReturn::SUCCESS
}

#[no_mangle]
pub extern "C" fn VersionInfo(buffer: *mut Char, buffer_length: ULen) -> Integer {
    let version = DRIVER_VERSION.as_str();
    unsafe {
        if !buffer.is_null() && buffer_length > 0 {
            let written = std::cmp::min(version.len(), buffer_length - 1);
            std::ptr::copy_nonoverlapping(version.as_ptr(), buffer, written);
            *buffer.add(written) = 0;
        }
    }
    // the reported length includes the NUL terminator
    (version.len() + 1) as Integer
}

#[no_mangle]
pub extern "C" fn SQLColAttribute(
    statement_handle: HStmt,
    _column_number: USmallInt,
    _field_identifier: USmallInt,
    _character_attribute_ptr: Pointer,
    _buffer_length: SmallInt,
    _string_length_ptr: *mut SmallInt,
    _numeric_attribute_ptr: *mut Len,
) -> SqlReturn {
    unsupported_function(
        any_handle(statement_handle as HandleId),
        "SQLColAttribute",
    )
}

#[no_mangle]
pub extern "C" fn SQLGetInfo(
    connection_handle: HDbc,
    _info_type: USmallInt,
    _info_value_ptr: Pointer,
    _buffer_length: SmallInt,
    _string_length_ptr: *mut SmallInt,
) -> SqlReturn {
    unsupported_function(any_handle(connection_handle as HandleId), "SQLGetInfo")
}

#[no_mangle]
pub extern "C" fn SQLGetTypeInfo(statement_handle: HStmt, _data_type: SmallInt) -> SqlReturn {
    unsupported_function(any_handle(statement_handle as HandleId), "SQLGetTypeInfo")
}

#[no_mangle]
pub extern "C" fn SQLSpecialColumns(
    statement_handle: HStmt,
    _identifier_type: SmallInt,
    _catalog_name: *const Char,
    _name_length_1: SmallInt,
    _schema_name: *const Char,
    _name_length_2: SmallInt,
    _table_name: *const Char,
    _name_length_3: SmallInt,
    _scope: SmallInt,
    _nullable: SmallInt,
) -> SqlReturn {
    unsupported_function(
        any_handle(statement_handle as HandleId),
        "SQLSpecialColumns",
    )
}

#[no_mangle]
pub extern "C" fn SQLStatistics(
    statement_handle: HStmt,
    _catalog_name: *const Char,
    _name_length_1: SmallInt,
    _schema_name: *const Char,
    _name_length_2: SmallInt,
    _table_name: *const Char,
    _name_length_3: SmallInt,
    _unique: USmallInt,
    _reserved: USmallInt,
) -> SqlReturn {
    unsupported_function(any_handle(statement_handle as HandleId), "SQLStatistics")
}

#[no_mangle]
pub extern "C" fn SQLPrimaryKeys(
    statement_handle: HStmt,
    _catalog_name: *const Char,
    _name_length_1: SmallInt,
    _schema_name: *const Char,
    _name_length_2: SmallInt,
    _table_name: *const Char,
    _name_length_3: SmallInt,
) -> SqlReturn {
    unsupported_function(any_handle(statement_handle as HandleId), "SQLPrimaryKeys")
}

#[no_mangle]
pub extern "C" fn SQLGetCursorName(
    statement_handle: HStmt,
    _cursor_name: *mut Char,
    _buffer_length: SmallInt,
    _name_length_ptr: *mut SmallInt,
) -> SqlReturn {
    unsupported_function(
        any_handle(statement_handle as HandleId),
        "SQLGetCursorName",
    )
}

#[no_mangle]
pub extern "C" fn SQLSetCursorName(
    statement_handle: HStmt,
    _cursor_name: *const Char,
    _name_length: SmallInt,
) -> SqlReturn {
    unsupported_function(
        any_handle(statement_handle as HandleId),
        "SQLSetCursorName",
    )
}

#[no_mangle]
pub extern "C" fn SQLFetchScroll(
    statement_handle: HStmt,
    _fetch_orientation: SmallInt,
    _fetch_offset: Len,
) -> SqlReturn {
    // the cursor is forward-only
    unsupported_function(any_handle(statement_handle as HandleId), "SQLFetchScroll")
}

#[no_mangle]
pub extern "C" fn SQLNativeSql(
    connection_handle: HDbc,
    _in_statement_text: *const Char,
    _in_statement_len: Integer,
    _out_statement_text: *mut Char,
    _buffer_len: Integer,
    _out_statement_len: *mut Integer,
) -> SqlReturn {
    unsupported_function(any_handle(connection_handle as HandleId), "SQLNativeSql")
}

#[no_mangle]
pub extern "C" fn SQLParamData(statement_handle: HStmt, _value_ptr_ptr: *mut Pointer) -> SqlReturn {
    unsupported_function(any_handle(statement_handle as HandleId), "SQLParamData")
}

#[no_mangle]
pub extern "C" fn SQLPutData(
    statement_handle: HStmt,
    _data_ptr: Pointer,
    _str_len_or_ind_ptr: Len,
) -> SqlReturn {
    unsupported_function(any_handle(statement_handle as HandleId), "SQLPutData")
}
