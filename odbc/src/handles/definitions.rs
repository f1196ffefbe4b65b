use crate::api::errors::ODBCError;
use definitions::{AttrOdbcVersion, HandleType, Len, Pointer, SmallInt, ULen, USmallInt};
use kom2_core::{InventreeConnection, InventreeStatement, SelectQuery};
use lazy_static::lazy_static;
use logger::FileLogger;
use std::{
    collections::{HashMap, HashSet},
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, RwLock,
    },
};

/// Identifier handed across the ABI as an opaque SQLHANDLE. Identifiers are
/// monotonically assigned and never reused; 0 is the null sentinel shared by
/// SQL_NULL_HENV, SQL_NULL_HDBC and SQL_NULL_HSTMT.
pub type HandleId = ULen;

pub const NULL_HANDLE_ID: HandleId = 0;

lazy_static! {
    static ref REGISTRY: RwLock<HashMap<HandleId, Arc<Kom2Handle>>> = RwLock::new(HashMap::new());
}

static NEXT_HANDLE_ID: AtomicUsize = AtomicUsize::new(1);

#[derive(Debug)]
pub enum Kom2Handle {
    Env(Env),
    Connection(Connection),
    Statement(Statement),
    Descriptor(Descriptor),
}

// Raw pointers stored in bound-column descriptors are only dereferenced on
// the caller's thread inside an entry point, and the ODBC contract forbids
// concurrent calls on one statement. Every other mutable field sits behind
// an RwLock.
unsafe impl Send for Kom2Handle {}
unsafe impl Sync for Kom2Handle {}

impl Kom2Handle {
    pub fn as_env(&self) -> Option<&Env> {
        match self {
            Kom2Handle::Env(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_connection(&self) -> Option<&Connection> {
        match self {
            Kom2Handle::Connection(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_statement(&self) -> Option<&Statement> {
        match self {
            Kom2Handle::Statement(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_descriptor(&self) -> Option<&Descriptor> {
        match self {
            Kom2Handle::Descriptor(d) => Some(d),
            _ => None,
        }
    }

    pub fn handle_kind(&self) -> HandleType {
        match self {
            Kom2Handle::Env(_) => HandleType::SQL_HANDLE_ENV,
            Kom2Handle::Connection(_) => HandleType::SQL_HANDLE_DBC,
            Kom2Handle::Statement(_) => HandleType::SQL_HANDLE_STMT,
            Kom2Handle::Descriptor(_) => HandleType::SQL_HANDLE_DESC,
        }
    }

    pub fn errors(&self) -> &RwLock<Vec<ODBCError>> {
        match self {
            Kom2Handle::Env(e) => &e.errors,
            Kom2Handle::Connection(c) => &c.errors,
            Kom2Handle::Statement(s) => &s.errors,
            Kom2Handle::Descriptor(d) => &d.errors,
        }
    }

    /// Appends a new diagnostic record. Records pushed onto a connection are
    /// mirrored into its JSON-lines log when one is attached.
    pub fn add_diag_info(&self, error: ODBCError) {
        if let Kom2Handle::Connection(c) = self {
            if let Some(logger) = &*c.logger.read().unwrap() {
                logger.error(&format!("{error}"));
            }
        }
        log::error!("{error}");
        self.errors().write().unwrap().push(error);
    }

    pub fn clear_diagnostics(&self) {
        self.errors().write().unwrap().clear();
    }
}

#[derive(Debug)]
pub struct Env {
    pub attributes: RwLock<EnvAttributes>,
    pub connections: RwLock<HashSet<HandleId>>,
    pub errors: RwLock<Vec<ODBCError>>,
}

#[derive(Debug)]
pub struct EnvAttributes {
    pub odbc_ver: AttrOdbcVersion,
}

impl Default for EnvAttributes {
    fn default() -> Self {
        Self {
            odbc_ver: AttrOdbcVersion::SQL_OV_ODBC3_80,
        }
    }
}

impl Env {
    pub fn new() -> Self {
        Self {
            attributes: RwLock::new(EnvAttributes::default()),
            connections: RwLock::new(HashSet::new()),
            errors: RwLock::new(vec![]),
        }
    }
}

#[derive(Debug)]
pub struct Connection {
    // the Env this Connection was allocated from
    pub env: HandleId,
    // the live server connection; None until SQLDriverConnect succeeds and
    // again after SQLDisconnect
    pub connection: RwLock<Option<InventreeConnection>>,
    // JSON-lines sink from the logfile connection-string key
    pub logger: RwLock<Option<FileLogger>>,
    pub statements: RwLock<HashSet<HandleId>>,
    pub descriptors: RwLock<HashSet<HandleId>>,
    pub errors: RwLock<Vec<ODBCError>>,
}

impl Connection {
    pub fn new(env: HandleId) -> Self {
        Self {
            env,
            connection: RwLock::new(None),
            logger: RwLock::new(None),
            statements: RwLock::new(HashSet::new()),
            descriptors: RwLock::new(HashSet::new()),
            errors: RwLock::new(vec![]),
        }
    }
}

#[derive(Debug)]
pub struct Statement {
    // the Connection this Statement was allocated from
    pub connection: HandleId,
    // parsed query stored by SQLPrepare
    pub prepared: RwLock<Option<SelectQuery>>,
    // materialized result set after SQLExecute or a metadata function
    pub statement: RwLock<Option<Box<dyn InventreeStatement>>>,
    pub bound_cols: RwLock<HashMap<USmallInt, BoundColInfo>>,
    pub bound_params: RwLock<HashMap<USmallInt, BoundParamInfo>>,
    pub errors: RwLock<Vec<ODBCError>>,
}

impl Statement {
    pub fn new(connection: HandleId) -> Self {
        Self {
            connection,
            prepared: RwLock::new(None),
            statement: RwLock::new(None),
            bound_cols: RwLock::new(HashMap::new()),
            bound_params: RwLock::new(HashMap::new()),
            errors: RwLock::new(vec![]),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BoundColInfo {
    pub target_type: SmallInt,
    pub target_buffer: Pointer,
    pub buffer_length: Len,
    pub length_or_indicator: *mut Len,
}

#[derive(Debug, Clone, Copy)]
pub struct BoundParamInfo {
    pub value_type: SmallInt,
    pub buffer: Pointer,
    pub buffer_length: Len,
}

#[derive(Debug)]
pub struct Descriptor {
    pub connection: HandleId,
    pub errors: RwLock<Vec<ODBCError>>,
}

impl Descriptor {
    pub fn new(connection: HandleId) -> Self {
        Self {
            connection,
            errors: RwLock::new(vec![]),
        }
    }
}

/// Adds a handle to the registry, returning its fresh identifier.
pub fn register(handle: Kom2Handle) -> HandleId {
    let id = NEXT_HANDLE_ID.fetch_add(1, Ordering::Relaxed);
    REGISTRY.write().unwrap().insert(id, Arc::new(handle));
    id
}

pub fn lookup(id: HandleId) -> Option<Arc<Kom2Handle>> {
    REGISTRY.read().unwrap().get(&id).cloned()
}

/// Typed lookup used by the entry points: the id must be live and of the
/// expected kind.
pub fn lookup_as(handle_type: HandleType, id: HandleId) -> Option<Arc<Kom2Handle>> {
    lookup(id).filter(|handle| handle.handle_kind() == handle_type)
}

/// Removes a handle and, depth-first, every descendant. Fails when the id is
/// dead (double free included) or the kind does not match.
pub fn free(handle_type: HandleType, id: HandleId) -> Result<(), ()> {
    let handle = lookup(id).ok_or(())?;
    if handle.handle_kind() != handle_type {
        return Err(());
    }
    // detach from the parent's child set so the parent does not chase a dead id
    match &*handle {
        Kom2Handle::Env(_) => {}
        Kom2Handle::Connection(c) => {
            if let Some(parent) = lookup(c.env) {
                if let Some(env) = parent.as_env() {
                    env.connections.write().unwrap().remove(&id);
                }
            }
        }
        Kom2Handle::Statement(s) => {
            if let Some(parent) = lookup(s.connection) {
                if let Some(conn) = parent.as_connection() {
                    conn.statements.write().unwrap().remove(&id);
                }
            }
        }
        Kom2Handle::Descriptor(d) => {
            if let Some(parent) = lookup(d.connection) {
                if let Some(conn) = parent.as_connection() {
                    conn.descriptors.write().unwrap().remove(&id);
                }
            }
        }
    }
    free_subtree(id);
    Ok(())
}

fn free_subtree(id: HandleId) {
    let handle = match REGISTRY.write().unwrap().remove(&id) {
        Some(handle) => handle,
        None => return,
    };
    let children: Vec<HandleId> = match &*handle {
        Kom2Handle::Env(e) => e.connections.read().unwrap().iter().copied().collect(),
        Kom2Handle::Connection(c) => {
            let statements = c.statements.read().unwrap();
            let descriptors = c.descriptors.read().unwrap();
            statements.iter().chain(descriptors.iter()).copied().collect()
        }
        Kom2Handle::Statement(_) | Kom2Handle::Descriptor(_) => vec![],
    };
    for child in children {
        free_subtree(child);
    }
}
