use lazy_static::lazy_static;

pub const DRIVER_NAME: &str = "kom2";
pub const DBMS_NAME: &str = "inventree";

// Diagnostic record origins, fixed for every record this driver produces.
pub const DIAG_CLASS_ORIGIN: &str = "ISO 9075";
pub const DIAG_SUBCLASS_ORIGIN: &str = "ODBC 3.0";

// SQL states
pub const NOT_IMPLEMENTED: &str = "HYC00";
pub const GENERAL_ERROR: &str = "HY000";
pub const UNABLE_TO_CONNECT: &str = "08001";
pub const SYNTAX_ERROR: &str = "42000";
pub const INVALID_DESCRIPTOR_INDEX: &str = "07009";

lazy_static! {
    /// Version string reported by `VersionInfo`. The three fields are stamped
    /// by the release build via environment variables and fall back to the
    /// development placeholder `dev ? ?`.
    pub static ref DRIVER_VERSION: String = format!(
        "{} {} {}",
        option_env!("KOM2_VERSION").unwrap_or("dev"),
        option_env!("KOM2_COMMIT").unwrap_or("?"),
        option_env!("KOM2_DATE").unwrap_or("?"),
    );
}
