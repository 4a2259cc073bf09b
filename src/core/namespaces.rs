//! XSD namespace URI constants
//!
//! These constants provide compile-time verified namespace URIs for
//! use throughout the codebase, eliminating string typos and enabling
//! better refactoring support.

/// Standard namespace URI constants
pub mod ns {
    /// XML Schema Datatypes namespace
    pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";

    /// Helper to construct a full URI from namespace and local name
    #[inline]
    pub fn uri(namespace: &str, local: &str) -> String {
        format!("{}{}", namespace, local)
    }

    /// Extract local name from a URI given its namespace
    #[inline]
    pub fn local_name<'a>(uri: &'a str, namespace: &str) -> Option<&'a str> {
        uri.strip_prefix(namespace)
    }
}
