use mongodb::error::Error as MongoError;
use thiserror::Error;

use crate::dao::storage::StorageError;

/// Result alias for MongoDB-backed storage operations.
pub type MongoResult<T> = std::result::Result<T, MongoDaoError>;

/// Errors raised by the MongoDB storage backend.
#[derive(Debug, Error)]
pub enum MongoDaoError {
    /// The connection URI did not parse.
    #[error("failed to parse MongoDB connection URI `{uri}`")]
    InvalidUri {
        /// The offending URI.
        uri: String,
        /// Driver-level cause.
        #[source]
        source: MongoError,
    },
    /// The client could not be built from the parsed options.
    #[error("failed to build MongoDB client from options")]
    ClientConstruction {
        /// Driver-level cause.
        #[source]
        source: MongoError,
    },
    /// A required environment variable was absent.
    #[error("missing environment variable `{var}`")]
    MissingEnvVar {
        /// Name of the variable.
        var: &'static str,
    },
    /// The connectivity ping failed.
    #[error("MongoDB ping failed")]
    Ping {
        /// Driver-level cause.
        #[source]
        source: MongoError,
    },
    /// Creating a unique index failed.
    #[error("failed to ensure index `{index}` on collection `{collection}`")]
    EnsureIndex {
        /// Target collection.
        collection: &'static str,
        /// Index key description.
        index: &'static str,
        /// Driver-level cause.
        #[source]
        source: MongoError,
    },
    /// A query or write against a collection failed.
    #[error("MongoDB operation `{op}` failed")]
    Query {
        /// Short name of the failing operation.
        op: &'static str,
        /// Driver-level cause.
        #[source]
        source: MongoError,
    },
    /// An entity could not be encoded into a BSON document.
    #[error("failed to encode document for `{op}`")]
    Encode {
        /// Short name of the failing operation.
        op: &'static str,
        /// Serializer-level cause.
        #[source]
        source: mongodb::bson::error::Error,
    },
}

impl From<MongoDaoError> for StorageError {
    fn from(err: MongoDaoError) -> Self {
        StorageError::unavailable(err.to_string(), err)
    }
}
