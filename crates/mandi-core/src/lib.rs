pub mod app_config;
pub mod categories;
pub mod config;
pub mod geo;
pub mod inventory;
pub mod place;
pub mod user;

pub use app_config::{AppConfig, Environment};
pub use categories::{
    default_categories, load_categories, parse_categories, Category, CategoryCatalog,
};
pub use config::{build_app_config, load_app_config, load_app_config_from_env};
pub use geo::{Bounds, Coordinate, DEFAULT_CENTER, SERVICE_AREA};
pub use inventory::{normalize_inventory, InventoryItem, ItemId, StoredItem};
pub use place::{Address, Place, PlaceId};
pub use user::{Credentials, Role, SignUp, User, UserId, DEMO_BUYER_ID, DEMO_VENDOR_ID};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read categories file {path}: {source}")]
    CategoriesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse categories file: {0}")]
    CategoriesFileParse(#[from] serde_yaml::Error),

    #[error("categories validation failed: {0}")]
    Validation(String),
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid role: {0}")]
    InvalidRole(String),
}
