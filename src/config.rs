/// Maps the logical column roles to the column names expected in the workbook.
///
/// The defaults match the documented schema: sheet "nodes" with `node_id`,
/// `node_label`, `node_color` and sheet "edges" with `source_id`, `target_id`,
/// `weights`. Header comparison is case-sensitive.
#[derive(Debug, Clone)]
pub struct ColumnNames {
    pub id: String,
    pub label: String,
    pub color: String,
    pub source: String,
    pub target: String,
    pub weight: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            id: "node_id".to_string(),
            label: "node_label".to_string(),
            color: "node_color".to_string(),
            source: "source_id".to_string(),
            target: "target_id".to_string(),
            weight: "weights".to_string(),
        }
    }
}

/// Runtime configuration for the web server.
#[cfg(feature = "web")]
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the server binds to.
    pub addr: String,
    /// Directory uploaded workbooks are stored in.
    pub upload_dir: std::path::PathBuf,
}

#[cfg(feature = "web")]
impl Default for AppConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:3000".to_string(),
            upload_dir: std::path::PathBuf::from("uploads"),
        }
    }
}

#[cfg(feature = "web")]
impl AppConfig {
    /// Build a configuration from the environment, falling back to defaults.
    ///
    /// Recognized variables: `NETGRID_ADDR` and `NETGRID_UPLOAD_DIR`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            addr: std::env::var("NETGRID_ADDR").unwrap_or(defaults.addr),
            upload_dir: std::env::var("NETGRID_UPLOAD_DIR")
                .map(std::path::PathBuf::from)
                .unwrap_or(defaults.upload_dir),
        }
    }
}
