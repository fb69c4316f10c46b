// Copyright 2026 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Configuration for an export run.
//!
//! Secrets and the bucket name come from the environment and are required.
//! Everything else has a default and can be overridden by an optional YAML
//! file and then by command-line flags.

use crate::domain::errors::{ExportError, Result};
use clap::Parser;
use serde::Deserialize;
use std::collections::HashSet;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

pub const ENV_ORACLE_USERNAME: &str = "ORACLE_USERNAME";
pub const ENV_ORACLE_PASSWORD: &str = "ORACLE_PASSWORD";
pub const ENV_ORACLE_HOST: &str = "ORACLE_HOST";
pub const ENV_ORACLE_PORT: &str = "ORACLE_PORT";
pub const ENV_ORACLE_SERVICE: &str = "ORACLE_SERVICE";
pub const ENV_S3_BUCKET_NAME: &str = "S3_BUCKET_NAME";
pub const ENV_AWS_REGION: &str = "AWS_REGION";
pub const ENV_S3_ENDPOINT_URL: &str = "S3_ENDPOINT_URL";

pub const DEFAULT_SCHEMA: &str = "database.schema";
pub const DEFAULT_OUTPUT_DIR: &str = "/tmp";
pub const DEFAULT_KEY_PREFIX: &str = "s3_";
pub const DEFAULT_PREFETCH_ROWS: u32 = 5000;

/// Tables exported on every run, in extraction order.
pub const DEFAULT_TABLES: [&str; 20] = [
    "ADDRESS",
    "CIRCUIT",
    "CIRCUIT_POSITION",
    "CIRCUIT_POSITION_CONDITION",
    "CIRCUIT_USER_DATA",
    "CIRCUIT_XREF",
    "CONDITION_CODE",
    "CUST_ACCT",
    "EQUIPMENT",
    "EQUIPMENT_SPEC",
    "EQUIPMENT_USER_DATA",
    "MOUNTING_POSITION",
    "MOUNTING_POSITION_CONDITION",
    "NETWORK_LOCATION",
    "NETWORK_NODE",
    "NET_LOC_ADDR",
    "NE_TYPE",
    "PORT_ADDRESS",
    "TRANSMISSION_RATE",
    "USER_DATA_CATEGORY_VALUES",
];

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub export: ExportConfig,
    pub storage: StorageConfig,
}

#[derive(Clone)]
pub struct DatabaseConfig {
    pub username: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub service: String,
    pub prefetch_rows: u32,
}

impl DatabaseConfig {
    /// Easy Connect string: `host:port/service`.
    pub fn get_connection_string(&self) -> String {
        format!("{}:{}/{}", self.host, self.port, self.service)
    }
}

// Hand-written so the password never ends up in a log line.
impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("service", &self.service)
            .field("prefetch_rows", &self.prefetch_rows)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Namespace prefixed to every table in the generated `SELECT`.
    pub schema: String,
    pub tables: Vec<String>,
    pub output_dir: PathBuf,
    pub key_prefix: String,
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub bucket: String,
    pub region: Option<String>,
    /// Custom endpoint (MinIO, LocalStack). `None` means AWS.
    pub endpoint: Option<String>,
}

/// Optional, non-secret overrides read from a YAML file.
#[derive(Debug, Default, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct ExportSettings {
    pub schema: Option<String>,
    pub tables: Option<Vec<String>>,
    pub output_dir: Option<PathBuf>,
    pub key_prefix: Option<String>,
    pub prefetch_rows: Option<u32>,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Path to a YAML file with export settings
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
    #[arg(long)]
    pub schema: Option<String>,
    /// Restrict the run to these tables (repeatable)
    #[arg(long = "table")]
    pub tables: Vec<String>,

    /// Invocation event payload (JSON). Accepted for compatibility, not used.
    #[arg(long)]
    pub event: Option<String>,
}

impl ExportSettings {
    pub fn from_file(path: &str) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        serde_yaml::from_str(&contents)
            .map_err(|e| ExportError::ConfigError(format!("{}: {}", path, e)))
    }

    pub fn merge_cli(&mut self, args: &CliArgs) {
        if let Some(o) = &args.output_dir {
            self.output_dir = Some(o.clone());
        }
        if let Some(s) = &args.schema {
            self.schema = Some(s.clone());
        }
        if !args.tables.is_empty() {
            self.tables = Some(args.tables.clone());
        }
    }
}

impl AppConfig {
    /// Builds and validates the configuration from an arbitrary lookup.
    ///
    /// Every required key is checked before returning, so a single error lists
    /// all of the missing ones. Empty values count as missing.
    pub fn load<F>(lookup: F, settings: &ExportSettings) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut missing = Vec::new();
        let mut require = |key: &str| match lookup(key).filter(|v| !v.trim().is_empty()) {
            Some(v) => v,
            None => {
                missing.push(key.to_string());
                String::new()
            }
        };

        let username = require(ENV_ORACLE_USERNAME);
        let password = require(ENV_ORACLE_PASSWORD);
        let host = require(ENV_ORACLE_HOST);
        let port = require(ENV_ORACLE_PORT);
        let service = require(ENV_ORACLE_SERVICE);
        let bucket = require(ENV_S3_BUCKET_NAME);

        if !missing.is_empty() {
            return Err(ExportError::MissingConfig(missing));
        }

        let port: u16 = port.trim().parse().map_err(|_| {
            ExportError::ConfigError(format!("{} is not a valid port: {}", ENV_ORACLE_PORT, port))
        })?;

        let optional = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let config = Self {
            database: DatabaseConfig {
                username,
                password,
                host,
                port,
                service,
                prefetch_rows: settings.prefetch_rows.unwrap_or(DEFAULT_PREFETCH_ROWS),
            },
            export: ExportConfig {
                schema: settings
                    .schema
                    .clone()
                    .unwrap_or_else(|| DEFAULT_SCHEMA.to_string()),
                tables: settings
                    .tables
                    .clone()
                    .unwrap_or_else(|| DEFAULT_TABLES.iter().map(|t| t.to_string()).collect()),
                output_dir: settings
                    .output_dir
                    .clone()
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
                key_prefix: settings
                    .key_prefix
                    .clone()
                    .unwrap_or_else(|| DEFAULT_KEY_PREFIX.to_string()),
            },
            storage: StorageConfig {
                bucket,
                region: optional(ENV_AWS_REGION),
                endpoint: optional(ENV_S3_ENDPOINT_URL),
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Table names and the schema are spliced into SQL unescaped, so only
    /// plain Oracle identifiers are accepted.
    pub fn validate(&self) -> Result<()> {
        if self.export.tables.is_empty() {
            return Err(ExportError::ConfigError("no tables configured".into()));
        }
        let mut seen = HashSet::new();
        for table in &self.export.tables {
            if !is_plain_identifier(table) {
                return Err(ExportError::ConfigError(format!(
                    "invalid table name: {:?}",
                    table
                )));
            }
            // Each table owns one extract file and one object key.
            if !seen.insert(table.to_uppercase()) {
                return Err(ExportError::ConfigError(format!(
                    "duplicate table name: {}",
                    table
                )));
            }
        }
        if !self.export.schema.split('.').all(is_plain_identifier) {
            return Err(ExportError::ConfigError(format!(
                "invalid schema: {:?}",
                self.export.schema
            )));
        }
        if self.database.prefetch_rows == 0 {
            return Err(ExportError::ConfigError(
                "prefetch_rows must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

/// Process-environment lookup handed to `AppConfig::load` by the binary.
pub fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn is_plain_identifier(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$' || c == '#')
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    pub(crate) fn full_env() -> HashMap<String, String> {
        [
            (ENV_ORACLE_USERNAME, "scott"),
            (ENV_ORACLE_PASSWORD, "tiger"),
            (ENV_ORACLE_HOST, "db.internal"),
            (ENV_ORACLE_PORT, "1521"),
            (ENV_ORACLE_SERVICE, "ORCLPDB1"),
            (ENV_S3_BUCKET_NAME, "metasolv-extracts"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    fn load_from(env: &HashMap<String, String>, settings: &ExportSettings) -> Result<AppConfig> {
        AppConfig::load(|k| env.get(k).cloned(), settings)
    }

    #[test]
    fn test_load_defaults() {
        let config = load_from(&full_env(), &ExportSettings::default()).unwrap();

        assert_eq!(config.database.get_connection_string(), "db.internal:1521/ORCLPDB1");
        assert_eq!(config.export.tables.len(), 20);
        assert_eq!(config.export.tables[0], "ADDRESS");
        assert_eq!(config.export.tables[19], "USER_DATA_CATEGORY_VALUES");
        assert_eq!(config.export.schema, "database.schema");
        assert_eq!(config.export.output_dir, PathBuf::from("/tmp"));
        assert_eq!(config.export.key_prefix, "s3_");
        assert_eq!(config.storage.bucket, "metasolv-extracts");
        assert!(config.storage.endpoint.is_none());
    }

    #[test]
    fn test_missing_keys_are_all_reported() {
        let mut env = full_env();
        env.remove(ENV_S3_BUCKET_NAME);
        env.remove(ENV_ORACLE_HOST);
        env.insert(ENV_ORACLE_PASSWORD.to_string(), "  ".to_string());

        match load_from(&env, &ExportSettings::default()) {
            Err(ExportError::MissingConfig(keys)) => assert_eq!(
                keys,
                vec![ENV_ORACLE_PASSWORD, ENV_ORACLE_HOST, ENV_S3_BUCKET_NAME]
            ),
            other => panic!("expected MissingConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_port() {
        let mut env = full_env();
        env.insert(ENV_ORACLE_PORT.to_string(), "not-a-port".to_string());
        let err = load_from(&env, &ExportSettings::default()).unwrap_err();
        assert!(matches!(err, ExportError::ConfigError(_)));
    }

    #[test]
    fn test_rejects_unsafe_table_names() {
        let settings = ExportSettings {
            tables: Some(vec!["ADDRESS; DROP TABLE X".to_string()]),
            ..Default::default()
        };
        let err = load_from(&full_env(), &settings).unwrap_err();
        assert!(matches!(err, ExportError::ConfigError(_)));
    }

    #[test]
    fn test_load_yaml_settings_and_cli_override() {
        let yaml = r#"
schema: "MSOLV.APP"
tables: ["ADDRESS", "CIRCUIT"]
output_dir: "/var/tmp/extracts"
key_prefix: "snapshots_"
"#;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", yaml).unwrap();
        let path = file.path().to_str().unwrap();

        let mut settings = ExportSettings::from_file(path).expect("Failed to parse settings");
        assert_eq!(settings.tables.as_ref().map(Vec::len), Some(2));

        let args = CliArgs::parse_from(["oracle-s3-exporter", "--table", "NE_TYPE"]);
        settings.merge_cli(&args);

        let config = load_from(&full_env(), &settings).unwrap();
        assert_eq!(config.export.schema, "MSOLV.APP");
        assert_eq!(config.export.tables, vec!["NE_TYPE"]);
        assert_eq!(config.export.output_dir, PathBuf::from("/var/tmp/extracts"));
        assert_eq!(config.export.key_prefix, "snapshots_");
    }

    #[test]
    fn test_rejects_duplicate_tables() {
        let settings = ExportSettings {
            tables: Some(vec!["ADDRESS".to_string(), "address".to_string()]),
            ..Default::default()
        };
        match load_from(&full_env(), &settings) {
            Err(ExportError::ConfigError(msg)) => assert!(msg.contains("duplicate")),
            other => panic!("expected ConfigError, got {:?}", other),
        }

        let args = CliArgs::parse_from([
            "oracle-s3-exporter",
            "--table",
            "CIRCUIT",
            "--table",
            "CIRCUIT",
        ]);
        let mut settings = ExportSettings::default();
        settings.merge_cli(&args);
        assert!(load_from(&full_env(), &settings).is_err());
    }

    #[test]
    fn test_env_lookup_reads_process_environment() {
        let key = "ORACLE_S3_EXPORTER_LOOKUP_CHECK";
        std::env::set_var(key, "present");
        assert_eq!(env_lookup(key).as_deref(), Some("present"));
        std::env::remove_var(key);
        assert_eq!(env_lookup(key), None);
    }

    #[test]
    fn test_unknown_yaml_field_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "bucket: sneaky\n").unwrap();
        let err = ExportSettings::from_file(file.path().to_str().unwrap()).unwrap_err();
        assert!(matches!(err, ExportError::ConfigError(_)));
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = load_from(&full_env(), &ExportSettings::default()).unwrap();
        let rendered = format!("{:?}", config.database);
        assert!(!rendered.contains("tiger"));
    }
}
