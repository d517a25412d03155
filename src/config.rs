use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
    pub refresh_ttl_minutes: i64,
}

/// The single fixed subject this instance tracks. `password_hash` is an
/// argon2 PHC string: supplied directly via OWNER_PASSWORD_HASH or derived
/// from OWNER_PASSWORD at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct OwnerConfig {
    pub username: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub owner: OwnerConfig,
    pub height_cm: f64,
    pub goal_weight_kg: f64,
    pub upload_dir: PathBuf,
    pub max_upload_mb: usize,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "vitalog".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "vitalog-owner".into()),
            ttl_minutes: std::env::var("JWT_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60),
            refresh_ttl_minutes: std::env::var("JWT_REFRESH_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60 * 24 * 14),
        };

        let username = std::env::var("OWNER_USERNAME").unwrap_or_else(|_| "self".into());
        let password_hash = match std::env::var("OWNER_PASSWORD_HASH") {
            Ok(hash) => hash,
            Err(_) => crate::auth::password::hash_password(&std::env::var("OWNER_PASSWORD")?)?,
        };
        let owner = OwnerConfig {
            username,
            password_hash,
        };

        Ok(Self {
            database_url,
            jwt,
            owner,
            height_cm: std::env::var("SUBJECT_HEIGHT_CM")
                .ok()
                .and_then(|v| v.parse::<f64>().ok())
                .unwrap_or(170.0),
            goal_weight_kg: std::env::var("GOAL_WEIGHT_KG")
                .ok()
                .and_then(|v| v.parse::<f64>().ok())
                .unwrap_or(80.0),
            upload_dir: std::env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("storage/uploads")),
            max_upload_mb: std::env::var("MAX_UPLOAD_MB")
                .ok()
                .and_then(|v| v.parse::<usize>().ok())
                .unwrap_or(10),
        })
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb * 1024 * 1024
    }
}
