//! SQLite-backed analysis records. The sensitive payload (URL, feature
//! values, verdict) is sealed with AES-256-GCM before it touches disk; the
//! key is derived from a device-bound secret (in production: Secure
//! Enclave / Keystore / DPAPI).

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use rand::RngCore;
use ring::digest;
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::Mutex;

const NONCE_LEN: usize = 12;
const KEY_LEN: usize = 32;

type StoreError = Box<dyn std::error::Error + Send + Sync>;

fn derive_key(secret: &[u8]) -> [u8; KEY_LEN] {
    let digest = digest::digest(&digest::SHA256, secret);
    let mut key = [0u8; KEY_LEN];
    key.copy_from_slice(digest.as_ref());
    key
}

/// Decrypted analysis row.
#[derive(Debug, Clone)]
pub struct AnalysisRecord {
    pub ts: i64,
    pub schema: String,
    pub payload: String,
    pub label: Option<String>,
    pub score: Option<f64>,
}

pub struct AnalysisStore {
    conn: Mutex<Connection>,
    key: [u8; KEY_LEN],
}

impl AnalysisStore {
    /// Open or create the store at `path`, keyed by `secret`.
    pub fn open(path: &Path, secret: &[u8]) -> Result<Self, rusqlite::Error> {
        let conn = Connection::open(path)?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS analyses (
                id TEXT PRIMARY KEY,
                ts INTEGER NOT NULL,
                schema TEXT NOT NULL,
                payload_enc TEXT NOT NULL,
                label TEXT,
                score REAL
            );
            CREATE INDEX IF NOT EXISTS idx_analyses_ts ON analyses(ts);
            "#,
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
            key: derive_key(secret),
        })
    }

    /// nonce || ciphertext, base64.
    fn seal(&self, plaintext: &[u8]) -> Result<String, StoreError> {
        let cipher = Aes256Gcm::new_from_slice(&self.key).map_err(|e| format!("{:?}", e))?;
        let mut nonce = [0u8; NONCE_LEN];
        rand::thread_rng().fill_bytes(&mut nonce);
        let ciphertext = cipher
            .encrypt((&nonce).into(), plaintext)
            .map_err(|_| "payload seal failed")?;
        let mut wire = nonce.to_vec();
        wire.extend(ciphertext);
        Ok(BASE64.encode(&wire))
    }

    fn unseal(&self, encoded: &str) -> Result<Vec<u8>, StoreError> {
        let wire = BASE64.decode(encoded)?;
        if wire.len() < NONCE_LEN {
            return Err("sealed payload too short".into());
        }
        let (nonce, ciphertext) = wire.split_at(NONCE_LEN);
        let cipher = Aes256Gcm::new_from_slice(&self.key).map_err(|e| format!("{:?}", e))?;
        cipher
            .decrypt(nonce.into(), ciphertext)
            .map_err(|_| "payload unseal failed".into())
    }

    /// Record one analysis; the payload JSON is sealed, label and score stay
    /// queryable in the clear.
    pub fn insert_analysis(
        &self,
        id: &str,
        ts: i64,
        schema: &str,
        payload_json: &str,
        label: Option<&str>,
        score: Option<f64>,
    ) -> Result<(), StoreError> {
        let sealed = self.seal(payload_json.as_bytes())?;
        self.conn.lock().unwrap().execute(
            "INSERT OR REPLACE INTO analyses (id, ts, schema, payload_enc, label, score)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![id, ts, schema, sealed, label, score],
        )?;
        Ok(())
    }

    pub fn get_analysis(&self, id: &str) -> Result<Option<AnalysisRecord>, StoreError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT ts, schema, payload_enc, label, score FROM analyses WHERE id = ?1",
        )?;
        let mut rows = stmt.query(params![id])?;
        if let Some(row) = rows.next()? {
            let ts: i64 = row.get(0)?;
            let schema: String = row.get(1)?;
            let sealed: String = row.get(2)?;
            let label: Option<String> = row.get(3)?;
            let score: Option<f64> = row.get(4)?;
            let payload = String::from_utf8(self.unseal(&sealed)?)?;
            return Ok(Some(AnalysisRecord {
                ts,
                schema,
                payload,
                label,
                score,
            }));
        }
        Ok(None)
    }

    /// Retention: drop analyses older than `ts`.
    pub fn prune_before(&self, ts: i64) -> Result<u64, rusqlite::Error> {
        let n = self
            .conn
            .lock()
            .unwrap()
            .execute("DELETE FROM analyses WHERE ts < ?1", params![ts])?;
        Ok(n as u64)
    }
}
